//! Integration tests for the validator capabilities.

use std::sync::Arc;
use std::thread;

use stencil_validate::{
    is_path_like_key, MarkdownIssue, NameValidator, PathIssue, ValidationError, ValidationReport,
    Validators,
};

/// A name rule that additionally forbids uppercase letters.
struct LowercaseNames;

impl NameValidator for LowercaseNames {
    fn is_valid_name(&self, key: &str) -> bool {
        !key.is_empty()
            && key.starts_with(|c: char| c.is_ascii_lowercase())
            && key.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    }
}

#[test]
fn test_standard_bundle_applies_all_rules() {
    let v = Validators::standard();

    assert!(v.names.is_valid_name("project_name"));
    assert!(!v.names.is_valid_name("project-name"));

    assert_eq!(v.paths.check_path("docs/guide.md"), Ok(()));
    assert_eq!(v.paths.check_path("a/b/../c"), Err(PathIssue::DirectoryTraversal));
    assert_eq!(v.paths.check_path("docs/my guide.md"), Err(PathIssue::InvalidCharacters));

    assert_eq!(v.markdown.check_markdown("# Guide\n"), Ok(()));
    assert_eq!(v.markdown.check_markdown("#Guide"), Err(MarkdownIssue::MissingHeading));
}

#[test]
fn test_custom_name_validator_is_injected() {
    let v = Validators::standard().with_names(Arc::new(LowercaseNames));

    assert!(v.names.is_valid_name("name"));
    assert!(!v.names.is_valid_name("Name"));
    // The other capabilities keep the standard rules
    assert!(v.paths.is_valid_path("a/b.md"));
}

#[test]
fn test_validators_are_shared_across_threads() {
    let v = Validators::standard();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let v = v.clone();
            thread::spawn(move || {
                let key = format!("key_{}", i);
                let path = format!("dir{}/file.md", i);
                v.names.is_valid_name(&key) && v.paths.is_valid_path(&path)
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn test_report_collects_path_problems() {
    let v = Validators::standard();
    let inputs = [
        ("source_file", "../escape.md"),
        ("output_path", "out/result.md"),
        ("notes_file", "notes file.md"),
    ];

    let mut report = ValidationReport::new();
    for (key, value) in inputs {
        assert!(is_path_like_key(key));
        report.record(
            v.paths
                .check_path(value)
                .map_err(|issue| ValidationError::InvalidVariablePath {
                    name: key.to_string(),
                    issue,
                }),
        );
    }

    assert!(!report.valid);
    assert_eq!(report.errors.len(), 2);
    assert!(report.errors[0].contains("directory traversal"));
    assert!(report.errors[1].contains("invalid characters"));
}
