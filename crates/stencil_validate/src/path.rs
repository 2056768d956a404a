//! Relative path validation.
//!
//! Path-shaped input (the template path, output destinations, and any
//! variable whose key ends in `_file` or `_path`) must be a relative path
//! without `..` segments and built only from `[A-Za-z0-9/_.-]`.
//!
//! Rules are applied in a fixed order and the first failing rule is the
//! reported reason:
//!
//! 1. non-empty
//! 2. no `..` segment
//! 3. not absolute (no leading `/` or `\`)
//! 4. character whitelist

use thiserror::Error;

/// Why a path was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathIssue {
    #[error("Path is empty")]
    Empty,

    #[error("Contains directory traversal")]
    DirectoryTraversal,

    #[error("Absolute paths are not allowed")]
    Absolute,

    #[error("Contains invalid characters")]
    InvalidCharacters,
}

/// Decides whether a string is a legal relative file or directory path.
pub trait PathValidator: Send + Sync {
    /// Check a path, returning the first rule it violates.
    fn check_path(&self, value: &str) -> Result<(), PathIssue>;

    fn is_valid_path(&self, value: &str) -> bool {
        self.check_path(value).is_ok()
    }
}

/// The standard relative-path rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPathValidator;

impl PathValidator for StandardPathValidator {
    fn check_path(&self, value: &str) -> Result<(), PathIssue> {
        if value.is_empty() {
            return Err(PathIssue::Empty);
        }

        if value.split(['/', '\\']).any(|segment| segment == "..") {
            return Err(PathIssue::DirectoryTraversal);
        }

        if value.starts_with('/') || value.starts_with('\\') {
            return Err(PathIssue::Absolute);
        }

        let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '/' | '_' | '.' | '-');
        if !value.chars().all(allowed) {
            return Err(PathIssue::InvalidCharacters);
        }

        Ok(())
    }
}

/// Whether a variable key marks its value as path-shaped.
pub fn is_path_like_key(key: &str) -> bool {
    key.ends_with("_file") || key.ends_with("_path")
}
