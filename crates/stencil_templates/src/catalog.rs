//! Template discovery.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::parser::TemplateParser;

/// File extensions recognised as templates.
pub const TEMPLATE_EXTENSIONS: &[&str] = &["md", "txt", "tmpl"];

/// A template found on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateEntry {
    /// Path relative to the catalog root, `/`-separated.
    pub path: String,
    /// Placeholder identifiers in order of first appearance.
    pub variables: Vec<String>,
}

/// Discovers templates under a directory.
pub struct TemplateCatalog {
    root: PathBuf,
}

impl TemplateCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Walk the root for template files, sorted by path.
    ///
    /// Unreadable files and directories are skipped with a warning.
    pub fn discover(&self) -> Vec<TemplateEntry> {
        if !self.root.exists() {
            warn!("Templates directory does not exist: {:?}", self.root);
            return Vec::new();
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry under {:?}: {}", self.root, e);
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file() || !is_template(path) {
                continue;
            }

            match fs::read_to_string(path) {
                Ok(content) => {
                    let relative = self.relative(path);
                    debug!("Discovered template: {}", relative);
                    entries.push(TemplateEntry {
                        path: relative,
                        variables: TemplateParser::names_in_order(&content)
                            .into_iter()
                            .map(String::from)
                            .collect(),
                    });
                }
                Err(e) => warn!("Skipping unreadable template {:?}: {}", path, e),
            }
        }

        info!("Discovered {} templates in {:?}", entries.len(), self.root);
        entries
    }

    fn relative(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

fn is_template(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            TEMPLATE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_dir_is_empty() {
        let temp = tempdir().unwrap();
        let catalog = TemplateCatalog::new(temp.path().join("nope"));
        assert!(catalog.discover().is_empty());
    }

    #[test]
    fn test_discovers_nested_templates() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("review")).unwrap();
        fs::write(temp.path().join("review/code.md"), "Review {target_file} for {goal}").unwrap();
        fs::write(temp.path().join("intro.txt"), "Hi {name} {name}").unwrap();
        fs::write(temp.path().join("image.png"), [0u8, 1, 2]).unwrap();

        let entries = TemplateCatalog::new(temp.path()).discover();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path, "intro.txt");
        assert_eq!(entries[0].variables, vec!["name"]);
        assert_eq!(entries[1].path, "review/code.md");
        assert_eq!(entries[1].variables, vec!["target_file", "goal"]);
    }

    #[test]
    fn test_unreadable_template_is_skipped() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.md"), "{first}").unwrap();
        fs::write(temp.path().join("b.md"), [0xffu8, 0xfe, 0x00]).unwrap();
        fs::write(temp.path().join("c.md"), "{last}").unwrap();

        let entries = TemplateCatalog::new(temp.path()).discover();
        let paths: Vec<_> = entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["a.md", "c.md"]);
    }
}
