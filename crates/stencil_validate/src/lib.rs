//! # stencil_validate
//!
//! Input validation for stencil prompt generation.
//!
//! Every check in this crate is a pure function of its input, so the
//! validators can be shared freely across threads and concurrent calls.
//!
//! ## Validators
//!
//! - **Names**: variable keys and placeholder identifiers (`^[A-Za-z][A-Za-z0-9_]*$`)
//! - **Paths**: relative file paths (no traversal, no absolute paths, restricted characters)
//! - **Markdown**: minimal structural checks (non-empty, has a heading, balanced fences)
//!
//! ## Example
//!
//! ```rust
//! use stencil_validate::{PathIssue, Validators};
//!
//! let validators = Validators::standard();
//! assert!(validators.names.is_valid_name("user_name"));
//! assert!(!validators.names.is_valid_name("user-name"));
//!
//! assert_eq!(
//!     validators.paths.check_path("../secrets.md"),
//!     Err(PathIssue::DirectoryTraversal)
//! );
//! assert!(validators.markdown.is_valid_markdown("# Title\n\nBody"));
//! ```

pub mod error;
pub mod markdown;
pub mod name;
pub mod path;
pub mod report;

use std::sync::Arc;

pub use error::{ValidationError, ValidationResult};
pub use markdown::{
    is_fence, parse_heading, Heading, MarkdownIssue, MarkdownValidator, StandardMarkdownValidator,
};
pub use name::{NameValidator, StandardNameValidator};
pub use path::{is_path_like_key, PathIssue, PathValidator, StandardPathValidator};
pub use report::ValidationReport;

/// The set of validators injected into a prompt pipeline.
///
/// Each validator is a capability trait object, so callers can swap in
/// their own rules for any one of them without touching the others.
#[derive(Clone)]
pub struct Validators {
    pub names: Arc<dyn NameValidator>,
    pub paths: Arc<dyn PathValidator>,
    pub markdown: Arc<dyn MarkdownValidator>,
}

impl Validators {
    /// Validators implementing the standard rules.
    pub fn standard() -> Self {
        Self {
            names: Arc::new(StandardNameValidator),
            paths: Arc::new(StandardPathValidator),
            markdown: Arc::new(StandardMarkdownValidator),
        }
    }

    pub fn with_names(mut self, names: Arc<dyn NameValidator>) -> Self {
        self.names = names;
        self
    }

    pub fn with_paths(mut self, paths: Arc<dyn PathValidator>) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_markdown(mut self, markdown: Arc<dyn MarkdownValidator>) -> Self {
        self.markdown = markdown;
        self
    }
}

impl Default for Validators {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for Validators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validators").finish_non_exhaustive()
    }
}
