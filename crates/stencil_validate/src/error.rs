//! Error types for input validation.

use thiserror::Error;

use crate::markdown::MarkdownIssue;
use crate::path::PathIssue;

/// Result type alias for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Errors raised when caller input fails validation.
///
/// These are always detected locally and never retried. Messages are
/// stable so callers can match on substrings such as "directory traversal"
/// or "Invalid variable name".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Template source is empty")]
    EmptyTemplateSource,

    #[error("Template content is empty")]
    EmptyTemplate,

    #[error("Invalid template path '{path}': {issue}")]
    InvalidTemplatePath { path: String, issue: PathIssue },

    #[error(
        "Invalid variable name: '{0}' (must start with a letter and contain only letters, digits, or underscores)"
    )]
    InvalidVariableName(String),

    #[error("Invalid placeholder name in template: '{0}'")]
    InvalidPlaceholderName(String),

    #[error("Invalid path for variable '{name}': {issue}")]
    InvalidVariablePath { name: String, issue: PathIssue },

    #[error("Path for variable '{name}' does not exist: {value}")]
    PathNotFound { name: String, value: String },

    #[error("Variable '{name}' must be a string, got {found}")]
    NonStringValue { name: String, found: String },

    #[error("Invalid markdown in {subject}: {issue}")]
    InvalidMarkdown { subject: String, issue: MarkdownIssue },

    #[error("Heading level skipped at '{title}': level {found} follows level {previous}")]
    HeadingLevelSkip {
        title: String,
        previous: usize,
        found: usize,
    },

    #[error("Section '{0}' has an empty body")]
    EmptySection(String),

    #[error("Missing required variables: {}", .0.join(", "))]
    MissingVariables(Vec<String>),

    #[error("Invalid output path '{path}': {issue}")]
    InvalidOutputPath { path: String, issue: PathIssue },
}
