//! Variable name validation.
//!
//! A legal name starts with an ASCII letter and continues with ASCII
//! letters, digits, or underscores. Hyphens and dots are rejected so that
//! the boundary between a `{placeholder}` and its surrounding text is never
//! ambiguous.

/// Decides whether a string is a legal variable name.
pub trait NameValidator: Send + Sync {
    fn is_valid_name(&self, key: &str) -> bool;
}

/// The standard `^[A-Za-z][A-Za-z0-9_]*$` rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardNameValidator;

impl NameValidator for StandardNameValidator {
    fn is_valid_name(&self, key: &str) -> bool {
        let mut chars = key.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        }
    }
}
