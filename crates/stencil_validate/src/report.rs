//! Aggregated validation reporting.

use serde::Serialize;
use tracing::debug;

use crate::error::ValidationError;

/// Collects every validation problem instead of stopping at the first.
///
/// Prompt generation short-circuits on the first error; this report is for
/// tooling that wants to show a caller everything wrong at once.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!("Validation error: {}", message);
        self.valid = false;
        self.errors.push(message);
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Record a validation error from a short-circuiting check.
    pub fn record(&mut self, result: Result<(), ValidationError>) {
        if let Err(err) = result {
            self.add_error(err.to_string());
        }
    }

    pub fn merge(&mut self, other: ValidationReport) {
        if !other.valid {
            self.valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}
