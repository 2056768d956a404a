//! Configuration for prompt generation.
//!
//! Configuration is read from a TOML file:
//!
//! ```toml
//! templates_dir = "prompts"
//! output_dir = "generated"
//!
//! [generation]
//! raw_keys = ["input_markdown", "body"]
//! validate_output = true
//! missing = "reject"
//! ```
//!
//! Every field is optional.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::substitutor::{SubstituteOptions, DEFAULT_RAW_KEYS};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "stencil.toml";

/// Errors loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// What to do when a template references a variable nobody supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPolicy {
    /// Remove the placeholder and report the name alongside success.
    #[default]
    Ignore,
    /// Fail the request.
    Reject,
}

/// Per-call generation options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Keys inserted without HTML escaping.
    pub raw_keys: Vec<String>,
    /// Leave every placeholder untouched.
    pub preserve_placeholders: bool,
    /// Require values under raw keys to be valid markdown.
    pub validate_markdown_inputs: bool,
    /// Require the generated prompt to be valid markdown.
    pub validate_output: bool,
    /// Split the prompt into sections and validate heading structure.
    pub structured: bool,
    pub missing: MissingPolicy,
    /// Require path-like values to exist under the templates directory.
    pub require_existing_paths: bool,
    /// Write the prompt to this relative path under the output directory.
    pub output: Option<String>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            raw_keys: DEFAULT_RAW_KEYS.iter().map(|k| k.to_string()).collect(),
            preserve_placeholders: false,
            validate_markdown_inputs: false,
            validate_output: false,
            structured: false,
            missing: MissingPolicy::Ignore,
            require_existing_paths: false,
            output: None,
        }
    }
}

impl GenerateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        if !self.raw_keys.contains(&key) {
            self.raw_keys.push(key);
        }
        self
    }

    pub fn preserve_placeholders(mut self, preserve: bool) -> Self {
        self.preserve_placeholders = preserve;
        self
    }

    pub fn validate_markdown_inputs(mut self, validate: bool) -> Self {
        self.validate_markdown_inputs = validate;
        self
    }

    pub fn validate_output(mut self, validate: bool) -> Self {
        self.validate_output = validate;
        self
    }

    pub fn structured(mut self, structured: bool) -> Self {
        self.structured = structured;
        self
    }

    pub fn missing(mut self, policy: MissingPolicy) -> Self {
        self.missing = policy;
        self
    }

    pub fn require_existing_paths(mut self, require: bool) -> Self {
        self.require_existing_paths = require;
        self
    }

    pub fn with_output(mut self, path: impl Into<String>) -> Self {
        self.output = Some(path.into());
        self
    }

    pub fn is_raw(&self, key: &str) -> bool {
        self.raw_keys.iter().any(|k| k == key)
    }

    pub fn substitute_options(&self) -> SubstituteOptions {
        SubstituteOptions {
            preserve_placeholders: self.preserve_placeholders,
            raw_keys: self.raw_keys.iter().cloned().collect::<HashSet<_>>(),
        }
    }
}

/// Project-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StencilConfig {
    /// Base directory for template paths and path-like values.
    pub templates_dir: PathBuf,
    /// Base directory for output files.
    pub output_dir: PathBuf,
    /// Create missing parent directories when writing output.
    pub create_dirs: bool,
    pub generation: GenerateOptions,
}

impl Default for StencilConfig {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            create_dirs: true,
            generation: GenerateOptions::default(),
        }
    }
}

impl StencilConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading config from {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path`, or fall back to defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }
}
