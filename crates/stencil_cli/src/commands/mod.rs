//! CLI command definitions.
//!
//! This module defines the command structure for the stencil CLI and the
//! helpers the commands share: configuration loading and variable parsing.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use stencil_templates::{StencilConfig, VariableMap, CONFIG_FILE};
use thiserror::Error;
use tracing::debug;

pub mod check;
pub mod generate;
pub mod inspect;
pub mod list;

/// stencil - prompt generation from markdown templates
#[derive(Parser)]
#[command(name = "stencil")]
#[command(version, about = "stencil - prompt generation from markdown templates")]
#[command(long_about = r#"
stencil fills `{name}` placeholders in text templates with caller-supplied
variables, after validating every input.

COMMANDS:
  generate  → Render a template with variables
  inspect   → Show the placeholders a template references
  check     → Check a markdown file and a set of variables
  list      → Discover templates in a directory

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Validation failure
  4 - File system error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Path to the configuration file (default: ./stencil.toml)
    #[arg(short, long, global = true, env = "STENCIL_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a template with variables
    Generate(generate::GenerateArgs),

    /// Show the placeholders a template references
    Inspect(inspect::InspectArgs),

    /// Check markdown structure and variables
    Check(check::CheckArgs),

    /// Discover templates in a directory
    List(list::ListArgs),
}

/// Failures raised by the commands themselves.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Check failed: {0}")]
    CheckFailed(String),
}

/// Load the configuration named on the command line, or `./stencil.toml`.
///
/// An explicitly named file must exist; the default file is optional.
pub fn load_config(path: Option<&Path>) -> Result<StencilConfig> {
    let config = match path {
        Some(path) => StencilConfig::load(path)?,
        None => StencilConfig::load_or_default(Path::new(CONFIG_FILE))?,
    };
    debug!(
        "Using templates_dir {:?}, output_dir {:?}",
        config.templates_dir, config.output_dir
    );
    Ok(config)
}

/// Parse a `key=value` pair. The value may itself contain `=`.
pub fn parse_var(raw: &str) -> Result<(String, String), CommandError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(CommandError::InvalidArgument(format!(
            "expected key=value, got '{}'",
            raw
        ))),
    }
}

/// Read variables from a JSON or YAML file, chosen by extension.
pub fn read_vars_file(path: &Path) -> Result<VariableMap> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read variables file {}", path.display()))?;

    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let variables = match extension.as_str() {
        "json" => VariableMap::from_json_str(&content)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?,
        "yaml" | "yml" => VariableMap::from_yaml_str(&content)
            .with_context(|| format!("Invalid YAML in {}", path.display()))?,
        _ => {
            return Err(CommandError::InvalidArgument(format!(
                "variables file must be .json, .yaml or .yml: {}",
                path.display()
            ))
            .into())
        }
    };

    debug!("Loaded {} variables from {:?}", variables.len(), path);
    Ok(variables)
}

/// Merge file variables with `--var` pairs; pairs win.
pub fn collect_variables(vars_file: Option<&Path>, pairs: &[String]) -> Result<VariableMap> {
    let mut variables = match vars_file {
        Some(path) => read_vars_file(path)?,
        None => VariableMap::new(),
    };
    for raw in pairs {
        let (key, value) = parse_var(raw)?;
        variables.insert(key, value);
    }
    Ok(variables)
}
