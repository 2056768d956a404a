//! Check command - Check a markdown file and a set of variables.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use stencil_templates::{
    FsError, PromptManager, Section, SectionAnalyzer, StencilConfig, TemplateParser, VariableMap,
};
use stencil_validate::{ValidationError, ValidationReport};
use tracing::info;

use super::{collect_variables, load_config, CommandError};

#[derive(Args)]
pub struct CheckArgs {
    /// Markdown file to check
    file: PathBuf,

    /// Variable as key=value (repeatable)
    #[arg(long = "var", value_name = "KEY=VALUE")]
    vars: Vec<String>,

    /// JSON or YAML file of variables
    #[arg(long)]
    vars_file: Option<PathBuf>,

    /// Skip the heading structure check
    #[arg(long)]
    skip_sections: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct CheckOutput {
    #[serde(flatten)]
    report: ValidationReport,
    sections: Vec<Section>,
}

pub async fn execute(args: CheckArgs, config_path: Option<PathBuf>) -> Result<()> {
    info!("Checking {}", args.file.display());

    let config = load_config(config_path.as_deref())?;
    let content = tokio::fs::read_to_string(&args.file)
        .await
        .map_err(|e| FsError::from_read(&args.file, e))?;

    let supplied = !args.vars.is_empty() || args.vars_file.is_some();
    let variables = collect_variables(args.vars_file.as_deref(), &args.vars)?;

    let (report, sections) = check_content(
        &config,
        &args.file.display().to_string(),
        &content,
        supplied.then_some(&variables),
        !args.skip_sections,
    );

    if args.json {
        let valid = report.valid;
        let output = CheckOutput { report, sections };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return finish(valid, output.report.errors.len());
    }

    if report.valid {
        println!("✅ {} passed", args.file.display());
    } else {
        println!("❌ {} failed:", args.file.display());
        for error in &report.errors {
            println!("   - {}", error);
        }
    }
    for warning in &report.warnings {
        println!("   ⚠️  {}", warning);
    }
    if !sections.is_empty() {
        println!("📋 {} sections", sections.len());
    }

    finish(report.valid, report.errors.len())
}

fn finish(valid: bool, errors: usize) -> Result<()> {
    if valid {
        Ok(())
    } else {
        Err(CommandError::CheckFailed(format!("{} problem(s) found", errors)).into())
    }
}

/// Run every check over `content` and collect the results.
fn check_content(
    config: &StencilConfig,
    subject: &str,
    content: &str,
    variables: Option<&VariableMap>,
    check_sections: bool,
) -> (ValidationReport, Vec<Section>) {
    let manager = PromptManager::local(config);
    let validators = manager.validators();
    let mut report = ValidationReport::new();

    report.record(
        validators
            .markdown
            .check_markdown(content)
            .map_err(|issue| ValidationError::InvalidMarkdown {
                subject: subject.to_string(),
                issue,
            }),
    );

    let mut sections = Vec::new();
    if check_sections {
        match SectionAnalyzer::analyze(content) {
            Ok(found) => sections = found,
            Err(err) => report.add_error(err.to_string()),
        }
    }

    let names = TemplateParser::names_in_order(content);
    for name in names.iter().filter(|n| !validators.names.is_valid_name(n)) {
        report.add_error(ValidationError::InvalidPlaceholderName(name.to_string()).to_string());
    }

    if let Some(variables) = variables {
        report.merge(manager.check_variables(variables, &config.generation));
        for name in names.iter().filter(|n| !variables.contains_key(n)) {
            report.add_warning(format!("No value for {{{}}}", name));
        }
    }

    (report, sections)
}
