//! Inspect command - Show the placeholders a template references.

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgGroup, Args};
use stencil_templates::{LocalFs, TemplateParser, TemplateSource};
use stencil_validate::{ValidationError, Validators};
use tracing::debug;

use super::load_config;

#[derive(Args)]
#[command(group(ArgGroup::new("source").required(true).args(["template", "inline"])))]
pub struct InspectArgs {
    /// Template path, relative to the templates directory
    #[arg(short, long)]
    template: Option<String>,

    /// Template text given on the command line
    #[arg(long)]
    inline: Option<String>,

    /// Print the parse as JSON
    #[arg(long)]
    json: bool,
}

pub async fn execute(args: InspectArgs, config_path: Option<PathBuf>) -> Result<()> {
    let content = match (&args.template, &args.inline) {
        (Some(path), _) => {
            let config = load_config(config_path.as_deref())?;
            Validators::standard()
                .paths
                .check_path(path)
                .map_err(|issue| ValidationError::InvalidTemplatePath {
                    path: path.clone(),
                    issue,
                })?;
            LocalFs::new(&config.templates_dir).read_text(path).await?
        }
        (None, Some(text)) => text.clone(),
        (None, None) => String::new(),
    };
    debug!("Inspecting {} bytes of template text", content.len());

    let parsed = TemplateParser::parse(&content);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
        return Ok(());
    }

    let validators = Validators::standard();
    println!("Variables:");
    for name in TemplateParser::names_in_order(&content) {
        if validators.names.is_valid_name(name) {
            println!("   - {}", name);
        } else {
            println!("   - {} ❌ invalid name", name);
        }
    }
    if !parsed.escaped.is_empty() {
        println!("Escaped:");
        for name in &parsed.escaped {
            println!("   - \\{{{}\\}}", name);
        }
    }
    if !parsed.nested.is_empty() {
        println!("Nested (left as is):");
        for raw in &parsed.nested {
            println!("   - {}", raw);
        }
    }

    Ok(())
}
