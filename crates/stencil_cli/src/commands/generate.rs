//! Generate command - Render a template with variables.

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgGroup, Args};
use stencil_templates::{
    GenerateOptions, MissingPolicy, PromptManager, SubstitutionResult, TemplateInput,
};
use tracing::info;

use super::{collect_variables, load_config, CommandError};

#[derive(Args)]
#[command(group(ArgGroup::new("source").required(true).args(["template", "inline"])))]
pub struct GenerateArgs {
    /// Template path, relative to the templates directory
    #[arg(short, long)]
    template: Option<String>,

    /// Template text given on the command line
    #[arg(long)]
    inline: Option<String>,

    /// Variable as key=value (repeatable)
    #[arg(long = "var", value_name = "KEY=VALUE")]
    vars: Vec<String>,

    /// JSON or YAML file of variables
    #[arg(long)]
    vars_file: Option<PathBuf>,

    /// Write the prompt to this path, relative to the output directory
    #[arg(short, long)]
    output: Option<String>,

    /// Insert this variable without HTML escaping (repeatable)
    #[arg(long = "raw-key", value_name = "KEY")]
    raw_keys: Vec<String>,

    /// Split the prompt into sections and check heading structure
    #[arg(long)]
    structured: bool,

    /// Require raw variables to be valid markdown
    #[arg(long)]
    validate_markdown: bool,

    /// Require the prompt to be valid markdown
    #[arg(long)]
    validate_output: bool,

    /// Leave placeholders untouched
    #[arg(long)]
    preserve_placeholders: bool,

    /// Fail when a placeholder has no value
    #[arg(long)]
    strict: bool,

    /// Require path-like variables to exist
    #[arg(long)]
    require_paths: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

impl GenerateArgs {
    fn input(&self) -> Result<TemplateInput, CommandError> {
        match (&self.template, &self.inline) {
            (Some(path), None) => Ok(TemplateInput::path(path.clone())),
            (None, Some(text)) => Ok(TemplateInput::inline(text.clone())),
            _ => Err(CommandError::InvalidArgument(
                "exactly one of --template or --inline is required".to_string(),
            )),
        }
    }

    /// Layer the command-line flags over configured options.
    fn apply(&self, mut options: GenerateOptions) -> GenerateOptions {
        for key in &self.raw_keys {
            options = options.with_raw_key(key.clone());
        }
        if self.structured {
            options.structured = true;
        }
        if self.validate_markdown {
            options.validate_markdown_inputs = true;
        }
        if self.validate_output {
            options.validate_output = true;
        }
        if self.preserve_placeholders {
            options.preserve_placeholders = true;
        }
        if self.strict {
            options.missing = MissingPolicy::Reject;
        }
        if self.require_paths {
            options.require_existing_paths = true;
        }
        if let Some(output) = &self.output {
            options.output = Some(output.clone());
        }
        options
    }
}

pub async fn execute(args: GenerateArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path.as_deref())?;
    let options = args.apply(config.generation.clone());
    let input = args.input()?;
    let variables = collect_variables(args.vars_file.as_deref(), &args.vars)?;

    info!("Generating prompt from {}", input);

    let manager = PromptManager::local(&config);
    let result = manager.generate_prompt(&input, &variables, &options).await;

    if args.json {
        let shape = SubstitutionResult::from_result(&result);
        println!("{}", serde_json::to_string_pretty(&shape)?);
        result?;
        return Ok(());
    }

    let generated = result?;
    match &generated.output_path {
        Some(path) => {
            println!("Wrote prompt to {}", path.display());
            for name in &generated.unknown_variables {
                println!("   ⚠️  No value for {{{}}}", name);
            }
        }
        None => print!("{}", generated.prompt),
    }

    if options.structured {
        eprintln!("Sections:");
        for section in &generated.sections {
            eprintln!("{}- {}", "  ".repeat(section.level - 1), section.title);
        }
    }

    Ok(())
}
