//! List command - Discover templates in a directory.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use stencil_templates::TemplateCatalog;

use super::load_config;

#[derive(Args)]
pub struct ListArgs {
    /// Directory to search (default: the configured templates directory)
    dir: Option<PathBuf>,

    /// Print the templates as JSON
    #[arg(long)]
    json: bool,
}

pub async fn execute(args: ListArgs, config_path: Option<PathBuf>) -> Result<()> {
    let dir = match args.dir {
        Some(dir) => dir,
        None => load_config(config_path.as_deref())?.templates_dir,
    };

    let entries = TemplateCatalog::new(&dir).discover();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No templates found in {}", dir.display());
        return Ok(());
    }

    println!("📋 Templates in {}:", dir.display());
    for entry in &entries {
        if entry.variables.is_empty() {
            println!("   {}", entry.path);
        } else {
            println!("   {} ({})", entry.path, entry.variables.join(", "));
        }
    }

    Ok(())
}
