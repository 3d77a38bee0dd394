use anyhow::{Context, Result};
use colored::Colorize;
use seleflow_core::{FlowDefinition, SCRIPT_FILE_NAME, export_script};
use serde_json::json;
use std::path::PathBuf;

use crate::cli::{BuildArgs, OutputFormat};
use crate::config::CliConfig;
use crate::output::json::print_json;

pub fn run(args: BuildArgs, config: &CliConfig, format: OutputFormat) -> Result<()> {
    let definition = FlowDefinition::load(&args.file)
        .with_context(|| format!("Failed to load flow definition {}", args.file.display()))?;
    let flow = definition
        .into_flow()
        .with_context(|| format!("Invalid flow definition {}", args.file.display()))?;

    tracing::info!(
        flow_id = flow.id(),
        steps = flow.steps().len(),
        "Built flow from {}",
        args.file.display()
    );

    let target: Option<PathBuf> = if args.download {
        Some(config.output_dir().join(SCRIPT_FILE_NAME))
    } else {
        args.output
    };

    let Some(target) = target else {
        if format.is_json() {
            return print_json(&json!({
                "url": flow.target_url(),
                "steps": flow.steps().list(),
                "script": flow.script(),
            }));
        }
        print!("{}", flow.script());
        return Ok(());
    };

    let path = export_script(flow.steps().list(), &target)
        .with_context(|| format!("Failed to write script to {}", target.display()))?;

    if format.is_json() {
        return print_json(&json!({
            "path": path.display().to_string(),
            "steps": flow.steps().len(),
        }));
    }

    println!(
        "{} {} ({} steps)",
        "Wrote".green().bold(),
        path.display(),
        flow.steps().len()
    );
    Ok(())
}
