use anyhow::Result;
use colored::Colorize;
use seleflow_core::{StepParams, get_action, render};
use serde_json::json;

use crate::cli::{OutputFormat, RenderArgs};
use crate::output::json::print_json;

pub fn run(args: RenderArgs, format: OutputFormat) -> Result<()> {
    let params: StepParams = args.params.into_iter().collect();

    if get_action(&args.kind).is_none() {
        eprintln!(
            "{} '{}' is not a registered action; run `seleflow actions` to list them",
            "Warning:".yellow().bold(),
            args.kind
        );
    }

    let code = render(&args.kind, &params);

    if format.is_json() {
        return print_json(&json!({
            "kind": args.kind,
            "params": params,
            "code": code,
        }));
    }

    println!("{code}");
    Ok(())
}
