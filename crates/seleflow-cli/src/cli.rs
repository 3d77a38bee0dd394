use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// Output format for CLI commands
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn is_json(self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

#[derive(Parser)]
#[command(name = "seleflow")]
#[command(version, about = "SeleFlow - build Selenium automation flows and generate Python scripts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (defaults to the config file value, then text)
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the available actions and their parameters
    Actions,

    /// Render the code fragment for a single action
    Render(RenderArgs),

    /// Generate a script from a flow definition file (JSON, YAML or TOML)
    Build(BuildArgs),

    /// Edit a flow interactively
    Shell(ShellArgs),

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct RenderArgs {
    /// Action kind, e.g. "Click Element"
    pub kind: String,

    /// Parameter value as name=value (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_param)]
    pub params: Vec<(String, String)>,
}

#[derive(Args)]
pub struct BuildArgs {
    /// Flow definition file
    pub file: PathBuf,

    /// Write the script to this file or directory instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write selenium_script.py into the configured output directory
    #[arg(long, conflicts_with = "output")]
    pub download: bool,
}

#[derive(Args)]
pub struct ShellArgs {
    /// Start the flow at this URL right away
    #[arg(long, env = "SELEFLOW_URL")]
    pub url: Option<String>,
}

/// Split a `name=value` pair; the value may itself contain `=`.
pub fn parse_param(input: &str) -> Result<(String, String), String> {
    match input.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected name=value, got '{input}'")),
    }
}
