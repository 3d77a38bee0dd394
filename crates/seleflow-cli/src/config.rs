//! CLI configuration file support
//!
//! Loads configuration from ~/.config/seleflow/config.toml

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;

/// Environment variable pointing at an alternative config file.
const CONFIG_PATH_ENV: &str = "SELEFLOW_CONFIG";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CliConfig {
    #[serde(default)]
    pub default: DefaultConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DefaultConfig {
    /// Directory receiving downloaded scripts (defaults to the working directory)
    pub output_dir: Option<String>,
    /// Output format used when --format is not given
    pub format: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl CliConfig {
    pub fn load() -> Self {
        Self::load_from_path(&Self::config_path())
    }

    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(err) => {
                    eprintln!("Warning: Failed to parse config: {err}");
                    Self::default()
                }
            },
            Err(err) => {
                eprintln!("Warning: Failed to read config: {err}");
                Self::default()
            }
        }
    }

    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV)
            && !path.is_empty()
        {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("seleflow")
            .join("config.toml")
    }

    /// Explicit flag wins, then the config value, then text.
    pub fn output_format(&self, flag: Option<OutputFormat>) -> OutputFormat {
        flag.or_else(|| {
            self.default
                .format
                .as_deref()
                .and_then(|value| OutputFormat::from_str(value, true).ok())
        })
        .unwrap_or_default()
    }

    pub fn output_dir(&self) -> PathBuf {
        self.default
            .output_dir
            .as_deref()
            .map(|dir| dir.trim())
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
