use anyhow::Result;
use std::path::PathBuf;

const SELEFLOW_DIR: &str = ".seleflow";
const LOGS_DIR: &str = "logs";

/// Environment variable to override the SeleFlow data directory.
const SELEFLOW_DIR_ENV: &str = "SELEFLOW_DIR";

/// Resolve the SeleFlow data directory.
/// Priority: SELEFLOW_DIR env var > ~/.seleflow/
pub fn resolve_seleflow_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(SELEFLOW_DIR_ENV)
        && !dir.trim().is_empty()
    {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|h| h.join(SELEFLOW_DIR))
        .ok_or_else(|| anyhow::anyhow!("Failed to determine home directory"))
}

/// Get the logs directory: ~/.seleflow/logs/
pub fn logs_dir() -> Result<PathBuf> {
    let dir = resolve_seleflow_dir()?.join(LOGS_DIR);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
