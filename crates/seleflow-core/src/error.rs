//! Error types for flow start and flow document I/O.
//!
//! Rendering, step list operations and assembly are total and never
//! produce these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Please enter a URL")]
    EmptyUrl,

    #[error("Please enter a valid URL (e.g., https://example.com): {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for flow operations
pub type Result<T> = std::result::Result<T, FlowError>;
