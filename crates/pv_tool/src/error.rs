//! Error types for pvtool.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Errors that can occur while configuring or building validation managers.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Invalid migration key date '{value}': {message}")]
    InvalidKeyDate { value: String, message: String },

    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    #[error("Framework error: {0}")]
    Framework(#[from] pv_framework::FrameworkError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
