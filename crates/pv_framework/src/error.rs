//! Error types for the validation framework.

use thiserror::Error;

/// Result type alias for framework operations.
pub type FrameworkResult<T> = Result<T, FrameworkError>;

/// Errors that can occur while setting up or running a validation.
///
/// Findings about the validated data are never reported through this type;
/// they end up as [`crate::ValidationError`]s inside a summary.
#[derive(Error, Debug)]
pub enum FrameworkError {
    #[error("Parameter mapping of validator '{validator}' does not match its declaration: {message}")]
    ParamMismatch { validator: String, message: String },

    #[error("Invalid path '{0}'")]
    InvalidPath(String),

    #[error("Data set '{data_set}' could not be serialized: {source}")]
    Serialization {
        data_set: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid manager configuration: {0}")]
    InvalidConfiguration(String),
}
