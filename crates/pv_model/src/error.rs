//! Error types for the data model.

use thiserror::Error;

/// Result type alias for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur while loading data sets.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid data set at {location}: {source}")]
    InvalidDataSet {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Empty input: no data sets found")]
    Empty,
}
