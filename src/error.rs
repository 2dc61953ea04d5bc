//! Error types for pipeline-artifacts
//!
//! Messages name the offending values so the caller can fix the input directly.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Artifact model error types
#[derive(Error, Debug)]
pub enum Error {
    /// Shape, length or category mismatch in a metrics operation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Task root was read before the hosting runtime provided one
    #[error(
        "Task root is not set: get_uri can only be called at task runtime. \
         The task root is unknown in the current environment."
    )]
    TaskRootUnset,

    /// Schema title not present in the artifact registry
    #[error("Unknown schema title: {0}")]
    UnknownSchemaTitle(String),

    /// JSON (de)serialization of an artifact record failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
