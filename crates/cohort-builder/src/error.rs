//! Builder error types

use thiserror::Error;

/// Builder error type
#[derive(Error, Debug)]
pub enum BuilderError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Configuration file could not be parsed
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Schema error
    #[error("Schema error: {0}")]
    SchemaError(#[from] cohort_schema::SchemaError),

    /// Core error (wire decoding, catalogue lookups)
    #[error("Core error: {0}")]
    CoreError(#[from] cohort_core::CoreError),
}

/// Result type for builder operations
pub type Result<T> = std::result::Result<T, BuilderError>;
