//! Error types for the cohort query core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// Wire JSON could not be decoded
    #[error("Invalid wire format: {0}")]
    InvalidWireFormat(#[from] serde_json::Error),

    /// Unrecognized operator name
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    /// Field path not present in the catalogue
    #[error("Field not found: {0}")]
    FieldNotFound(String),

    /// Entity not present in the catalogue
    #[error("Entity not found: {0}")]
    EntityNotFound(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
