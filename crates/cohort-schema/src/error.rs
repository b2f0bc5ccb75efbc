//! Schema error types

use thiserror::Error;

/// Error raised while reading a schema document or introspector config
#[derive(Error, Debug)]
pub enum SchemaError {
    /// YAML/JSON parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Document has no usable schema section
    #[error("Invalid schema document: {0}")]
    InvalidDocument(String),

    /// Invalid property descriptor
    #[error("Invalid property '{property}' in '{resource}': {message}")]
    InvalidProperty {
        resource: String,
        property: String,
        message: String,
    },
}

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_property_message() {
        let error = SchemaError::InvalidProperty {
            resource: "PatientCase".to_string(),
            property: "age".to_string(),
            message: "expected a mapping".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid property 'age' in 'PatientCase': expected a mapping"
        );
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("a: [").unwrap_err();
        let error: SchemaError = yaml_error.into();
        assert!(error.to_string().contains("YAML parsing error"));
    }
}
