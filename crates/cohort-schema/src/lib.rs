//! Cohort Schema - schema introspection for the cohort query builder
//!
//! This crate reads a resource schema (JSON Schema / OpenAPI subset, in YAML
//! or JSON) and turns it into the field catalogue used to build queries.

pub mod config;
pub mod document;
pub mod error;
pub mod introspector;

// Re-export main types
pub use config::{EntityConfig, FieldOverride, IntrospectorConfig};
pub use document::{PropertySchema, ResourceSchema, SchemaDocument, TypeDecl};
pub use error::{Result, SchemaError};
pub use introspector::{humanize, Introspector};
