//! Introspector configuration
//!
//! Which resources are exposed, which properties are hidden, and which
//! composite resources are embedded in their parent are domain decisions the
//! schema cannot express, so they are supplied here.

use crate::error::Result;
use cohort_core::types::{BaseType, FieldOption, FieldType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Entity exposed in the catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityConfig {
    /// Resource name in the schema, used as the entity id
    pub id: String,

    /// Display name
    pub name: String,

    /// Property used for new filters instead of the first field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_field: Option<String>,
}

impl EntityConfig {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            default_field: None,
        }
    }

    pub fn with_default_field(mut self, property: impl Into<String>) -> Self {
        self.default_field = Some(property.into());
        self
    }
}

/// Per-field adjustments, keyed by full value path
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,

    /// Replaces the options derived from the schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
}

/// Main introspector configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntrospectorConfig {
    /// Entities to expose, in catalogue order
    pub entities: Vec<EntityConfig>,

    /// Properties that are never filterable
    pub excluded_properties: Vec<String>,

    /// Composite resources embedded in a parent resource
    pub nested_resources: Vec<String>,

    /// Referenced resources treated as a domain value type
    pub composite_types: HashMap<String, FieldType>,

    pub field_overrides: HashMap<String, FieldOverride>,

    /// Recursion guard for nested resources
    pub max_nesting_depth: usize,
}

impl IntrospectorConfig {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            excluded_properties: [
                "id",
                "description",
                "createdAt",
                "updatedAt",
                "createdBy",
                "updatedBy",
                "externalSource",
                "externalSourceId",
                "caseId",
                "therapyLineId",
                "anonymized",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            nested_resources: vec![
                "Medication".to_string(),
                "RadiotherapyDosage".to_string(),
                "RadiotherapySetting".to_string(),
            ],
            composite_types: HashMap::from([
                ("CodedConcept".to_string(), FieldType::Scalar(BaseType::CodedConcept)),
                ("Period".to_string(), FieldType::Scalar(BaseType::Period)),
                ("Measure".to_string(), FieldType::Scalar(BaseType::Measure)),
            ]),
            field_overrides: HashMap::new(),
            max_nesting_depth: 2,
        }
    }

    /// Load a configuration from YAML; missing keys take their defaults
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Add an entity
    pub fn with_entity(mut self, entity: EntityConfig) -> Self {
        self.entities.push(entity);
        self
    }

    /// Exclude a property name from every resource
    pub fn exclude_property(mut self, property: impl Into<String>) -> Self {
        self.excluded_properties.push(property.into());
        self
    }

    /// Mark a resource as a nested sub-resource
    pub fn with_nested_resource(mut self, resource: impl Into<String>) -> Self {
        self.nested_resources.push(resource.into());
        self
    }

    /// Map a referenced resource to a semantic type
    pub fn with_composite_type(mut self, resource: impl Into<String>, field_type: FieldType) -> Self {
        self.composite_types.insert(resource.into(), field_type);
        self
    }

    pub fn with_field_override(mut self, path: impl Into<String>, field_override: FieldOverride) -> Self {
        self.field_overrides.insert(path.into(), field_override);
        self
    }

    pub fn is_excluded(&self, property: &str) -> bool {
        self.excluded_properties.iter().any(|p| p == property)
    }

    pub fn is_nested_resource(&self, resource: &str) -> bool {
        self.nested_resources.iter().any(|r| r == resource)
    }
}

impl Default for IntrospectorConfig {
    fn default() -> Self {
        Self::new()
    }
}
