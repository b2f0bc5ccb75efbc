//! Schema document model
//!
//! A schema document maps resource names to property descriptors, using the
//! `type`/`$ref`/`items`/`enum`/`format` subset of JSON Schema. Documents
//! are read as YAML so that JSON input is accepted too and property order is
//! preserved.

use crate::error::{Result, SchemaError};
use serde::Deserialize;
use serde_yaml::{Mapping, Value as YamlValue};
use std::collections::HashMap;

/// `type` keyword: a single name or a union such as `["string", "null"]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TypeDecl {
    Single(String),
    Union(Vec<String>),
}

/// Descriptor of one property
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub type_decl: Option<TypeDecl>,

    #[serde(rename = "$ref")]
    pub reference: Option<String>,

    pub any_of: Option<Vec<PropertySchema>>,

    pub all_of: Option<Vec<PropertySchema>>,

    pub items: Option<Box<PropertySchema>>,

    #[serde(rename = "enum")]
    pub enumeration: Option<Vec<serde_json::Value>>,

    pub format: Option<String>,

    pub title: Option<String>,

    #[serde(default)]
    pub nullable: bool,
}

impl PropertySchema {
    /// Name of the referenced resource (`#/components/schemas/Period` -> `Period`)
    pub fn reference_name(&self) -> Option<&str> {
        self.reference
            .as_deref()
            .map(|reference| reference.rsplit('/').next().unwrap_or(reference))
    }

    /// True for the `{type: null}` member of a nullable union
    pub fn is_null_type(&self) -> bool {
        matches!(&self.type_decl, Some(TypeDecl::Single(name)) if name == "null")
    }
}

/// One resource: ordered properties plus an optional enumeration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResourceSchema {
    pub name: String,
    pub title: Option<String>,
    pub properties: Vec<(String, PropertySchema)>,
    /// Set when the resource is an enumeration definition
    pub enumeration: Option<Vec<serde_json::Value>>,
}

impl ResourceSchema {
    pub fn property(&self, name: &str) -> Option<&PropertySchema> {
        self.properties
            .iter()
            .find(|(property, _)| property == name)
            .map(|(_, schema)| schema)
    }

    pub fn is_enumeration(&self) -> bool {
        self.enumeration.is_some() && self.properties.is_empty()
    }
}

/// Parsed schema document
#[derive(Debug, Clone, Default)]
pub struct SchemaDocument {
    resources: Vec<ResourceSchema>,
    index: HashMap<String, usize>,
}

impl SchemaDocument {
    /// Parse a schema document from YAML or JSON text.
    ///
    /// Accepts an OpenAPI document (resources under `components.schemas`) or
    /// a bare `{resource: {properties: ...}}` map.
    pub fn parse(content: &str) -> Result<Self> {
        let root: YamlValue = serde_yaml::from_str(content)?;
        Self::from_yaml(&root)
    }

    pub fn from_yaml(root: &YamlValue) -> Result<Self> {
        let schemas = root
            .get("components")
            .and_then(|components| components.get("schemas"))
            .unwrap_or(root)
            .as_mapping()
            .ok_or_else(|| {
                SchemaError::InvalidDocument("expected a mapping of resources".to_string())
            })?;

        let mut document = SchemaDocument::default();
        for (key, value) in schemas {
            let name = key.as_str().ok_or_else(|| {
                SchemaError::InvalidDocument("resource names must be strings".to_string())
            })?;
            let resource = Self::parse_resource(name, value)?;
            document.add_resource(resource);
        }
        Ok(document)
    }

    /// Add or replace a resource
    pub fn add_resource(&mut self, resource: ResourceSchema) {
        match self.index.get(&resource.name) {
            Some(position) => self.resources[*position] = resource,
            None => {
                self.index
                    .insert(resource.name.clone(), self.resources.len());
                self.resources.push(resource);
            }
        }
    }

    pub fn resource(&self, name: &str) -> Option<&ResourceSchema> {
        self.index.get(name).map(|position| &self.resources[*position])
    }

    pub fn resources(&self) -> impl Iterator<Item = &ResourceSchema> {
        self.resources.iter()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    fn parse_resource(name: &str, value: &YamlValue) -> Result<ResourceSchema> {
        let title = value
            .get("title")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());

        let enumeration = match value.get("enum") {
            Some(values) => Some(serde_yaml::from_value(values.clone())?),
            None => None,
        };

        let properties = match value.get("properties").and_then(|v| v.as_mapping()) {
            Some(mapping) => Self::parse_properties(name, mapping)?,
            None => Vec::new(),
        };

        Ok(ResourceSchema {
            name: name.to_string(),
            title,
            properties,
            enumeration,
        })
    }

    fn parse_properties(resource: &str, mapping: &Mapping) -> Result<Vec<(String, PropertySchema)>> {
        mapping
            .iter()
            .map(|(key, value)| {
                let property = key.as_str().ok_or_else(|| SchemaError::InvalidDocument(
                    format!("property names of '{}' must be strings", resource),
                ))?;
                let schema: PropertySchema =
                    serde_yaml::from_value(value.clone()).map_err(|e| {
                        SchemaError::InvalidProperty {
                            resource: resource.to_string(),
                            property: property.to_string(),
                            message: e.to_string(),
                        }
                    })?;
                Ok((property.to_string(), schema))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_map_keeps_property_order() {
        let document = SchemaDocument::parse(
            r#"
PatientCase:
  properties:
    zeta: {type: string}
    alpha: {type: integer}
    middle: {type: boolean}
"#,
        )
        .unwrap();

        let resource = document.resource("PatientCase").unwrap();
        let names: Vec<&str> = resource.properties.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "middle"]);
    }

    #[test]
    fn test_parse_openapi_json() {
        let document = SchemaDocument::parse(
            r##"{
                "openapi": "3.1.0",
                "components": {"schemas": {
                    "VitalStatus": {"enum": ["alive", "deceased"]},
                    "PatientCase": {"properties": {
                        "vitalStatus": {"$ref": "#/components/schemas/VitalStatus"},
                        "tags": {"type": "array", "items": {"type": "string"}}
                    }}
                }}
            }"##,
        )
        .unwrap();

        assert_eq!(document.len(), 2);
        assert!(document.resource("VitalStatus").unwrap().is_enumeration());

        let case = document.resource("PatientCase").unwrap();
        let status = case.property("vitalStatus").unwrap();
        assert_eq!(status.reference_name(), Some("VitalStatus"));
        let tags = case.property("tags").unwrap();
        assert_eq!(tags.type_decl, Some(TypeDecl::Single("array".to_string())));
        assert!(tags.items.is_some());
    }

    #[test]
    fn test_type_union() {
        let schema: PropertySchema =
            serde_yaml::from_str(r#"{type: [string, "null"], format: date}"#).unwrap();
        assert_eq!(
            schema.type_decl,
            Some(TypeDecl::Union(vec!["string".to_string(), "null".to_string()]))
        );
        assert_eq!(schema.format.as_deref(), Some("date"));
    }

    #[test]
    fn test_non_mapping_document_is_rejected() {
        let result = SchemaDocument::parse("- just\n- a list\n");
        assert!(matches!(result, Err(SchemaError::InvalidDocument(_))));
    }

    #[test]
    fn test_malformed_property_is_reported() {
        let result = SchemaDocument::parse("Case:\n  properties:\n    age: {type: 5}\n");
        assert!(matches!(result, Err(SchemaError::InvalidProperty { .. })));
    }
}
