//! Configuration types for query builder sessions

use crate::error::Result;
use cohort_core::ast::Condition;
use cohort_core::types::{BaseType, FieldType};
use serde::{Deserialize, Serialize};

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Accept rule sets without children
    pub allow_empty_rulesets: bool,

    /// Reject every mutation
    pub read_only: bool,

    /// Start new sessions with one default rule instead of an empty root
    pub start_with_default_rule: bool,

    /// Condition of a new root rule set
    pub default_condition: Condition,

    /// Types whose value is kept when a filter switches between two fields of that type
    pub persistable_types: Vec<FieldType>,
}

impl BuilderConfig {
    pub fn new() -> Self {
        Self {
            allow_empty_rulesets: false,
            read_only: false,
            start_with_default_rule: false,
            default_condition: Condition::And,
            persistable_types: vec![
                FieldType::Scalar(BaseType::String),
                FieldType::Scalar(BaseType::Number),
                FieldType::Scalar(BaseType::Integer),
                FieldType::Scalar(BaseType::Date),
                FieldType::Scalar(BaseType::DateTime),
                FieldType::Scalar(BaseType::Boolean),
            ],
        }
    }

    /// Load a configuration from YAML; missing keys take their defaults
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn allow_empty_rulesets(mut self, allow: bool) -> Self {
        self.allow_empty_rulesets = allow;
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn start_with_default_rule(mut self, enable: bool) -> Self {
        self.start_with_default_rule = enable;
        self
    }

    pub fn with_persistable_types(mut self, types: Vec<FieldType>) -> Self {
        self.persistable_types = types;
        self
    }

    pub fn is_persistable(&self, field_type: &FieldType) -> bool {
        self.persistable_types.contains(field_type)
    }
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self::new()
    }
}
