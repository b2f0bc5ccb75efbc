//! Entity and field descriptors

use super::field_type::FieldType;
use super::operator::{operators_for, Operator};
use crate::ast::{Rule, RuleSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A clinical resource type exposed for filtering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Stable identifier
    pub id: String,

    /// Human-readable name
    pub name: String,
}

impl Entity {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One selectable option of an enumerated field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: Value,
    pub label: String,
}

impl FieldOption {
    pub fn new(value: impl Into<Value>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Default value of a new filter on a field
#[derive(Clone)]
pub enum DefaultValue {
    Literal(Value),
    /// Evaluated each time a filter is created
    Producer(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl DefaultValue {
    pub fn producer(f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        DefaultValue::Producer(Arc::new(f))
    }

    pub fn evaluate(&self) -> Value {
        match self {
            DefaultValue::Literal(value) => value.clone(),
            DefaultValue::Producer(produce) => produce(),
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            DefaultValue::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

/// Custom validation hook of a field.
///
/// Receives the rule holding the filter and the rule set enclosing that rule.
/// Any returned value is reported as an error as-is.
pub type FieldValidator = Arc<dyn Fn(&Rule, &RuleSet) -> Option<Value> + Send + Sync>;

/// A queryable attribute of an entity
#[derive(Clone)]
pub struct Field {
    /// Owning entity id
    pub entity: String,

    /// Globally unique value path, `entity.property[.nested]`
    pub path: String,

    /// Display name
    pub name: String,

    pub field_type: FieldType,

    /// Operators derived from `field_type`
    pub operators: Vec<Operator>,

    /// Enumerated options, if any
    pub options: Option<Vec<FieldOption>>,

    pub default_value: Option<DefaultValue>,

    pub validator: Option<FieldValidator>,
}

impl Field {
    /// Create a field; operators are derived from the type
    pub fn new(
        entity: impl Into<String>,
        path: impl Into<String>,
        name: impl Into<String>,
        field_type: FieldType,
    ) -> Self {
        let operators = operators_for(&field_type).to_vec();
        Self {
            entity: entity.into(),
            path: path.into(),
            name: name.into(),
            field_type,
            operators,
            options: None,
            default_value: None,
            validator: None,
        }
    }

    pub fn with_options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_default(mut self, default_value: DefaultValue) -> Self {
        self.default_value = Some(default_value);
        self
    }

    pub fn with_validator(
        mut self,
        validator: impl Fn(&Rule, &RuleSet) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    pub fn is_array(&self) -> bool {
        self.field_type.is_array()
    }

    /// Property part of the path, without the entity prefix
    pub fn property(&self) -> &str {
        self.path
            .strip_prefix(self.entity.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(&self.path)
    }

    /// First operator, used for new filters
    pub fn default_operator(&self) -> Option<Operator> {
        self.operators.first().copied()
    }

    /// Evaluated default value, if one is configured
    pub fn default_value(&self) -> Option<Value> {
        self.default_value.as_ref().map(DefaultValue::evaluate)
    }

    pub fn allows(&self, operator: Operator) -> bool {
        self.operators.contains(&operator)
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("entity", &self.entity)
            .field("path", &self.path)
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .field("operators", &self.operators)
            .field("options", &self.options)
            .field("default_value", &self.default_value)
            .field("validator", &self.validator.as_ref().map(|_| ".."))
            .finish()
    }
}
