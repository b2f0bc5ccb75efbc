//! Rule filter AST definitions

use crate::types::Operator;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One atomic predicate: field, operator, value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleFilter {
    /// Field value path (`entity.field` internally, `field` on the wire)
    pub field: String,

    pub operator: Operator,

    /// Comparison value; absent for nullary operators and unset filters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl RuleFilter {
    pub fn new(field: impl Into<String>, operator: Operator) -> Self {
        Self {
            field: field.into(),
            operator,
            value: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// True when the filter carries a usable value.
    ///
    /// `null`, empty strings and empty arrays count as missing.
    pub fn has_value(&self) -> bool {
        match &self.value {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(items)) => !items.is_empty(),
            Some(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_without_value_omits_key() {
        let filter = RuleFilter::new("Case.age", Operator::EqualIntegerFilter);
        let json = serde_json::to_value(&filter).unwrap();
        assert_eq!(json, json!({"field": "Case.age", "operator": "EqualIntegerFilter"}));
    }

    #[test]
    fn test_null_value_deserializes_as_absent() {
        let filter: RuleFilter = serde_json::from_value(json!({
            "field": "age",
            "operator": "IsNullFilter",
            "value": null
        }))
        .unwrap();
        assert_eq!(filter.value, None);
    }

    #[test]
    fn test_has_value() {
        let filter = RuleFilter::new("Case.name", Operator::EqualStringFilter);
        assert!(!filter.has_value());
        assert!(!filter.clone().with_value("").has_value());
        assert!(!filter.clone().with_value(json!([])).has_value());
        assert!(filter.clone().with_value("x").has_value());
        assert!(filter.clone().with_value(0).has_value());
        assert!(filter.with_value(false).has_value());
    }
}
