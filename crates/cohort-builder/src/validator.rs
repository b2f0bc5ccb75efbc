//! Rule tree validation
//!
//! Validation never fails; problems are collected into an [`ErrorReport`]
//! that drives the enable/disable state of a session.

use cohort_core::types::{Arity, Operator};
use cohort_core::{Catalogue, Rule, RuleSet, RuleSetItem};
use serde::Serialize;
use serde_json::Value;

/// One problem found in a rule
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleError {
    /// A non-nullary filter has no usable value
    MissingValue {
        path: Vec<usize>,
        field: String,
        operator: Operator,
    },

    /// The filter's field is not in the catalogue
    UnknownField { path: Vec<usize>, field: String },

    /// The value does not fit the operator: multi-valued operators take an
    /// array, range operators a `[lo, hi]` pair
    InvalidValueShape {
        path: Vec<usize>,
        field: String,
        operator: Operator,
    },

    /// The operator is not offered for the filter's field
    OperatorNotAllowed {
        path: Vec<usize>,
        field: String,
        operator: Operator,
    },

    /// Value returned by a field's custom validator, passed through verbatim
    Custom(Value),
}

/// Validation outcome of a whole tree
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ErrorReport {
    /// Some rule set in the tree has no children
    pub empty: bool,

    pub rules: Vec<RuleError>,
}

impl ErrorReport {
    pub fn has_errors(&self) -> bool {
        self.empty || !self.rules.is_empty()
    }
}

/// Tree validator
#[derive(Debug, Clone, Default)]
pub struct Validator {
    allow_empty_rulesets: bool,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow_empty_rulesets(mut self, allow: bool) -> Self {
        self.allow_empty_rulesets = allow;
        self
    }

    /// Validate `root` against `catalogue`; `None` means the tree is valid
    pub fn validate(&self, root: &RuleSet, catalogue: &Catalogue) -> Option<ErrorReport> {
        let mut report = ErrorReport {
            empty: !self.allow_empty_rulesets && has_empty_ruleset(root),
            rules: Vec::new(),
        };

        let mut path = Vec::new();
        self.check_ruleset(root, catalogue, &mut path, &mut report.rules);

        report.has_errors().then_some(report)
    }

    fn check_ruleset(
        &self,
        ruleset: &RuleSet,
        catalogue: &Catalogue,
        path: &mut Vec<usize>,
        errors: &mut Vec<RuleError>,
    ) {
        for (index, item) in ruleset.rules.iter().enumerate() {
            path.push(index);
            match item {
                RuleSetItem::Rule(rule) => self.check_rule(rule, ruleset, catalogue, path, errors),
                RuleSetItem::RuleSet(child) => self.check_ruleset(child, catalogue, path, errors),
            }
            path.pop();
        }
    }

    fn check_rule(
        &self,
        rule: &Rule,
        parent: &RuleSet,
        catalogue: &Catalogue,
        path: &[usize],
        errors: &mut Vec<RuleError>,
    ) {
        for filter in &rule.filters {
            let Some(field) = catalogue.field(&filter.field) else {
                errors.push(RuleError::UnknownField {
                    path: path.to_vec(),
                    field: filter.field.clone(),
                });
                continue;
            };

            if !field.allows(filter.operator) {
                errors.push(RuleError::OperatorNotAllowed {
                    path: path.to_vec(),
                    field: filter.field.clone(),
                    operator: filter.operator,
                });
            }

            if !filter.operator.is_nullary() && !filter.has_value() {
                errors.push(RuleError::MissingValue {
                    path: path.to_vec(),
                    field: filter.field.clone(),
                    operator: filter.operator,
                });
            } else if !value_fits(filter.operator, filter.value.as_ref()) {
                errors.push(RuleError::InvalidValueShape {
                    path: path.to_vec(),
                    field: filter.field.clone(),
                    operator: filter.operator,
                });
            }

            if let Some(validator) = &field.validator {
                if let Some(error) = validator(rule, parent) {
                    errors.push(RuleError::Custom(error));
                }
            }
        }
    }
}

/// Whether a present value has the shape `operator` expects
fn value_fits(operator: Operator, value: Option<&Value>) -> bool {
    match (operator.arity(), value) {
        (Arity::Multi, Some(value)) => value.is_array(),
        (Arity::Range, Some(value)) => value.as_array().is_some_and(|items| items.len() == 2),
        _ => true,
    }
}

/// True if `ruleset` or any rule set below it has no children
fn has_empty_ruleset(ruleset: &RuleSet) -> bool {
    ruleset.is_empty()
        || ruleset
            .rules
            .iter()
            .filter_map(RuleSetItem::as_ruleset)
            .any(has_empty_ruleset)
}
