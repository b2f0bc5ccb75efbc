//! Field path encoding between internal and wire shape
//!
//! Internally a filter's field is fully qualified (`Case.age`). On the wire
//! the entity is carried once by the enclosing rule, so filters only name the
//! property (`age`).

use super::wire::WireRuleSet;
use crate::ast::{Rule, RuleSet, RuleSetItem};

/// Strip the entity prefix from a qualified field path.
///
/// Paths of nested sub-resource fields keep every segment after the entity
/// (`SystemicTherapy.medications.drug` -> `medications.drug`). Paths that are
/// not prefixed by `entity` fall back to their last segment.
pub fn field_to_wire(entity: &str, path: &str) -> String {
    if let Some(property) = path
        .strip_prefix(entity)
        .and_then(|rest| rest.strip_prefix('.'))
    {
        if !property.is_empty() {
            return property.to_string();
        }
    }
    path.rsplit('.').next().unwrap_or(path).to_string()
}

/// Qualify a wire field with its rule's entity
pub fn field_to_internal(entity: &str, field: &str) -> String {
    format!("{}.{}", entity, field)
}

/// Convert an internal tree to wire shape. An empty root converts to `None`.
pub fn to_wire(ruleset: &RuleSet) -> Option<WireRuleSet> {
    if ruleset.is_empty() {
        return None;
    }
    Some(WireRuleSet::from_inner(convert_ruleset(ruleset, &field_to_wire)))
}

/// Convert a wire tree back to internal shape
pub fn to_internal(wire: &WireRuleSet) -> RuleSet {
    convert_ruleset(wire.as_inner(), &field_to_internal)
}

/// Like [`to_internal`], treating an absent wire tree as an empty `and` set
pub fn to_internal_or_empty(wire: Option<&WireRuleSet>) -> RuleSet {
    wire.map(to_internal).unwrap_or_default()
}

fn convert_ruleset(ruleset: &RuleSet, convert: &impl Fn(&str, &str) -> String) -> RuleSet {
    RuleSet {
        condition: ruleset.condition,
        rules: ruleset
            .rules
            .iter()
            .map(|item| match item {
                RuleSetItem::Rule(rule) => RuleSetItem::Rule(convert_rule(rule, convert)),
                RuleSetItem::RuleSet(nested) => {
                    RuleSetItem::RuleSet(convert_ruleset(nested, convert))
                }
            })
            .collect(),
        collapsed: ruleset.collapsed,
    }
}

fn convert_rule(rule: &Rule, convert: &impl Fn(&str, &str) -> String) -> Rule {
    let mut converted = rule.clone();
    for filter in &mut converted.filters {
        filter.field = convert(&rule.entity, &filter.field);
    }
    converted
}
