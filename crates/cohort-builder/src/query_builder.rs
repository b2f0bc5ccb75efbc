//! Query builder session
//!
//! A [`QueryBuilder`] owns one rule tree and exposes the editing operations
//! used by a cohort query editor. Nodes are addressed by [`NodePath`].
//!
//! No operation fails: unresolvable paths, unknown fields and edits on a
//! read-only session are logged and ignored. Each operation returns `true`
//! when it changed the tree. After every applied change the tree is
//! revalidated and all listeners are notified.

use crate::config::BuilderConfig;
use crate::error::Result;
use crate::listener::QueryBuilderListener;
use crate::registry::OperatorRegistry;
use crate::validator::{ErrorReport, Validator};
use cohort_core::codec::{self, WireRuleSet};
use cohort_core::types::Operator;
use cohort_core::{Catalogue, Condition, NodePath, Rule, RuleFilter, RuleSet, RuleSetItem};
use serde_json::Value;
use std::sync::Arc;

/// Editing session over one rule tree
pub struct QueryBuilder {
    registry: Arc<OperatorRegistry>,
    config: BuilderConfig,
    validator: Validator,
    root: RuleSet,
    errors: Option<ErrorReport>,
    listeners: Vec<Box<dyn QueryBuilderListener>>,
}

impl QueryBuilder {
    /// Start a session with the default tree for `config`
    pub fn new(registry: Arc<OperatorRegistry>, config: BuilderConfig) -> Self {
        let validator = Validator::new().allow_empty_rulesets(config.allow_empty_rulesets);
        let mut builder = Self {
            registry,
            validator,
            root: RuleSet::new(config.default_condition),
            errors: None,
            listeners: Vec::new(),
            config,
        };

        if builder.config.start_with_default_rule {
            if let Some(rule) = builder.default_rule() {
                builder.root.rules.push(rule.into());
            }
        }
        builder.revalidate();
        builder
    }

    // ========== Accessors ==========

    pub fn catalogue(&self) -> &Catalogue {
        self.registry.catalogue()
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Current tree in the internal format
    pub fn value(&self) -> &RuleSet {
        &self.root
    }

    /// Errors of the current tree, `None` when valid
    pub fn errors(&self) -> Option<&ErrorReport> {
        self.errors.as_ref()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_none()
    }

    pub fn is_read_only(&self) -> bool {
        self.config.read_only
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.config.read_only = read_only;
    }

    /// Operators offered for a field
    pub fn operators(&self, field_path: &str) -> Vec<Operator> {
        self.registry.operators(field_path)
    }

    pub fn add_listener(&mut self, listener: impl QueryBuilderListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // ========== Wire format ==========

    /// Current tree in the wire format; `None` for an empty root
    pub fn to_wire(&self) -> Option<WireRuleSet> {
        codec::to_wire(&self.root)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(codec::to_json_string(self.to_wire().as_ref())?)
    }

    /// Replace the tree with a stored wire value; `None` loads an empty root.
    ///
    /// Loading is allowed on read-only sessions.
    pub fn load_wire(&mut self, wire: Option<&WireRuleSet>) {
        self.root = match wire {
            Some(wire) => codec::to_internal(wire),
            None => RuleSet::new(self.config.default_condition),
        };
        tracing::debug!("Loaded rule tree with {} rules", self.root.rule_count());
        self.revalidate();
        self.notify_changed();
    }

    pub fn load_json(&mut self, json: &str) -> Result<()> {
        let wire = codec::from_json_str(json)?;
        self.load_wire(wire.as_ref());
        Ok(())
    }

    // ========== Structural edits ==========

    /// Append a default rule on the first entity to the rule set at `parent`
    pub fn add_rule(&mut self, parent: &NodePath) -> bool {
        if !self.writable("add_rule") {
            return false;
        }
        let Some(rule) = self.default_rule() else {
            return false;
        };
        let Some(ruleset) = self.root.ruleset_mut(parent) else {
            tracing::debug!("add_rule: no rule set at {:?}", parent);
            return false;
        };

        ruleset.rules.push(rule.into());
        tracing::debug!("Rule added under {:?}", parent);
        self.commit()
    }

    /// Append a filter on the entity's default field to the rule at `rule_path`
    pub fn add_rule_filter(&mut self, rule_path: &NodePath) -> bool {
        if !self.writable("add_rule_filter") {
            return false;
        }
        let Some(entity) = self.root.rule(rule_path).map(|rule| rule.entity.clone()) else {
            tracing::debug!("add_rule_filter: no rule at {:?}", rule_path);
            return false;
        };
        let Some(filter) = self.default_filter(&entity) else {
            return false;
        };
        let Some(rule) = self.root.rule_mut(rule_path) else {
            return false;
        };

        rule.filters.push(filter);
        tracing::debug!("Filter added to rule {:?}", rule_path);
        self.commit()
    }

    pub fn remove_rule_filter(&mut self, rule_path: &NodePath, index: usize) -> bool {
        if !self.writable("remove_rule_filter") {
            return false;
        }
        let Some(rule) = self.root.rule_mut(rule_path) else {
            tracing::debug!("remove_rule_filter: no rule at {:?}", rule_path);
            return false;
        };
        if index >= rule.filters.len() {
            tracing::debug!("remove_rule_filter: no filter {} in rule {:?}", index, rule_path);
            return false;
        }

        rule.filters.remove(index);
        tracing::debug!("Filter {} removed from rule {:?}", index, rule_path);
        self.commit()
    }

    pub fn remove_rule(&mut self, path: &NodePath) -> bool {
        if !self.writable("remove_rule") {
            return false;
        }
        if self.root.rule(path).is_none() {
            tracing::debug!("remove_rule: no rule at {:?}", path);
            return false;
        }

        self.root.remove(path);
        tracing::debug!("Rule {:?} removed", path);
        self.commit()
    }

    /// Append an empty rule set (condition `and`) to the rule set at `parent`
    pub fn add_rule_set(&mut self, parent: &NodePath) -> bool {
        if !self.writable("add_rule_set") {
            return false;
        }
        let Some(ruleset) = self.root.ruleset_mut(parent) else {
            tracing::debug!("add_rule_set: no rule set at {:?}", parent);
            return false;
        };

        ruleset.rules.push(RuleSet::new(Condition::And).into());
        tracing::debug!("Rule set added under {:?}", parent);
        self.commit()
    }

    /// Remove a nested rule set. The root cannot be removed.
    pub fn remove_rule_set(&mut self, path: &NodePath) -> bool {
        if !self.writable("remove_rule_set") {
            return false;
        }
        if path.is_empty() || !matches!(self.root.item(path), Some(RuleSetItem::RuleSet(_))) {
            tracing::debug!("remove_rule_set: no removable rule set at {:?}", path);
            return false;
        }

        self.root.remove(path);
        tracing::debug!("Rule set {:?} removed", path);
        self.commit()
    }

    // ========== Value edits ==========

    /// Switch a rule to another entity, resetting it to a single default filter
    pub fn change_entity(&mut self, rule_path: &NodePath, entity_id: &str) -> bool {
        if !self.writable("change_entity") {
            return false;
        }
        if self.catalogue().entity(entity_id).is_none() {
            tracing::warn!("change_entity: unknown entity '{}'", entity_id);
            return false;
        }
        let default_field = self.catalogue().default_field(entity_id).map(|f| f.path.clone());
        let Some(rule) = self.root.rule_mut(rule_path) else {
            tracing::debug!("change_entity: no rule at {:?}", rule_path);
            return false;
        };

        rule.entity = entity_id.to_string();
        rule.filters.clear();
        tracing::debug!("Rule {:?} switched to entity '{}'", rule_path, entity_id);

        if let Some(field_path) = default_field {
            if let Some(filter) = self.filter_for_field(&field_path, None) {
                if let Some(rule) = self.root.rule_mut(rule_path) {
                    rule.filters.push(filter);
                }
            }
        }
        self.commit()
    }

    /// Point a filter at another field of the rule's entity.
    ///
    /// The value is kept only when both fields share a persistable type;
    /// otherwise it resets to the new field's default. The operator resets to
    /// the new field's first operator.
    pub fn change_field(&mut self, rule_path: &NodePath, index: usize, field_path: &str) -> bool {
        if !self.writable("change_field") {
            return false;
        }
        let Some(rule) = self.root.rule(rule_path) else {
            tracing::debug!("change_field: no rule at {:?}", rule_path);
            return false;
        };
        let Some(current) = rule.filters.get(index) else {
            tracing::debug!("change_field: no filter {} in rule {:?}", index, rule_path);
            return false;
        };
        if let Some(field) = self.catalogue().field(field_path) {
            if field.entity != rule.entity {
                tracing::warn!(
                    "change_field: '{}' belongs to '{}', not to rule entity '{}'",
                    field_path,
                    field.entity,
                    rule.entity
                );
                return false;
            }
        }
        let Some(filter) = self.filter_for_field(field_path, Some(current)) else {
            return false;
        };
        let Some(slot) = self.root.filter_mut(rule_path, index) else {
            return false;
        };

        *slot = filter;
        tracing::debug!("Filter {} of rule {:?} now on '{}'", index, rule_path, field_path);
        self.commit()
    }

    /// Change a filter's operator.
    ///
    /// Moving to a multi-valued operator wraps a scalar value into a
    /// one-element array. Moving to a range operator drops a scalar value.
    /// Arrays are never unwrapped.
    pub fn change_operator(&mut self, rule_path: &NodePath, index: usize, operator: Operator) -> bool {
        if !self.writable("change_operator") {
            return false;
        }
        let Some(current) = self.root.filter(rule_path, index) else {
            tracing::debug!("change_operator: no filter {} in rule {:?}", index, rule_path);
            return false;
        };
        if !self.registry.operators(&current.field).contains(&operator) {
            tracing::warn!("change_operator: {} not offered for '{}'", operator, current.field);
            return false;
        }
        let Some(filter) = self.root.filter_mut(rule_path, index) else {
            return false;
        };

        filter.operator = operator;
        if operator.is_multi_valued() || operator.is_range() {
            filter.value = match filter.value.take() {
                Some(Value::Null) | None => None,
                Some(Value::Array(items)) => Some(Value::Array(items)),
                Some(scalar) if operator.is_multi_valued() => Some(Value::Array(vec![scalar])),
                Some(_) => None,
            };
        }
        tracing::debug!("Filter {} of rule {:?} uses {}", index, rule_path, operator);
        self.commit()
    }

    pub fn set_filter_value(&mut self, rule_path: &NodePath, index: usize, value: Option<Value>) -> bool {
        if !self.writable("set_filter_value") {
            return false;
        }
        let Some(filter) = self.root.filter_mut(rule_path, index) else {
            tracing::debug!("set_filter_value: no filter {} in rule {:?}", index, rule_path);
            return false;
        };

        filter.value = value;
        self.commit()
    }

    pub fn change_condition(&mut self, ruleset_path: &NodePath, condition: Condition) -> bool {
        if !self.writable("change_condition") {
            return false;
        }
        let Some(ruleset) = self.root.ruleset_mut(ruleset_path) else {
            tracing::debug!("change_condition: no rule set at {:?}", ruleset_path);
            return false;
        };

        ruleset.condition = condition;
        tracing::debug!("Rule set {:?} combines with {:?}", ruleset_path, condition);
        self.commit()
    }

    pub fn toggle_collapsed(&mut self, ruleset_path: &NodePath) -> bool {
        if !self.writable("toggle_collapsed") {
            return false;
        }
        let Some(ruleset) = self.root.ruleset_mut(ruleset_path) else {
            tracing::debug!("toggle_collapsed: no rule set at {:?}", ruleset_path);
            return false;
        };

        ruleset.collapsed = !ruleset.collapsed;
        self.commit()
    }

    // ========== Internals ==========

    fn writable(&self, operation: &str) -> bool {
        if self.config.read_only {
            tracing::debug!("{}: session is read-only", operation);
        }
        !self.config.read_only
    }

    /// Rule on the first entity with one default filter
    fn default_rule(&self) -> Option<Rule> {
        let Some(entity) = self.catalogue().first_entity() else {
            tracing::warn!("Cannot create a rule: catalogue has no entities");
            return None;
        };
        let mut rule = Rule::new(entity.id.clone());
        rule.filters.extend(self.default_filter(&entity.id));
        Some(rule)
    }

    fn default_filter(&self, entity_id: &str) -> Option<RuleFilter> {
        let field = self.catalogue().default_field(entity_id)?;
        self.filter_for_field(&field.path, None)
    }

    /// Fresh filter on `field_path`, optionally carrying over from `previous`
    fn filter_for_field(&self, field_path: &str, previous: Option<&RuleFilter>) -> Option<RuleFilter> {
        let Some(field) = self.catalogue().field(field_path) else {
            tracing::warn!("Unknown field '{}'", field_path);
            return None;
        };
        let Some(operator) = self.registry.operators(field_path).first().copied() else {
            tracing::warn!("Field '{}' has no operators", field_path);
            return None;
        };

        let carried = previous.and_then(|previous| {
            let old = self.catalogue().field(&previous.field)?;
            let persist =
                old.field_type == field.field_type && self.config.is_persistable(&field.field_type);
            persist.then(|| previous.value.clone()).flatten()
        });

        let mut filter = RuleFilter::new(field.path.clone(), operator);
        filter.value = carried.or_else(|| field.default_value());
        Some(filter)
    }

    fn commit(&mut self) -> bool {
        self.revalidate();
        for listener in &mut self.listeners {
            listener.touched();
        }
        self.notify_changed();
        true
    }

    fn revalidate(&mut self) {
        self.errors = self.validator.validate(&self.root, self.registry.catalogue());
    }

    fn notify_changed(&mut self) {
        for listener in &mut self.listeners {
            listener.changed();
        }
    }
}

impl std::fmt::Debug for QueryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("root", &self.root)
            .field("errors", &self.errors)
            .field("read_only", &self.config.read_only)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cohort_core::types::{BaseType, Entity, Field, FieldType};
    use serde_json::json;

    fn session(config: BuilderConfig) -> QueryBuilder {
        let catalogue = Catalogue::new().add_entity(
            Entity::new("Case", "Case"),
            vec![
                Field::new("Case", "Case.age", "Age", FieldType::Scalar(BaseType::Integer)),
                Field::new("Case", "Case.sex", "Sex", FieldType::Scalar(BaseType::String)),
            ],
        );
        QueryBuilder::new(Arc::new(OperatorRegistry::new(Arc::new(catalogue))), config)
    }

    #[test]
    fn test_new_session_is_empty_and_invalid() {
        let builder = session(BuilderConfig::default());
        assert!(builder.value().is_empty());
        assert!(builder.to_wire().is_none());
        assert!(builder.errors().unwrap().empty);
    }

    #[test]
    fn test_start_with_default_rule() {
        let builder = session(BuilderConfig::default().start_with_default_rule(true));
        let rule = builder.value().rule(&[0]).unwrap();
        assert_eq!(rule.entity, "Case");
        assert_eq!(rule.filters[0].field, "Case.age");
        assert_eq!(rule.filters[0].operator, Operator::EqualIntegerFilter);
    }

    #[test]
    fn test_bad_paths_are_ignored() {
        let mut builder = session(BuilderConfig::default());
        assert!(!builder.add_rule(&[3]));
        assert!(!builder.remove_rule(&[0]));
        assert!(!builder.remove_rule_set(&[]));
        assert!(!builder.change_operator(&[0], 0, Operator::IsNullFilter));
        assert!(builder.value().is_empty());
    }

    #[test]
    fn test_scalar_wrapped_for_multi_valued_operator() {
        let mut builder = session(BuilderConfig::default());
        builder.add_rule(&[]);
        builder.change_field(&[0], 0, "Case.sex");
        builder.set_filter_value(&[0], 0, Some(json!("female")));

        assert!(builder.change_operator(&[0], 0, Operator::AnyOfStringFilter));
        assert_eq!(builder.value().filter(&[0], 0).unwrap().value, Some(json!(["female"])));

        builder.change_operator(&[0], 0, Operator::EqualStringFilter);
        assert_eq!(builder.value().filter(&[0], 0).unwrap().value, Some(json!(["female"])));
    }

    #[test]
    fn test_operator_outside_field_set_is_rejected() {
        let mut builder = session(BuilderConfig::default());
        builder.add_rule(&[]);
        assert!(!builder.change_operator(&[0], 0, Operator::EqualStringFilter));
        assert_eq!(
            builder.value().filter(&[0], 0).unwrap().operator,
            Operator::EqualIntegerFilter
        );
    }
}
