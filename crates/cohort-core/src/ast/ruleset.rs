//! Rule set AST definitions
//!
//! A rule set is the recursive node of the condition tree. Children hold no
//! reference to their parent; nodes are addressed from the root by a
//! [`NodePath`], the sequence of child indices leading to them.

use super::filter::RuleFilter;
use super::rule::Rule;
use serde::{Deserialize, Serialize};

/// Index path from the root rule set to a node. The empty path is the root.
pub type NodePath = [usize];

/// Boolean combinator of a rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    #[default]
    And,
    Or,
}

/// Child of a rule set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleSetItem {
    Rule(Rule),
    RuleSet(RuleSet),
}

/// Boolean tree node
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RuleSet {
    pub condition: Condition,

    #[serde(default)]
    pub rules: Vec<RuleSetItem>,

    /// UI-only display state
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub collapsed: bool,
}

impl RuleSetItem {
    pub fn as_rule(&self) -> Option<&Rule> {
        match self {
            RuleSetItem::Rule(rule) => Some(rule),
            RuleSetItem::RuleSet(_) => None,
        }
    }

    pub fn as_ruleset(&self) -> Option<&RuleSet> {
        match self {
            RuleSetItem::RuleSet(ruleset) => Some(ruleset),
            RuleSetItem::Rule(_) => None,
        }
    }
}

impl From<Rule> for RuleSetItem {
    fn from(rule: Rule) -> Self {
        RuleSetItem::Rule(rule)
    }
}

impl From<RuleSet> for RuleSetItem {
    fn from(ruleset: RuleSet) -> Self {
        RuleSetItem::RuleSet(ruleset)
    }
}

impl RuleSet {
    /// Create an empty rule set
    pub fn new(condition: Condition) -> Self {
        Self {
            condition,
            rules: Vec::new(),
            collapsed: false,
        }
    }

    /// Add a rule
    pub fn add_rule(mut self, rule: Rule) -> Self {
        self.rules.push(RuleSetItem::Rule(rule));
        self
    }

    /// Add a nested rule set
    pub fn add_ruleset(mut self, ruleset: RuleSet) -> Self {
        self.rules.push(RuleSetItem::RuleSet(ruleset));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Node at `path`, or `None` if the path does not resolve.
    ///
    /// The root itself is not an item, so the empty path yields `None`.
    pub fn item(&self, path: &NodePath) -> Option<&RuleSetItem> {
        let (last, parent) = path.split_last()?;
        self.ruleset(parent)?.rules.get(*last)
    }

    pub fn item_mut(&mut self, path: &NodePath) -> Option<&mut RuleSetItem> {
        let (last, parent) = path.split_last()?;
        self.ruleset_mut(parent)?.rules.get_mut(*last)
    }

    /// Rule set at `path`; the empty path is the root
    pub fn ruleset(&self, path: &NodePath) -> Option<&RuleSet> {
        let mut current = self;
        for index in path {
            current = current.rules.get(*index)?.as_ruleset()?;
        }
        Some(current)
    }

    pub fn ruleset_mut(&mut self, path: &NodePath) -> Option<&mut RuleSet> {
        let mut current = self;
        for index in path {
            current = match current.rules.get_mut(*index)? {
                RuleSetItem::RuleSet(ruleset) => ruleset,
                RuleSetItem::Rule(_) => return None,
            };
        }
        Some(current)
    }

    pub fn rule(&self, path: &NodePath) -> Option<&Rule> {
        self.item(path)?.as_rule()
    }

    pub fn rule_mut(&mut self, path: &NodePath) -> Option<&mut Rule> {
        match self.item_mut(path)? {
            RuleSetItem::Rule(rule) => Some(rule),
            RuleSetItem::RuleSet(_) => None,
        }
    }

    pub fn filter(&self, rule_path: &NodePath, index: usize) -> Option<&RuleFilter> {
        self.rule(rule_path)?.filters.get(index)
    }

    pub fn filter_mut(&mut self, rule_path: &NodePath, index: usize) -> Option<&mut RuleFilter> {
        self.rule_mut(rule_path)?.filters.get_mut(index)
    }

    /// Remove and return the node at `path`. The root cannot be removed.
    pub fn remove(&mut self, path: &NodePath) -> Option<RuleSetItem> {
        let (last, parent) = path.split_last()?;
        let parent = self.ruleset_mut(parent)?;
        if *last < parent.rules.len() {
            Some(parent.rules.remove(*last))
        } else {
            None
        }
    }

    /// Visit every rule depth-first together with its enclosing rule set
    pub fn for_each_rule<'a>(&'a self, f: &mut impl FnMut(&'a Rule, &'a RuleSet)) {
        for item in &self.rules {
            match item {
                RuleSetItem::Rule(rule) => f(rule, self),
                RuleSetItem::RuleSet(ruleset) => ruleset.for_each_rule(f),
            }
        }
    }

    /// Number of rules in the whole tree
    pub fn rule_count(&self) -> usize {
        let mut count = 0;
        self.for_each_rule(&mut |_, _| count += 1);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Operator;
    use serde_json::json;

    fn age_rule(value: i64) -> Rule {
        Rule::new("Case").add_filter(
            RuleFilter::new("Case.age", Operator::GreaterThanIntegerFilter).with_value(value),
        )
    }

    fn tree() -> RuleSet {
        RuleSet::new(Condition::And)
            .add_rule(age_rule(18))
            .add_ruleset(
                RuleSet::new(Condition::Or)
                    .add_rule(age_rule(40))
                    .add_rule(age_rule(60)),
            )
    }

    #[test]
    fn test_path_lookup() {
        let tree = tree();
        assert!(tree.item(&[]).is_none());
        assert!(tree.rule(&[0]).is_some());
        assert!(tree.ruleset(&[1]).is_some());
        assert_eq!(tree.ruleset(&[1]).unwrap().condition, Condition::Or);
        assert_eq!(
            tree.filter(&[1, 1], 0).and_then(|f| f.value.clone()),
            Some(json!(60))
        );
        assert!(tree.rule(&[1]).is_none());
        assert!(tree.ruleset(&[0]).is_none());
        assert!(tree.rule(&[5]).is_none());
        assert!(tree.ruleset(&[0, 0]).is_none());
    }

    #[test]
    fn test_remove() {
        let mut tree = tree();
        assert!(tree.remove(&[]).is_none());
        assert!(tree.remove(&[9]).is_none());

        let removed = tree.remove(&[1, 0]).unwrap();
        assert_eq!(removed, RuleSetItem::Rule(age_rule(40)));
        assert_eq!(tree.rule_count(), 2);
    }

    #[test]
    fn test_for_each_rule_passes_enclosing_set() {
        let tree = tree();
        let mut conditions = Vec::new();
        tree.for_each_rule(&mut |_, parent| conditions.push(parent.condition));
        assert_eq!(conditions, vec![Condition::And, Condition::Or, Condition::Or]);
    }

    #[test]
    fn test_untagged_children() {
        let tree: RuleSet = serde_json::from_value(json!({
            "condition": "or",
            "rules": [
                {"entity": "Case", "filters": []},
                {"condition": "and", "rules": []}
            ]
        }))
        .unwrap();

        assert_eq!(tree.condition, Condition::Or);
        assert!(tree.rules[0].as_rule().is_some());
        assert!(tree.rules[1].as_ruleset().is_some());
    }

    #[test]
    fn test_collapsed_only_serialized_when_set() {
        let mut tree = RuleSet::new(Condition::And);
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json, json!({"condition": "and", "rules": []}));

        tree.collapsed = true;
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["collapsed"], json!(true));
    }
}
