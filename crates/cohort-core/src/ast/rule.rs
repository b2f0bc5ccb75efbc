//! Rule AST definitions

use super::filter::RuleFilter;
use serde::{Deserialize, Serialize};

/// A flat group of filters against one entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Entity all filters refer to
    pub entity: String,

    #[serde(default)]
    pub filters: Vec<RuleFilter>,
}

impl Rule {
    /// Create a rule without filters
    pub fn new(entity: impl Into<String>) -> Self {
        Rule {
            entity: entity.into(),
            filters: Vec::new(),
        }
    }

    /// Add a filter
    pub fn add_filter(mut self, filter: RuleFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Replace all filters
    pub fn with_filters(mut self, filters: Vec<RuleFilter>) -> Self {
        self.filters = filters;
        self
    }
}
