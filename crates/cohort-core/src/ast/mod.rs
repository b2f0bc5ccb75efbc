//! Rule tree definitions
//!
//! This module contains the condition tree nodes:
//! - Rule filters (atomic predicates)
//! - Rules (filter groups on one entity)
//! - Rule sets (nested boolean groups)

pub mod filter;
pub mod rule;
pub mod ruleset;

pub use filter::RuleFilter;
pub use rule::Rule;
pub use ruleset::{Condition, NodePath, RuleSet, RuleSetItem};
