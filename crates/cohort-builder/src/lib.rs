//! Cohort Builder - query builder sessions for cohort definitions
//!
//! Ties the catalogue from `cohort-schema` to an editable rule tree:
//! - `QueryBuilder`: mutation API over one tree, addressed by node paths
//! - `OperatorRegistry`: memoized operator lookup per field
//! - `Validator`: error report driving the enable/disable state
//! - `QueryBuilderFactory`: shares one catalogue between sessions

pub mod builder;
pub mod config;
pub mod error;
pub mod listener;
pub mod query_builder;
pub mod registry;
pub mod validator;

pub use builder::{FactoryBuilder, QueryBuilderFactory};
pub use config::BuilderConfig;
pub use error::{BuilderError, Result};
pub use listener::{CallbackListener, QueryBuilderListener};
pub use query_builder::QueryBuilder;
pub use registry::OperatorRegistry;
pub use validator::{ErrorReport, RuleError, Validator};

// Re-export the tree types sessions operate on
pub use cohort_core::{Condition, NodePath, Operator, Rule, RuleFilter, RuleSet, WireRuleSet};
