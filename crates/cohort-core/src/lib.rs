//! Cohort Core - core types for the cohort query builder
//!
//! This crate provides the fundamental types shared by the schema
//! introspector and the query builder:
//! - Semantic field types and the operator table
//! - Entity/field catalogue
//! - The rule tree (rule sets, rules, filters)
//! - The wire codec
//! - Error types

pub mod ast;
pub mod codec;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use ast::{Condition, NodePath, Rule, RuleFilter, RuleSet, RuleSetItem};
pub use codec::WireRuleSet;
pub use error::{CoreError, Result};
pub use types::{BaseType, Catalogue, Entity, Field, FieldType, Operator};
