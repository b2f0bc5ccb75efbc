//! Type system for the cohort query builder
//!
//! This module contains:
//! - Semantic field types
//! - Operators and the type-to-operator table
//! - Entity and field descriptors
//! - The field catalogue

pub mod catalogue;
pub mod field;
pub mod field_type;
pub mod operator;

pub use catalogue::Catalogue;
pub use field::{DefaultValue, Entity, Field, FieldOption, FieldValidator};
pub use field_type::{BaseType, FieldType};
pub use operator::{operators_for, Arity, Operator};
