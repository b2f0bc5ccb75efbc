//! Semantic field types
//!
//! Every queryable field carries a `FieldType`. Scalar and array variants of
//! the same base type select different operator sets, so arrays are modelled
//! as `Multi(base)` rather than a flag.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Base semantic type of a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    String,
    Number,
    Integer,
    Boolean,
    Enum,
    Date,
    DateTime,
    Period,
    CodedConcept,
    Measure,
}

/// Semantic type of a field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Single-valued field
    Scalar(BaseType),
    /// Array-valued field
    Multi(BaseType),
    /// Type the schema declared but the engine does not recognize
    Unknown(String),
}

impl BaseType {
    pub const ALL: [BaseType; 10] = [
        BaseType::String,
        BaseType::Number,
        BaseType::Integer,
        BaseType::Boolean,
        BaseType::Enum,
        BaseType::Date,
        BaseType::DateTime,
        BaseType::Period,
        BaseType::CodedConcept,
        BaseType::Measure,
    ];

    /// Canonical type name
    pub fn name(&self) -> &'static str {
        match self {
            BaseType::String => "string",
            BaseType::Number => "number",
            BaseType::Integer => "integer",
            BaseType::Boolean => "boolean",
            BaseType::Enum => "enum",
            BaseType::Date => "date",
            BaseType::DateTime => "date-time",
            BaseType::Period => "Period",
            BaseType::CodedConcept => "CodedConcept",
            BaseType::Measure => "Measure",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        BaseType::ALL.iter().copied().find(|base| base.name() == name)
    }
}

impl FieldType {
    pub fn scalar(base: BaseType) -> Self {
        FieldType::Scalar(base)
    }

    pub fn multi(base: BaseType) -> Self {
        FieldType::Multi(base)
    }

    /// The base type, if the type is recognized
    pub fn base(&self) -> Option<BaseType> {
        match self {
            FieldType::Scalar(base) | FieldType::Multi(base) => Some(*base),
            FieldType::Unknown(_) => None,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, FieldType::Multi(_))
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, FieldType::Unknown(_))
    }

    /// Wrap this type as an array type. Array and unknown types are returned unchanged.
    pub fn into_multi(self) -> Self {
        match self {
            FieldType::Scalar(base) => FieldType::Multi(base),
            other => other,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Scalar(base) => f.write_str(base.name()),
            FieldType::Multi(base) => write!(f, "Multi{}", base.name()),
            FieldType::Unknown(name) => f.write_str(name),
        }
    }
}

impl FromStr for FieldType {
    type Err = std::convert::Infallible;

    /// Parse a canonical type name. Unrecognized names parse to `Unknown`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(base) = BaseType::from_name(s) {
            return Ok(FieldType::Scalar(base));
        }
        if let Some(base) = s.strip_prefix("Multi").and_then(BaseType::from_name) {
            return Ok(FieldType::Multi(base));
        }
        Ok(FieldType::Unknown(s.to_string()))
    }
}

impl From<&str> for FieldType {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(field_type) => field_type,
            Err(never) => match never {},
        }
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(FieldType::from(name.as_str()))
    }
}
