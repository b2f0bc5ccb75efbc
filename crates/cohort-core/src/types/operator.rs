//! Filter operators and the type-to-operator table
//!
//! Operator names double as the wire representation, so the variant names
//! below are part of the backend contract and must not be renamed.

use super::field_type::{BaseType, FieldType};
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shape of the value an operator compares against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// No value (null checks)
    Nullary,
    /// One scalar value
    Single,
    /// A list of values ("in" / "not in" family)
    Multi,
    /// A two-element `[low, high]` list
    Range,
}

macro_rules! operators {
    ($($variant:ident => $arity:ident),+ $(,)?) => {
        /// Named comparison predicate
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum Operator {
            $($variant,)+
        }

        impl Operator {
            /// Wire name of the operator
            pub fn name(&self) -> &'static str {
                match self {
                    $(Operator::$variant => stringify!($variant),)+
                }
            }

            /// Value shape the operator expects
            pub fn arity(&self) -> Arity {
                match self {
                    $(Operator::$variant => Arity::$arity,)+
                }
            }
        }

        impl FromStr for Operator {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $(stringify!($variant) => Ok(Operator::$variant),)+
                    other => Err(CoreError::UnknownOperator(other.to_string())),
                }
            }
        }
    };
}

operators! {
    IsNullFilter => Nullary,
    NotIsNullFilter => Nullary,

    EqualStringFilter => Single,
    NotEqualStringFilter => Single,
    ContainsStringFilter => Single,
    NotContainsStringFilter => Single,
    BeginsWithStringFilter => Single,
    NotBeginsWithStringFilter => Single,
    EndsWithStringFilter => Single,
    NotEndsWithStringFilter => Single,
    AnyOfStringFilter => Multi,
    NotAnyOfStringFilter => Multi,

    AnyOfMultiStringFilter => Multi,
    AllOfMultiStringFilter => Multi,
    NotAnyOfMultiStringFilter => Multi,

    EqualBooleanFilter => Single,

    EqualEnumFilter => Single,
    NotEqualEnumFilter => Single,
    AnyOfEnumFilter => Multi,
    NotAnyOfEnumFilter => Multi,

    AnyOfMultiEnumFilter => Multi,
    AllOfMultiEnumFilter => Multi,
    NotAnyOfMultiEnumFilter => Multi,

    EqualFloatFilter => Single,
    NotEqualFloatFilter => Single,
    LessThanFloatFilter => Single,
    LessThanOrEqualFloatFilter => Single,
    GreaterThanFloatFilter => Single,
    GreaterThanOrEqualFloatFilter => Single,
    BetweenFloatFilter => Range,
    NotBetweenFloatFilter => Range,

    EqualIntegerFilter => Single,
    NotEqualIntegerFilter => Single,
    LessThanIntegerFilter => Single,
    LessThanOrEqualIntegerFilter => Single,
    GreaterThanIntegerFilter => Single,
    GreaterThanOrEqualIntegerFilter => Single,
    BetweenIntegerFilter => Range,
    NotBetweenIntegerFilter => Range,

    OnDateFilter => Single,
    NotOnDateFilter => Single,
    BeforeDateFilter => Single,
    AfterDateFilter => Single,
    OnOrBeforeDateFilter => Single,
    OnOrAfterDateFilter => Single,
    BetweenDatesFilter => Range,
    NotBetweenDatesFilter => Range,

    OverlapsPeriodFilter => Single,
    NotOverlapsPeriodFilter => Single,
    ContainsPeriodFilter => Single,
    NotContainsPeriodFilter => Single,
    ContainedByPeriodFilter => Single,
    NotContainedByPeriodFilter => Single,

    EqualConceptFilter => Single,
    NotEqualConceptFilter => Single,
    AnyOfConceptFilter => Multi,
    NotAnyOfConceptFilter => Multi,
    DescendantsOfConceptFilter => Single,

    AnyOfMultiConceptFilter => Multi,
    AllOfMultiConceptFilter => Multi,
    NotAnyOfMultiConceptFilter => Multi,
    DescendantsOfMultiConceptFilter => Single,

    EqualMeasureFilter => Single,
    NotEqualMeasureFilter => Single,
    LessThanMeasureFilter => Single,
    LessThanOrEqualMeasureFilter => Single,
    GreaterThanMeasureFilter => Single,
    GreaterThanOrEqualMeasureFilter => Single,
    BetweenMeasureFilter => Range,
    NotBetweenMeasureFilter => Range,
}

impl Operator {
    /// Null checks take no value
    pub fn is_nullary(&self) -> bool {
        self.arity() == Arity::Nullary
    }

    /// Operators whose value is a list of alternatives
    pub fn is_multi_valued(&self) -> bool {
        self.arity() == Arity::Multi
    }

    pub fn is_range(&self) -> bool {
        self.arity() == Arity::Range
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

use Operator::*;

const STRING_OPERATORS: &[Operator] = &[
    EqualStringFilter,
    NotEqualStringFilter,
    ContainsStringFilter,
    NotContainsStringFilter,
    BeginsWithStringFilter,
    NotBeginsWithStringFilter,
    EndsWithStringFilter,
    NotEndsWithStringFilter,
    AnyOfStringFilter,
    NotAnyOfStringFilter,
    IsNullFilter,
    NotIsNullFilter,
];

const MULTI_STRING_OPERATORS: &[Operator] = &[
    AnyOfMultiStringFilter,
    AllOfMultiStringFilter,
    NotAnyOfMultiStringFilter,
    IsNullFilter,
    NotIsNullFilter,
];

const BOOLEAN_OPERATORS: &[Operator] = &[EqualBooleanFilter, IsNullFilter, NotIsNullFilter];

const ENUM_OPERATORS: &[Operator] = &[
    EqualEnumFilter,
    NotEqualEnumFilter,
    AnyOfEnumFilter,
    NotAnyOfEnumFilter,
    IsNullFilter,
    NotIsNullFilter,
];

const MULTI_ENUM_OPERATORS: &[Operator] = &[
    AnyOfMultiEnumFilter,
    AllOfMultiEnumFilter,
    NotAnyOfMultiEnumFilter,
    IsNullFilter,
    NotIsNullFilter,
];

const NUMBER_OPERATORS: &[Operator] = &[
    EqualFloatFilter,
    NotEqualFloatFilter,
    LessThanFloatFilter,
    LessThanOrEqualFloatFilter,
    GreaterThanFloatFilter,
    GreaterThanOrEqualFloatFilter,
    BetweenFloatFilter,
    NotBetweenFloatFilter,
    IsNullFilter,
    NotIsNullFilter,
];

const INTEGER_OPERATORS: &[Operator] = &[
    EqualIntegerFilter,
    NotEqualIntegerFilter,
    LessThanIntegerFilter,
    LessThanOrEqualIntegerFilter,
    GreaterThanIntegerFilter,
    GreaterThanOrEqualIntegerFilter,
    BetweenIntegerFilter,
    NotBetweenIntegerFilter,
    IsNullFilter,
    NotIsNullFilter,
];

const DATE_OPERATORS: &[Operator] = &[
    OnDateFilter,
    NotOnDateFilter,
    BeforeDateFilter,
    AfterDateFilter,
    OnOrBeforeDateFilter,
    OnOrAfterDateFilter,
    BetweenDatesFilter,
    NotBetweenDatesFilter,
    IsNullFilter,
    NotIsNullFilter,
];

const PERIOD_OPERATORS: &[Operator] = &[
    OverlapsPeriodFilter,
    NotOverlapsPeriodFilter,
    ContainsPeriodFilter,
    NotContainsPeriodFilter,
    ContainedByPeriodFilter,
    NotContainedByPeriodFilter,
    IsNullFilter,
    NotIsNullFilter,
];

const CONCEPT_OPERATORS: &[Operator] = &[
    EqualConceptFilter,
    NotEqualConceptFilter,
    AnyOfConceptFilter,
    NotAnyOfConceptFilter,
    DescendantsOfConceptFilter,
    IsNullFilter,
    NotIsNullFilter,
];

const MULTI_CONCEPT_OPERATORS: &[Operator] = &[
    AnyOfMultiConceptFilter,
    AllOfMultiConceptFilter,
    NotAnyOfMultiConceptFilter,
    DescendantsOfMultiConceptFilter,
    IsNullFilter,
    NotIsNullFilter,
];

const MEASURE_OPERATORS: &[Operator] = &[
    EqualMeasureFilter,
    NotEqualMeasureFilter,
    LessThanMeasureFilter,
    LessThanOrEqualMeasureFilter,
    GreaterThanMeasureFilter,
    GreaterThanOrEqualMeasureFilter,
    BetweenMeasureFilter,
    NotBetweenMeasureFilter,
    IsNullFilter,
    NotIsNullFilter,
];

const NULL_OPERATORS: &[Operator] = &[IsNullFilter, NotIsNullFilter];

/// Operators valid for a semantic type.
///
/// The first entry is the default operator for a new filter. Unknown types
/// have no operators.
pub fn operators_for(field_type: &FieldType) -> &'static [Operator] {
    match field_type {
        FieldType::Scalar(base) => match base {
            BaseType::String => STRING_OPERATORS,
            BaseType::Number => NUMBER_OPERATORS,
            BaseType::Integer => INTEGER_OPERATORS,
            BaseType::Boolean => BOOLEAN_OPERATORS,
            BaseType::Enum => ENUM_OPERATORS,
            BaseType::Date | BaseType::DateTime => DATE_OPERATORS,
            BaseType::Period => PERIOD_OPERATORS,
            BaseType::CodedConcept => CONCEPT_OPERATORS,
            BaseType::Measure => MEASURE_OPERATORS,
        },
        FieldType::Multi(base) => match base {
            BaseType::String => MULTI_STRING_OPERATORS,
            BaseType::Enum => MULTI_ENUM_OPERATORS,
            BaseType::CodedConcept => MULTI_CONCEPT_OPERATORS,
            BaseType::Number
            | BaseType::Integer
            | BaseType::Boolean
            | BaseType::Date
            | BaseType::DateTime
            | BaseType::Period
            | BaseType::Measure => NULL_OPERATORS,
        },
        FieldType::Unknown(_) => &[],
    }
}
