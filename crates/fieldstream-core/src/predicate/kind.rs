use crate::compile::CompileError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

///
/// PredicateKind
///
/// Closed grammar of attribute predicates.
/// Tags are stable and feed predicate fingerprints.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum PredicateKind {
    AlwaysTrue = 0x01,
    AlwaysFalse = 0x02,
    IsNull = 0x03,
    IsNotNull = 0x04,
    Equal = 0x05,
    NotEqual = 0x06,
    EqualIgnoreCase = 0x07,
    NotEqualIgnoreCase = 0x08,
    LessThan = 0x09,
    LessOrEqual = 0x0a,
    GreaterThan = 0x0b,
    GreaterOrEqual = 0x0c,
    Between = 0x0d,
    NotBetween = 0x0e,
    In = 0x0f,
    NotIn = 0x10,
    StartsWith = 0x11,
    NotStartsWith = 0x12,
    StartsWithIgnoreCase = 0x13,
    NotStartsWithIgnoreCase = 0x14,
    EndsWith = 0x15,
    NotEndsWith = 0x16,
    EndsWithIgnoreCase = 0x17,
    NotEndsWithIgnoreCase = 0x18,
    Contains = 0x19,
    NotContains = 0x1a,
    ContainsIgnoreCase = 0x1b,
    NotContainsIgnoreCase = 0x1c,
    IsEmpty = 0x1d,
    IsNotEmpty = 0x1e,
}

impl PredicateKind {
    pub const ALL: [Self; 30] = [
        Self::AlwaysTrue,
        Self::AlwaysFalse,
        Self::IsNull,
        Self::IsNotNull,
        Self::Equal,
        Self::NotEqual,
        Self::EqualIgnoreCase,
        Self::NotEqualIgnoreCase,
        Self::LessThan,
        Self::LessOrEqual,
        Self::GreaterThan,
        Self::GreaterOrEqual,
        Self::Between,
        Self::NotBetween,
        Self::In,
        Self::NotIn,
        Self::StartsWith,
        Self::NotStartsWith,
        Self::StartsWithIgnoreCase,
        Self::NotStartsWithIgnoreCase,
        Self::EndsWith,
        Self::NotEndsWith,
        Self::EndsWithIgnoreCase,
        Self::NotEndsWithIgnoreCase,
        Self::Contains,
        Self::NotContains,
        Self::ContainsIgnoreCase,
        Self::NotContainsIgnoreCase,
        Self::IsEmpty,
        Self::IsNotEmpty,
    ];

    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Decode a stable tag. Unknown tags mean the producer speaks a
    /// different predicate grammar.
    pub fn from_tag(tag: u8) -> Result<Self, CompileError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == tag)
            .ok_or_else(|| CompileError::UnsupportedPredicateKind {
                kind: format!("0x{tag:02x}"),
            })
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AlwaysTrue => "ALWAYS_TRUE",
            Self::AlwaysFalse => "ALWAYS_FALSE",
            Self::IsNull => "IS_NULL",
            Self::IsNotNull => "IS_NOT_NULL",
            Self::Equal => "EQUAL",
            Self::NotEqual => "NOT_EQUAL",
            Self::EqualIgnoreCase => "EQUAL_IGNORE_CASE",
            Self::NotEqualIgnoreCase => "NOT_EQUAL_IGNORE_CASE",
            Self::LessThan => "LESS_THAN",
            Self::LessOrEqual => "LESS_OR_EQUAL",
            Self::GreaterThan => "GREATER_THAN",
            Self::GreaterOrEqual => "GREATER_OR_EQUAL",
            Self::Between => "BETWEEN",
            Self::NotBetween => "NOT_BETWEEN",
            Self::In => "IN",
            Self::NotIn => "NOT_IN",
            Self::StartsWith => "STARTS_WITH",
            Self::NotStartsWith => "NOT_STARTS_WITH",
            Self::StartsWithIgnoreCase => "STARTS_WITH_IGNORE_CASE",
            Self::NotStartsWithIgnoreCase => "NOT_STARTS_WITH_IGNORE_CASE",
            Self::EndsWith => "ENDS_WITH",
            Self::NotEndsWith => "NOT_ENDS_WITH",
            Self::EndsWithIgnoreCase => "ENDS_WITH_IGNORE_CASE",
            Self::NotEndsWithIgnoreCase => "NOT_ENDS_WITH_IGNORE_CASE",
            Self::Contains => "CONTAINS",
            Self::NotContains => "NOT_CONTAINS",
            Self::ContainsIgnoreCase => "CONTAINS_IGNORE_CASE",
            Self::NotContainsIgnoreCase => "NOT_CONTAINS_IGNORE_CASE",
            Self::IsEmpty => "IS_EMPTY",
            Self::IsNotEmpty => "IS_NOT_EMPTY",
        }
    }

    /// Operand contract every predicate of this kind must satisfy.
    #[must_use]
    pub const fn contract(self) -> OperandContract {
        match self {
            Self::AlwaysTrue
            | Self::AlwaysFalse
            | Self::IsNull
            | Self::IsNotNull
            | Self::IsEmpty
            | Self::IsNotEmpty => OperandContract::None,
            Self::Equal | Self::NotEqual => OperandContract::Scalar,
            Self::LessThan | Self::LessOrEqual | Self::GreaterThan | Self::GreaterOrEqual => {
                OperandContract::Ordered
            }
            Self::Between | Self::NotBetween => OperandContract::Range,
            Self::In | Self::NotIn => OperandContract::Set,
            Self::EqualIgnoreCase
            | Self::NotEqualIgnoreCase
            | Self::StartsWith
            | Self::NotStartsWith
            | Self::StartsWithIgnoreCase
            | Self::NotStartsWithIgnoreCase
            | Self::EndsWith
            | Self::NotEndsWith
            | Self::EndsWithIgnoreCase
            | Self::NotEndsWithIgnoreCase
            | Self::Contains
            | Self::NotContains
            | Self::ContainsIgnoreCase
            | Self::NotContainsIgnoreCase => OperandContract::Text,
        }
    }

    /// The kind matching exactly the rows this kind rejects (for non-null
    /// attribute values).
    #[must_use]
    pub const fn complement(self) -> Self {
        match self {
            Self::AlwaysTrue => Self::AlwaysFalse,
            Self::AlwaysFalse => Self::AlwaysTrue,
            Self::IsNull => Self::IsNotNull,
            Self::IsNotNull => Self::IsNull,
            Self::Equal => Self::NotEqual,
            Self::NotEqual => Self::Equal,
            Self::EqualIgnoreCase => Self::NotEqualIgnoreCase,
            Self::NotEqualIgnoreCase => Self::EqualIgnoreCase,
            Self::LessThan => Self::GreaterOrEqual,
            Self::LessOrEqual => Self::GreaterThan,
            Self::GreaterThan => Self::LessOrEqual,
            Self::GreaterOrEqual => Self::LessThan,
            Self::Between => Self::NotBetween,
            Self::NotBetween => Self::Between,
            Self::In => Self::NotIn,
            Self::NotIn => Self::In,
            Self::StartsWith => Self::NotStartsWith,
            Self::NotStartsWith => Self::StartsWith,
            Self::StartsWithIgnoreCase => Self::NotStartsWithIgnoreCase,
            Self::NotStartsWithIgnoreCase => Self::StartsWithIgnoreCase,
            Self::EndsWith => Self::NotEndsWith,
            Self::NotEndsWith => Self::EndsWith,
            Self::EndsWithIgnoreCase => Self::NotEndsWithIgnoreCase,
            Self::NotEndsWithIgnoreCase => Self::EndsWithIgnoreCase,
            Self::Contains => Self::NotContains,
            Self::NotContains => Self::Contains,
            Self::ContainsIgnoreCase => Self::NotContainsIgnoreCase,
            Self::NotContainsIgnoreCase => Self::ContainsIgnoreCase,
            Self::IsEmpty => Self::IsNotEmpty,
            Self::IsNotEmpty => Self::IsEmpty,
        }
    }
}

impl fmt::Display for PredicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PredicateKind {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| CompileError::UnsupportedPredicateKind {
                kind: s.to_string(),
            })
    }
}

///
/// OperandContract
///
/// Arity and type contract of a predicate kind's operands.
///
/// None    → no operands
/// Scalar  → one non-null scalar of the attribute's family
/// Ordered → one orderable scalar of the attribute's family; chars widen
/// Text    → one text operand over a text attribute
/// Range   → two mutually ordered scalars of the attribute's family
/// Set     → one list of scalars of the attribute's family
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum OperandContract {
    None,
    Scalar,
    Ordered,
    Text,
    Range,
    Set,
}

impl OperandContract {
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::None => 0,
            Self::Scalar | Self::Ordered | Self::Text | Self::Set => 1,
            Self::Range => 2,
        }
    }
}

impl fmt::Display for OperandContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::None => "no operands",
            Self::Scalar => "one scalar of the attribute's family",
            Self::Ordered => "one orderable scalar of the attribute's family",
            Self::Text => "one text operand",
            Self::Range => "two orderable scalars of the attribute's family",
            Self::Set => "one list of scalars of the attribute's family",
        };

        f.write_str(label)
    }
}

///
/// Inclusion
///
/// Boundary openness of two-bound range predicates.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Inclusion {
    StartExclusiveEndExclusive,
    StartInclusiveEndExclusive,
    StartExclusiveEndInclusive,
    #[default]
    StartInclusiveEndInclusive,
}

impl Inclusion {
    pub const ALL: [Self; 4] = [
        Self::StartExclusiveEndExclusive,
        Self::StartInclusiveEndExclusive,
        Self::StartExclusiveEndInclusive,
        Self::StartInclusiveEndInclusive,
    ];

    #[must_use]
    pub const fn is_start_inclusive(self) -> bool {
        matches!(
            self,
            Self::StartInclusiveEndExclusive | Self::StartInclusiveEndInclusive
        )
    }

    #[must_use]
    pub const fn is_end_inclusive(self) -> bool {
        matches!(
            self,
            Self::StartExclusiveEndInclusive | Self::StartInclusiveEndInclusive
        )
    }

    #[must_use]
    pub const fn tag(self) -> u8 {
        match self {
            Self::StartExclusiveEndExclusive => 0x00,
            Self::StartInclusiveEndExclusive => 0x01,
            Self::StartExclusiveEndInclusive => 0x02,
            Self::StartInclusiveEndInclusive => 0x03,
        }
    }
}
