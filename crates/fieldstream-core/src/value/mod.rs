mod compare;


use serde::{Deserialize, Serialize};
use std::fmt;

// re-exports
pub use compare::{casefold, compare_values, text_matches, values_equal};

///
/// CoercionFamily
///
/// Routing category used to decide whether two values may be compared.
/// Characters sit in the numeric family: ordering against a character
/// widens it to its code point.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum CoercionFamily {
    Bool,
    Collection,
    Null,
    Numeric,
    Textual,
}

///
/// ValueKind
///
/// Type descriptor for attribute values and operands.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum ValueKind {
    Bool,
    Char,
    Float,
    Int,
    List,
    Null,
    Text,
    Uint,
}

impl ValueKind {
    #[must_use]
    pub const fn family(self) -> CoercionFamily {
        match self {
            Self::Bool => CoercionFamily::Bool,
            Self::Char | Self::Float | Self::Int | Self::Uint => CoercionFamily::Numeric,
            Self::List => CoercionFamily::Collection,
            Self::Null => CoercionFamily::Null,
            Self::Text => CoercionFamily::Textual,
        }
    }

    /// Stable type string used in error messages and explain output.
    #[must_use]
    pub const fn type_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Float => "f64",
            Self::Int => "i64",
            Self::List => "list",
            Self::Null => "null",
            Self::Text => "text",
            Self::Uint => "u64",
        }
    }

    /// Whether values of this kind have a total order usable by range predicates.
    #[must_use]
    pub const fn is_orderable(self) -> bool {
        matches!(
            self.family(),
            CoercionFamily::Bool | CoercionFamily::Numeric | CoercionFamily::Textual
        )
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_str())
    }
}

///
/// Value
///
/// Runtime scalar used for predicate operands, attribute reads and
/// backend literals.
///
/// Null → the attribute has no value (SQL NULL).
/// List → operand of set-membership predicates only.
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Bool(bool),
    Char(char),
    Float(f64),
    Int(i64),
    List(Vec<Self>),
    Null,
    Text(String),
    Uint(u64),
}

impl Value {
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::Char(_) => ValueKind::Char,
            Self::Float(_) => ValueKind::Float,
            Self::Int(_) => ValueKind::Int,
            Self::List(_) => ValueKind::List,
            Self::Null => ValueKind::Null,
            Self::Text(_) => ValueKind::Text,
            Self::Uint(_) => ValueKind::Uint,
        }
    }

    #[must_use]
    pub const fn family(&self) -> CoercionFamily {
        self.kind().family()
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Scalars are every value except `Null` and `List`.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Self::Null | Self::List(_))
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Widen a character to its integer code point; every other value is
    /// returned unchanged.
    #[must_use]
    pub fn widen_char(self) -> Self {
        match self {
            Self::Char(c) => Self::Int(i64::from(u32::from(c))),
            other => other,
        }
    }

    /// Short type rendering of this value, lists include their element kinds.
    #[must_use]
    pub fn type_string(&self) -> String {
        match self {
            Self::List(items) => {
                let inner = items
                    .iter()
                    .map(Self::type_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("list<{inner}>")
            }
            other => other.kind().type_str().to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "'{v}'"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Null => f.write_str("null"),
            Self::Text(v) => write!(f, "{v:?}"),
            Self::Uint(v) => write!(f, "{v}"),
        }
    }
}

///
/// FieldValue
///
/// Rust types that can back a mapped attribute.
/// `KIND` is the declared attribute kind; `to_value` lifts one instance.
///

pub trait FieldValue {
    const KIND: ValueKind;

    fn to_value(&self) -> Value;
}

///
/// OrderedValue
///
/// Marker for attribute types that support range and comparison predicates.
///

pub trait OrderedValue: FieldValue {}

macro_rules! impl_field_value {
    ($kind:ident, $variant:ident, $via:ty => $($ty:ty),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                const KIND: ValueKind = ValueKind::$kind;

                fn to_value(&self) -> Value {
                    Value::$variant(<$via>::from(*self))
                }
            }

            impl OrderedValue for $ty {}
        )*
    };
}

impl_field_value!(Int, Int, i64 => i8, i16, i32, i64);
impl_field_value!(Uint, Uint, u64 => u8, u16, u32, u64);
impl_field_value!(Float, Float, f64 => f32, f64);
impl_field_value!(Char, Char, char => char);

impl FieldValue for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FieldValue for String {
    const KIND: ValueKind = ValueKind::Text;

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl OrderedValue for String {}

impl FieldValue for &str {
    const KIND: ValueKind = ValueKind::Text;

    fn to_value(&self) -> Value {
        Value::Text((*self).to_string())
    }
}
