//! Module: value::compare
//! Responsibility: ordering and equality between runtime values.
//! Does not own: operand legality, which the predicate layer checks first.
//! Boundary: in-memory predicate evaluation and the reference backend call here.

use crate::{compile::LikeAnchor, value::Value};
use std::cmp::Ordering;

///
/// Numeric
///
/// Widened numeric view of one value.
///

#[derive(Clone, Copy)]
enum Numeric {
    Int(i128),
    Float(f64),
}

impl Numeric {
    fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Char(c) => Some(Self::Int(i128::from(u32::from(*c)))),
            Value::Int(v) => Some(Self::Int(i128::from(*v))),
            Value::Uint(v) => Some(Self::Int(i128::from(*v))),
            Value::Float(v) => Some(Self::Float(*v)),
            _ => None,
        }
    }

    #[expect(clippy::cast_precision_loss)]
    fn as_f64(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::Float(v) => v,
        }
    }

    fn order(self, other: Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(left), Self::Int(right)) => Some(left.cmp(&right)),
            (left, right) => left.as_f64().partial_cmp(&right.as_f64()),
        }
    }
}

/// Order two values under numeric widening.
///
/// Returns `None` when the values are not mutually ordered: either side is
/// null or a list, the families differ, or a float comparison involves NaN.
#[must_use]
pub fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Char(left), Value::Char(right)) => Some(left.cmp(right)),
        (Value::Text(left), Value::Text(right)) => Some(left.cmp(right)),
        (Value::Bool(left), Value::Bool(right)) => Some(left.cmp(right)),
        _ => Numeric::of(left)?.order(Numeric::of(right)?),
    }
}

/// Equality under numeric widening.
/// `None` means the values cannot be compared (null, list, family mismatch).
#[must_use]
pub fn values_equal(left: &Value, right: &Value) -> Option<bool> {
    compare_values(left, right).map(|ordering| ordering == Ordering::Equal)
}

/// Lower-case one string.
///
/// This is per-codepoint lower casing, not full Unicode case folding:
/// strings such as "ß" and "SS" do not compare equal.
#[must_use]
pub fn casefold(input: &str) -> String {
    if input.is_ascii() {
        return input.to_ascii_lowercase();
    }

    input.to_lowercase()
}

/// Match `needle` against `haystack` at the given anchor.
#[must_use]
pub fn text_matches(haystack: &str, needle: &str, anchor: LikeAnchor) -> bool {
    match anchor {
        LikeAnchor::Prefix => haystack.starts_with(needle),
        LikeAnchor::Suffix => haystack.ends_with(needle),
        LikeAnchor::Infix => haystack.contains(needle),
    }
}
