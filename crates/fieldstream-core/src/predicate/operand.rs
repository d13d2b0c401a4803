//! Module: predicate::operand
//! Responsibility: enforce per-kind operand contracts and normalize operands.
//! Does not own: backend emission or in-memory matching.
//! Boundary: `Predicate::validate`, the compiler and the evaluator all enter here.

use crate::{
    compile::CompileError,
    model::Attribute,
    predicate::{OperandContract, Operands, PredicateKind},
    value::{CoercionFamily, Value, compare_values},
};

///
/// Checked
///
/// Operands that satisfied their kind's contract, still in the entity
/// value domain. Character widening happens after conversion, at emission.
///

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Checked {
    None,
    One(Value),
    Range(Value, Value),
    Set(Vec<Value>),
}

impl Checked {
    /// Strategy label for trace events.
    pub(crate) const fn strategy(&self) -> &'static str {
        match self {
            Self::None => "zero_operand",
            Self::One(_) => "single_operand",
            Self::Range(..) => "dual_bound_range",
            Self::Set(_) => "set_membership",
        }
    }

    // Shape accessors. `check` pairs every kind with exactly one shape, so a
    // mismatch here means the kind table and the contracts disagree.

    pub(crate) fn into_none(self, kind: PredicateKind) -> Result<(), CompileError> {
        match self {
            Self::None => Ok(()),
            _ => Err(shape_mismatch(kind)),
        }
    }

    pub(crate) fn into_one(self, kind: PredicateKind) -> Result<Value, CompileError> {
        match self {
            Self::One(value) => Ok(value),
            _ => Err(shape_mismatch(kind)),
        }
    }

    pub(crate) fn into_range(self, kind: PredicateKind) -> Result<(Value, Value), CompileError> {
        match self {
            Self::Range(first, second) => Ok((first, second)),
            _ => Err(shape_mismatch(kind)),
        }
    }

    pub(crate) fn into_set(self, kind: PredicateKind) -> Result<Vec<Value>, CompileError> {
        match self {
            Self::Set(items) => Ok(items),
            _ => Err(shape_mismatch(kind)),
        }
    }
}

fn shape_mismatch(kind: PredicateKind) -> CompileError {
    CompileError::UnsupportedPredicateKind {
        kind: kind.name().to_string(),
    }
}

/// Check `operands` against the contract of `kind` for `attribute`.
pub(crate) fn check(
    kind: PredicateKind,
    attribute: &Attribute,
    operands: &Operands,
) -> Result<Checked, CompileError> {
    let contract = kind.contract();
    let invalid = || invalid_operand(kind, attribute, contract, operands.type_string());

    match (contract, operands) {
        (OperandContract::None, Operands::None) => {
            let needs_text = matches!(kind, PredicateKind::IsEmpty | PredicateKind::IsNotEmpty);
            if needs_text && attribute.kind().family() != CoercionFamily::Textual {
                return Err(invalid());
            }

            Ok(Checked::None)
        }

        (OperandContract::Scalar, Operands::One(value)) => {
            if value.is_scalar() && same_family(attribute, value) {
                Ok(Checked::One(value.clone()))
            } else {
                Err(invalid())
            }
        }

        (OperandContract::Ordered, Operands::One(value)) => {
            if value.is_scalar() && value.kind().is_orderable() && same_family(attribute, value) {
                Ok(Checked::One(value.clone()))
            } else {
                Err(invalid())
            }
        }

        (OperandContract::Text, Operands::One(value)) => {
            if attribute.kind().family() == CoercionFamily::Textual
                && value.as_text().is_some()
            {
                Ok(Checked::One(value.clone()))
            } else {
                Err(invalid())
            }
        }

        (OperandContract::Range, Operands::Two(first, second)) => {
            check_range(kind, attribute, first, second, invalid)
        }

        (OperandContract::Set, Operands::One(Value::List(items))) => {
            if items
                .iter()
                .all(|item| item.is_scalar() && same_family(attribute, item))
            {
                Ok(Checked::Set(items.clone()))
            } else {
                Err(invalid())
            }
        }

        _ => Err(invalid()),
    }
}

// Bounds are checked individually, then against each other, then against
// the attribute; mutual order failures take precedence over family ones.
fn check_range(
    kind: PredicateKind,
    attribute: &Attribute,
    first: &Value,
    second: &Value,
    invalid: impl Fn() -> CompileError,
) -> Result<Checked, CompileError> {
    let orderable = |value: &Value| value.is_scalar() && value.kind().is_orderable();
    if !orderable(first) || !orderable(second) {
        return Err(invalid());
    }

    if compare_values(first, second).is_none() {
        return Err(CompileError::IllegalComparisonOperands {
            kind,
            attribute: attribute.qualified_name(),
            first: first.type_string(),
            second: second.type_string(),
        });
    }

    if !same_family(attribute, first) {
        return Err(invalid());
    }

    Ok(Checked::Range(first.clone(), second.clone()))
}

/// Map one checked literal into the store domain.
/// Text contracts require the converted literal to stay text.
pub(crate) fn to_store(
    kind: PredicateKind,
    attribute: &Attribute,
    value: Value,
) -> Result<Value, CompileError> {
    let converted = attribute.to_store(value);

    if kind.contract() == OperandContract::Text && converted.as_text().is_none() {
        return Err(invalid_operand(
            kind,
            attribute,
            OperandContract::Text,
            format!("{} after conversion", converted.type_string()),
        ));
    }

    Ok(converted)
}

fn same_family(attribute: &Attribute, value: &Value) -> bool {
    attribute.kind().family() == value.family()
}

fn invalid_operand(
    kind: PredicateKind,
    attribute: &Attribute,
    expected: OperandContract,
    found: String,
) -> CompileError {
    CompileError::InvalidOperandType {
        kind,
        attribute: attribute.qualified_name(),
        expected,
        found,
    }
}
