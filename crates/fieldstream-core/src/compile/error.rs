use crate::{
    error::ErrorClass,
    predicate::{OperandContract, PredicateKind},
};
use thiserror::Error as ThisError;

///
/// CompileError
///
/// Failures while checking or compiling one predicate.
/// All are fatal; no partial node is ever returned.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CompileError {
    #[error("predicate kind '{kind}' is not supported")]
    UnsupportedPredicateKind { kind: String },

    #[error("{kind} on '{attribute}' expects {expected}, found {found}")]
    InvalidOperandType {
        kind: PredicateKind,
        attribute: String,
        expected: OperandContract,
        found: String,
    },

    #[error(
        "{kind} on '{attribute}' has bounds that are not mutually ordered: {first} and {second}"
    )]
    IllegalComparisonOperands {
        kind: PredicateKind,
        attribute: String,
        first: String,
        second: String,
    },

    #[error("attribute '{attribute}' cannot be resolved to a backend path")]
    UnresolvedAttribute { attribute: String },
}

impl CompileError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::UnsupportedPredicateKind { .. } => ErrorClass::Unsupported,
            Self::InvalidOperandType { .. } => ErrorClass::InvalidOperand,
            Self::IllegalComparisonOperands { .. } => ErrorClass::IllegalOperands,
            Self::UnresolvedAttribute { .. } => ErrorClass::Unresolved,
        }
    }
}

///
/// PolicyError
///
/// Rejected compile policy values, raised when the policy is built or parsed.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PolicyError {
    #[error("like escape {escape:?} is itself a LIKE wildcard")]
    WildcardEscape { escape: char },
}
