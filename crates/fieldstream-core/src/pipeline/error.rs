use crate::pipeline::{CapabilityClass, OperationKind, StreamShape};
use thiserror::Error as ThisError;

///
/// ConstructionError
///
/// Rejected pipeline steps. Raised eagerly when a step is created or
/// appended, never at execution time.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ConstructionError {
    #[error("{kind} argument must be non-negative, got {count}")]
    NegativeCount { kind: OperationKind, count: i64 },

    #[error("{kind} requires a {expected} capability")]
    MissingCapability {
        kind: OperationKind,
        expected: CapabilityClass,
    },

    #[error("{kind} requires a {expected} capability, found {found}")]
    CapabilityMismatch {
        kind: OperationKind,
        expected: CapabilityClass,
        found: CapabilityClass,
    },

    #[error("{kind} cannot turn {input} into {output}")]
    ShapeTransition {
        kind: OperationKind,
        input: StreamShape,
        output: StreamShape,
    },

    #[error("step {index} expects {expected} input, found {found}")]
    ShapeMismatch {
        index: usize,
        expected: StreamShape,
        found: StreamShape,
    },
}
