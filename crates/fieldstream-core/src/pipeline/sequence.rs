use crate::pipeline::{CapabilityClass, ConstructionError, Operation, OperationKind, StreamShape};
use derive_more::{Deref, IntoIterator};
use serde::Serialize;
use std::sync::Arc;

///
/// OperationSequence
///
/// Append-only, planner-facing list of operations.
/// Each appended step must consume the shape the previous step produced.
///

#[derive(Clone, Debug, Default, IntoIterator)]
pub struct OperationSequence {
    source: StreamShape,
    #[into_iterator(owned, ref)]
    operations: Vec<Operation>,
}

impl OperationSequence {
    #[must_use]
    pub const fn new(source: StreamShape) -> Self {
        Self {
            source,
            operations: Vec::new(),
        }
    }

    #[must_use]
    pub const fn source(&self) -> StreamShape {
        self.source
    }

    /// Shape produced by the last step, or the source shape when empty.
    #[must_use]
    pub fn output(&self) -> StreamShape {
        self.operations
            .last()
            .map_or(self.source, Operation::output)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.operations.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.operations.iter()
    }

    /// Append one step, rejecting shape discontinuities.
    pub fn push(&mut self, operation: Operation) -> Result<(), ConstructionError> {
        let expected = self.output();
        if operation.input() != expected {
            return Err(ConstructionError::ShapeMismatch {
                index: self.operations.len(),
                expected,
                found: operation.input(),
            });
        }

        self.operations.push(operation);

        Ok(())
    }

    #[must_use]
    pub fn freeze(self) -> FrozenOperations {
        FrozenOperations {
            source: self.source,
            operations: self.operations.into(),
        }
    }
}

///
/// FrozenOperations
///
/// Immutable, cheaply clonable operation list. Derefs to `[Operation]`.
///

#[derive(Clone, Debug, Deref)]
pub struct FrozenOperations {
    source: StreamShape,
    #[deref(forward)]
    operations: Arc<[Operation]>,
}

impl FrozenOperations {
    #[must_use]
    pub const fn source(&self) -> StreamShape {
        self.source
    }

    #[must_use]
    pub fn output(&self) -> StreamShape {
        self.operations
            .last()
            .map_or(self.source, Operation::output)
    }

    #[must_use]
    pub fn explain(&self) -> PipelineExplain {
        let steps = self
            .operations
            .iter()
            .enumerate()
            .map(|(index, operation)| ExplainStep::from_operation(index, operation))
            .collect();

        PipelineExplain {
            source: self.source,
            output: self.output(),
            short_circuiting: self
                .operations
                .iter()
                .any(|operation| operation.kind().is_short_circuiting()),
            steps,
        }
    }
}

///
/// PipelineExplain
///
/// Serializable description of a frozen pipeline for planners and logs.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PipelineExplain {
    pub source: StreamShape,
    pub output: StreamShape,
    pub short_circuiting: bool,
    pub steps: Vec<ExplainStep>,
}

///
/// ExplainStep
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ExplainStep {
    pub index: usize,
    pub kind: OperationKind,
    pub input: StreamShape,
    pub output: StreamShape,
    pub capability: CapabilityClass,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callable: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

impl ExplainStep {
    fn from_operation(index: usize, operation: &Operation) -> Self {
        let capability = operation.capability();

        Self {
            index,
            kind: operation.kind(),
            input: operation.input(),
            output: operation.output(),
            capability: capability.class(),
            callable: capability.callable().map(|callable| callable.type_name()),
            count: operation.count(),
        }
    }
}
