//! Module: pipeline
//! Responsibility: immutable, inspectable intermediate stream operations and a
//! typed builder that executes them in memory.
//! Does not own: predicate semantics, which `filter_by` borrows from `predicate`.
//! Boundary: every step is validated on creation; a frozen pipeline never fails.

mod error;
mod factory;
mod operation;
mod sequence;
mod typed;


pub use error::ConstructionError;
pub use factory::OperationFactory;
pub use operation::{Callable, Capability, CapabilityClass, Operation, OperationKind, StreamShape};
pub use sequence::{ExplainStep, FrozenOperations, OperationSequence, PipelineExplain};
pub use typed::{FrozenPipeline, Pipeline};
