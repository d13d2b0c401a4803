//! Module: predicate
//! Responsibility: the typed predicate model over mapped attributes.
//! Does not own: backend emission, which lives in `compile`.
//! Boundary: typed builders on `AttributeRef` and `Predicate::new` create
//! predicates; the compiler and in-memory evaluator consume them.

mod builder;
mod eval;
mod fingerprint;
mod kind;
mod model;
pub(crate) mod operand;

#[cfg(test)]
mod tests;

pub use kind::{Inclusion, OperandContract, PredicateKind};
pub use model::{Operands, Predicate};
