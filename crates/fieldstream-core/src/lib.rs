//! Core of fieldstream: mapped attributes, typed field predicates, the
//! predicate compiler, a reference native backend, and inspectable stream
//! pipelines. Common vocabulary is exported via the `prelude`.

// public exports are one module level down
pub mod compile;
pub mod error;
pub mod model;
pub mod native;
pub mod pipeline;
pub mod predicate;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

pub use error::{Error, ErrorClass};

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No backends, trace sinks, or policies are re-exported here.
///

pub mod prelude {
    pub use crate::{
        model::{AttributeRef, Field, FieldComparator, NullOrder},
        pipeline::{FrozenPipeline, Pipeline},
        predicate::{Inclusion, Predicate, PredicateKind},
        value::Value,
    };
}
