//! ## Crate layout
//! - `core`: attributes, predicates, the predicate compiler, pipelines.
//!
//! Most callers only need the `prelude`: bind attributes with
//! `AttributeRef`, build predicates from them, and compile them with
//! `compile::compile_predicate` against a `NativeBuilder`.

pub use fieldstream_core as core;

pub use crate::core::{Error, ErrorClass, compile, native, pipeline};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        compile::{CompileContext, CompilePolicy, NativeBuilder, PathResolver, compile_predicate},
        prelude::*,
    };
}
