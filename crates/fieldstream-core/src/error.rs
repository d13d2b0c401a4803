use crate::{
    compile::{CompileError, PolicyError},
    pipeline::ConstructionError,
};
use serde::Serialize;
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Top-level error for callers that surface query-definition failures
/// without caring which boundary raised them.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum Error {
    #[error(transparent)]
    CompileError(#[from] CompileError),

    #[error(transparent)]
    ConstructionError(#[from] ConstructionError),

    #[error(transparent)]
    PolicyError(#[from] PolicyError),
}

impl Error {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::CompileError(err) => err.class(),
            Self::ConstructionError(_) => ErrorClass::Construction,
            Self::PolicyError(_) => ErrorClass::Configuration,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}: {self}", self.class())
    }
}

///
/// ErrorClass
///
/// Stable classification of every failure this crate raises.
/// None of them are retryable.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum ErrorClass {
    Configuration,
    Construction,
    IllegalOperands,
    InvalidOperand,
    Unresolved,
    Unsupported,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Configuration => "configuration",
            Self::Construction => "construction",
            Self::IllegalOperands => "illegal_operands",
            Self::InvalidOperand => "invalid_operand",
            Self::Unresolved => "unresolved",
            Self::Unsupported => "unsupported",
        };

        write!(f, "{label}")
    }
}
