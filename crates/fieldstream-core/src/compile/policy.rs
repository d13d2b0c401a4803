//! Compile-time policy knobs carried by `CompileContext`.
//!
//! Policies pick between documented emission variants; they never relax
//! operand contracts.

use crate::compile::PolicyError;
use serde::{Deserialize, Serialize};

///
/// NotInSemantics
///
/// Complement       → NOT_IN(S) matches exactly the rows IN(S) rejects,
///                    null attribute values included
/// BackendNegation  → plain negated membership; the backend's null
///                    handling applies
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotInSemantics {
    #[default]
    Complement,
    BackendNegation,
}

///
/// CompilePolicy
///
/// Parsed documents go through the same checks as `with_like_escape`.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "PolicyDocument")]
pub struct CompilePolicy {
    not_in: NotInSemantics,
    like_escape: char,
}

impl CompilePolicy {
    pub const DEFAULT_LIKE_ESCAPE: char = '\\';

    #[must_use]
    pub const fn new() -> Self {
        Self {
            not_in: NotInSemantics::Complement,
            like_escape: Self::DEFAULT_LIKE_ESCAPE,
        }
    }

    #[must_use]
    pub const fn with_not_in(mut self, not_in: NotInSemantics) -> Self {
        self.not_in = not_in;
        self
    }

    /// Set the LIKE escape character; `%` and `_` are rejected.
    pub const fn with_like_escape(mut self, escape: char) -> Result<Self, PolicyError> {
        if matches!(escape, '%' | '_') {
            return Err(PolicyError::WildcardEscape { escape });
        }
        self.like_escape = escape;

        Ok(self)
    }

    #[must_use]
    pub const fn not_in(&self) -> NotInSemantics {
        self.not_in
    }

    #[must_use]
    pub const fn like_escape(&self) -> char {
        self.like_escape
    }
}

impl Default for CompilePolicy {
    fn default() -> Self {
        Self::new()
    }
}

///
/// PolicyDocument
///
/// Unchecked wire form of `CompilePolicy`; missing keys take defaults.
///

#[derive(Deserialize)]
#[serde(default)]
struct PolicyDocument {
    not_in: NotInSemantics,
    like_escape: char,
}

impl Default for PolicyDocument {
    fn default() -> Self {
        let policy = CompilePolicy::new();

        Self {
            not_in: policy.not_in,
            like_escape: policy.like_escape,
        }
    }
}

impl TryFrom<PolicyDocument> for CompilePolicy {
    type Error = PolicyError;

    fn try_from(document: PolicyDocument) -> Result<Self, Self::Error> {
        Self::new()
            .with_not_in(document.not_in)
            .with_like_escape(document.like_escape)
    }
}
