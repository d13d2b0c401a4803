use crate::{
    compile::{CompileError, CompilePolicy, CompileTraceSink},
    model::Attribute,
    value::Value,
};
use serde::Serialize;
use std::fmt;

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

///
/// LikeAnchor
///
/// Prefix → `needle%`
/// Suffix → `%needle`
/// Infix  → `%needle%`
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum LikeAnchor {
    Prefix,
    Suffix,
    Infix,
}

///
/// LikePattern
///
/// Structured LIKE pattern. The needle is literal text; wildcards are
/// only introduced by `render`, which escapes the needle first.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct LikePattern {
    pub anchor: LikeAnchor,
    pub needle: String,
    pub escape: char,
}

impl LikePattern {
    #[must_use]
    pub fn new(anchor: LikeAnchor, needle: impl Into<String>, escape: char) -> Self {
        Self {
            anchor,
            needle: needle.into(),
            escape,
        }
    }

    /// SQL LIKE rendering, to be paired with `ESCAPE '<escape>'`.
    #[must_use]
    pub fn render(&self) -> String {
        let mut escaped = String::with_capacity(self.needle.len() + 2);
        for c in self.needle.chars() {
            if c == '%' || c == '_' || c == self.escape {
                escaped.push(self.escape);
            }
            escaped.push(c);
        }

        match self.anchor {
            LikeAnchor::Prefix => format!("{escaped}%"),
            LikeAnchor::Suffix => format!("%{escaped}"),
            LikeAnchor::Infix => format!("%{escaped}%"),
        }
    }
}

///
/// NativeBuilder
///
/// Backend-native expression and predicate constructors.
/// Builders may hold mutable state (parameter slots, aliases); the compiler
/// only ever borrows one for the duration of a single call.
///

pub trait NativeBuilder {
    type Expr: Clone;
    type Node;

    fn literal(&mut self, value: Value) -> Self::Expr;

    fn lower(&mut self, expr: Self::Expr) -> Self::Expr;

    fn is_true(&mut self, expr: Self::Expr) -> Self::Node;

    fn is_false(&mut self, expr: Self::Expr) -> Self::Node;

    fn is_null(&mut self, expr: Self::Expr) -> Self::Node;

    fn is_not_null(&mut self, expr: Self::Expr) -> Self::Node;

    fn compare(&mut self, left: Self::Expr, op: CompareOp, right: Self::Expr) -> Self::Node;

    fn like(&mut self, expr: Self::Expr, pattern: &LikePattern) -> Self::Node;

    fn not_like(&mut self, expr: Self::Expr, pattern: &LikePattern) -> Self::Node;

    fn in_list(&mut self, expr: Self::Expr, values: Vec<Value>) -> Self::Node;

    fn and(&mut self, left: Self::Node, right: Self::Node) -> Self::Node;

    fn or(&mut self, left: Self::Node, right: Self::Node) -> Self::Node;

    fn not(&mut self, node: Self::Node) -> Self::Node;
}

///
/// PathResolver
///
/// Maps an attribute to the backend path expression it is stored under.
///

pub trait PathResolver<B: NativeBuilder> {
    fn resolve(&self, builder: &mut B, attribute: &Attribute) -> Result<B::Expr, CompileError>;
}

///
/// CompileContext
///
/// Everything one compilation borrows from the caller.
///

pub struct CompileContext<'a, B: NativeBuilder> {
    pub(crate) builder: &'a mut B,
    pub(crate) resolver: &'a dyn PathResolver<B>,
    pub(crate) policy: CompilePolicy,
    pub(crate) trace: Option<&'a dyn CompileTraceSink>,
}

impl<'a, B: NativeBuilder> CompileContext<'a, B> {
    pub fn new(builder: &'a mut B, resolver: &'a dyn PathResolver<B>) -> Self {
        Self {
            builder,
            resolver,
            policy: CompilePolicy::default(),
            trace: None,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: CompilePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_trace(mut self, sink: &'a dyn CompileTraceSink) -> Self {
        self.trace = Some(sink);
        self
    }

    #[must_use]
    pub const fn policy(&self) -> &CompilePolicy {
        &self.policy
    }
}
