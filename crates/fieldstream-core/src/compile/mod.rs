//! Module: compile
//! Responsibility: lossless translation of one predicate into a backend-native node.
//! Does not own: operand contracts (`predicate::operand`) or backend semantics.
//! Boundary: callers hand in a `CompileContext`; nothing here performs I/O.

mod context;
mod error;
mod policy;
mod trace;


use crate::{
    model::Attribute,
    predicate::{Inclusion, Predicate, PredicateKind, operand},
    value::{Value, casefold},
};

// re-exports
pub use context::{CompareOp, CompileContext, LikeAnchor, LikePattern, NativeBuilder, PathResolver};
pub use error::{CompileError, PolicyError};
pub use policy::{CompilePolicy, NotInSemantics};
pub use trace::{CompileTraceEvent, CompileTraceSink};

/// Compile one predicate into a backend-native node.
///
/// Compilation is all-or-nothing: on error no node is produced and the
/// builder may only have been used for discarded intermediate expressions.
pub fn compile_predicate<B: NativeBuilder, E>(
    ctx: &mut CompileContext<'_, B>,
    predicate: &Predicate<E>,
) -> Result<B::Node, CompileError> {
    let scope = trace::start_compile_trace(ctx.trace, predicate.kind(), predicate.attribute());

    match compile_checked(ctx, predicate) {
        Ok((node, strategy)) => {
            if let Some(scope) = scope {
                scope.finish(strategy);
            }
            Ok(node)
        }
        Err(err) => {
            if let Some(scope) = scope {
                scope.error(err.class());
            }
            Err(err)
        }
    }
}

fn compile_checked<B: NativeBuilder, E>(
    ctx: &mut CompileContext<'_, B>,
    predicate: &Predicate<E>,
) -> Result<(B::Node, &'static str), CompileError> {
    let kind = predicate.kind();
    let attribute = predicate.attribute();

    let checked = operand::check(kind, attribute, predicate.operands())?;
    let strategy = checked.strategy();
    let path = ctx.resolver.resolve(ctx.builder, attribute)?;

    let not_in = ctx.policy.not_in();
    let mut emitter = Emitter {
        builder: &mut *ctx.builder,
        attribute,
        kind,
        escape: ctx.policy.like_escape(),
    };

    let node = match kind {
        PredicateKind::AlwaysTrue => {
            checked.into_none(kind)?;
            emitter.constant(true)
        }
        PredicateKind::AlwaysFalse => {
            checked.into_none(kind)?;
            emitter.constant(false)
        }
        PredicateKind::IsNull => {
            checked.into_none(kind)?;
            emitter.builder.is_null(path)
        }
        PredicateKind::IsNotNull => {
            checked.into_none(kind)?;
            emitter.builder.is_not_null(path)
        }
        PredicateKind::IsEmpty => {
            checked.into_none(kind)?;
            emitter.compare_raw(path, CompareOp::Eq, Value::Text(String::new()))
        }
        PredicateKind::IsNotEmpty => {
            checked.into_none(kind)?;
            emitter.compare_raw(path, CompareOp::Ne, Value::Text(String::new()))
        }

        PredicateKind::Equal => emitter.compare(path, CompareOp::Eq, checked.into_one(kind)?)?,
        PredicateKind::NotEqual => {
            emitter.compare(path, CompareOp::Ne, checked.into_one(kind)?)?
        }
        PredicateKind::LessThan => {
            emitter.compare_ordered(path, CompareOp::Lt, checked.into_one(kind)?)?
        }
        PredicateKind::LessOrEqual => {
            emitter.compare_ordered(path, CompareOp::Le, checked.into_one(kind)?)?
        }
        PredicateKind::GreaterThan => {
            emitter.compare_ordered(path, CompareOp::Gt, checked.into_one(kind)?)?
        }
        PredicateKind::GreaterOrEqual => {
            emitter.compare_ordered(path, CompareOp::Ge, checked.into_one(kind)?)?
        }

        PredicateKind::Between => {
            let (first, second) = checked.into_range(kind)?;
            emitter.between(path, first, second, predicate.inclusion())?
        }
        PredicateKind::NotBetween => {
            let (first, second) = checked.into_range(kind)?;
            emitter.not_between(path, first, second, predicate.inclusion())?
        }

        PredicateKind::In => emitter.in_set(path, checked.into_set(kind)?)?,
        PredicateKind::NotIn => {
            let items = checked.into_set(kind)?;
            match not_in {
                NotInSemantics::Complement => emitter.not_in_complement(path, items)?,
                NotInSemantics::BackendNegation => emitter.not_in_negated(path, items)?,
            }
        }

        PredicateKind::EqualIgnoreCase => {
            emitter.compare_ignore_case(path, CompareOp::Eq, checked.into_one(kind)?)?
        }
        PredicateKind::NotEqualIgnoreCase => {
            emitter.compare_ignore_case(path, CompareOp::Ne, checked.into_one(kind)?)?
        }

        PredicateKind::StartsWith => {
            let value = checked.into_one(kind)?;
            emitter.like(path, LikeAnchor::Prefix, value, Case::Sensitive, false)?
        }
        PredicateKind::NotStartsWith => {
            let value = checked.into_one(kind)?;
            emitter.like(path, LikeAnchor::Prefix, value, Case::Sensitive, true)?
        }
        PredicateKind::StartsWithIgnoreCase => {
            let value = checked.into_one(kind)?;
            emitter.like(path, LikeAnchor::Prefix, value, Case::Insensitive, false)?
        }
        PredicateKind::NotStartsWithIgnoreCase => {
            let value = checked.into_one(kind)?;
            emitter.like(path, LikeAnchor::Prefix, value, Case::Insensitive, true)?
        }
        PredicateKind::EndsWith => {
            let value = checked.into_one(kind)?;
            emitter.like(path, LikeAnchor::Suffix, value, Case::Sensitive, false)?
        }
        PredicateKind::NotEndsWith => {
            let value = checked.into_one(kind)?;
            emitter.like(path, LikeAnchor::Suffix, value, Case::Sensitive, true)?
        }
        PredicateKind::EndsWithIgnoreCase => {
            let value = checked.into_one(kind)?;
            emitter.like(path, LikeAnchor::Suffix, value, Case::Insensitive, false)?
        }
        PredicateKind::NotEndsWithIgnoreCase => {
            let value = checked.into_one(kind)?;
            emitter.like(path, LikeAnchor::Suffix, value, Case::Insensitive, true)?
        }
        PredicateKind::Contains => {
            let value = checked.into_one(kind)?;
            emitter.like(path, LikeAnchor::Infix, value, Case::Sensitive, false)?
        }
        PredicateKind::NotContains => {
            let value = checked.into_one(kind)?;
            emitter.like(path, LikeAnchor::Infix, value, Case::Sensitive, true)?
        }
        PredicateKind::ContainsIgnoreCase => {
            let value = checked.into_one(kind)?;
            emitter.like(path, LikeAnchor::Infix, value, Case::Insensitive, false)?
        }
        PredicateKind::NotContainsIgnoreCase => {
            let value = checked.into_one(kind)?;
            emitter.like(path, LikeAnchor::Infix, value, Case::Insensitive, true)?
        }
    };

    Ok((node, strategy))
}

///
/// Case
///

#[derive(Clone, Copy)]
enum Case {
    Sensitive,
    Insensitive,
}

///
/// Emitter
///
/// Per-call emission helpers. Every literal passes through the attribute's
/// converter before it reaches the builder.
///

struct Emitter<'b, B: NativeBuilder> {
    builder: &'b mut B,
    attribute: &'b Attribute,
    kind: PredicateKind,
    escape: char,
}

impl<B: NativeBuilder> Emitter<'_, B> {
    fn store(&self, value: Value) -> Result<Value, CompileError> {
        operand::to_store(self.kind, self.attribute, value)
    }

    fn literal(&mut self, value: Value) -> Result<B::Expr, CompileError> {
        let value = self.store(value)?;

        Ok(self.builder.literal(value))
    }

    fn compare(
        &mut self,
        path: B::Expr,
        op: CompareOp,
        value: Value,
    ) -> Result<B::Node, CompileError> {
        let literal = self.literal(value)?;

        Ok(self.builder.compare(path, op, literal))
    }

    /// Ordering literal: converted first, then a character is widened to
    /// its code point.
    fn compare_ordered(
        &mut self,
        path: B::Expr,
        op: CompareOp,
        value: Value,
    ) -> Result<B::Node, CompileError> {
        let stored = self.store(value)?.widen_char();
        let literal = self.builder.literal(stored);

        Ok(self.builder.compare(path, op, literal))
    }

    // Literal emitted as-is; used for the fixed empty-string operand.
    fn compare_raw(&mut self, path: B::Expr, op: CompareOp, value: Value) -> B::Node {
        let literal = self.builder.literal(value);

        self.builder.compare(path, op, literal)
    }

    fn between(
        &mut self,
        path: B::Expr,
        first: Value,
        second: Value,
        inclusion: Inclusion,
    ) -> Result<B::Node, CompileError> {
        let (lower_op, upper_op) = match inclusion {
            Inclusion::StartExclusiveEndExclusive => (CompareOp::Gt, CompareOp::Lt),
            Inclusion::StartInclusiveEndExclusive => (CompareOp::Ge, CompareOp::Lt),
            Inclusion::StartExclusiveEndInclusive => (CompareOp::Gt, CompareOp::Le),
            Inclusion::StartInclusiveEndInclusive => (CompareOp::Ge, CompareOp::Le),
        };

        let lower = self.compare(path.clone(), lower_op, first)?;
        let upper = self.compare(path, upper_op, second)?;

        Ok(self.builder.and(lower, upper))
    }

    fn not_between(
        &mut self,
        path: B::Expr,
        first: Value,
        second: Value,
        inclusion: Inclusion,
    ) -> Result<B::Node, CompileError> {
        let (lower_op, upper_op) = match inclusion {
            Inclusion::StartExclusiveEndExclusive => (CompareOp::Le, CompareOp::Ge),
            Inclusion::StartInclusiveEndExclusive => (CompareOp::Lt, CompareOp::Ge),
            Inclusion::StartExclusiveEndInclusive => (CompareOp::Le, CompareOp::Gt),
            Inclusion::StartInclusiveEndInclusive => (CompareOp::Lt, CompareOp::Gt),
        };

        let below = self.compare(path.clone(), lower_op, first)?;
        let above = self.compare(path, upper_op, second)?;

        Ok(self.builder.or(below, above))
    }

    fn stored_set(&self, items: Vec<Value>) -> Result<Vec<Value>, CompileError> {
        items.into_iter().map(|item| self.store(item)).collect()
    }

    fn constant(&mut self, truth: bool) -> B::Node {
        let literal = self.builder.literal(Value::Bool(true));

        if truth {
            self.builder.is_true(literal)
        } else {
            self.builder.is_false(literal)
        }
    }

    fn in_set(&mut self, path: B::Expr, items: Vec<Value>) -> Result<B::Node, CompileError> {
        if items.is_empty() {
            return Ok(self.constant(false));
        }
        let values = self.stored_set(items)?;

        Ok(self.builder.in_list(path, values))
    }

    fn not_in_negated(
        &mut self,
        path: B::Expr,
        items: Vec<Value>,
    ) -> Result<B::Node, CompileError> {
        let membership = self.in_set(path, items)?;

        Ok(self.builder.not(membership))
    }

    fn not_in_complement(
        &mut self,
        path: B::Expr,
        items: Vec<Value>,
    ) -> Result<B::Node, CompileError> {
        if items.is_empty() {
            return Ok(self.constant(true));
        }

        let null = self.builder.is_null(path.clone());
        let outside = self.not_in_negated(path, items)?;

        Ok(self.builder.or(null, outside))
    }

    fn folded_text(&self, value: Value, case: Case) -> Result<String, CompileError> {
        let stored = self.store(value)?;
        let text = stored.as_text().unwrap_or_default();

        Ok(match case {
            Case::Sensitive => text.to_string(),
            Case::Insensitive => casefold(text),
        })
    }

    fn compare_ignore_case(
        &mut self,
        path: B::Expr,
        op: CompareOp,
        value: Value,
    ) -> Result<B::Node, CompileError> {
        let folded = self.folded_text(value, Case::Insensitive)?;
        let lowered = self.builder.lower(path);
        let literal = self.builder.literal(Value::Text(folded));

        Ok(self.builder.compare(lowered, op, literal))
    }

    fn like(
        &mut self,
        path: B::Expr,
        anchor: LikeAnchor,
        value: Value,
        case: Case,
        negated: bool,
    ) -> Result<B::Node, CompileError> {
        let needle = self.folded_text(value, case)?;
        let pattern = LikePattern::new(anchor, needle, self.escape);
        let target = match case {
            Case::Sensitive => path,
            Case::Insensitive => self.builder.lower(path),
        };

        Ok(if negated {
            self.builder.not_like(target, &pattern)
        } else {
            self.builder.like(target, &pattern)
        })
    }
}
