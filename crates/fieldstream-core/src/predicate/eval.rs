use crate::{
    compile::{CompileError, LikeAnchor},
    predicate::{
        Inclusion, Predicate, PredicateKind,
        operand::{self, Checked},
    },
    value::{Value, casefold, compare_values, text_matches, values_equal},
};
use std::cmp::Ordering;

/// Evaluate one predicate against one entity, in the entity value domain.
///
/// A null attribute matches only IS_NULL, ALWAYS_TRUE and NOT_IN.
pub(crate) fn eval_predicate<E>(
    predicate: &Predicate<E>,
    entity: &E,
) -> Result<bool, CompileError> {
    let kind = predicate.kind();
    let checked = operand::check(kind, predicate.attribute(), predicate.operands())?;
    let value = predicate.field().read(entity);

    let matched = match (kind, &checked) {
        (PredicateKind::AlwaysTrue, _) => true,
        (PredicateKind::AlwaysFalse, _) => false,
        (PredicateKind::IsNull, _) => value.is_null(),
        (PredicateKind::IsNotNull, _) => !value.is_null(),
        (PredicateKind::NotIn, Checked::Set(items)) => value.is_null() || !contains(items, &value),
        _ if value.is_null() => false,
        _ => eval_non_null(kind, &checked, &value, predicate.inclusion()),
    };

    Ok(matched)
}

fn eval_non_null(
    kind: PredicateKind,
    checked: &Checked,
    value: &Value,
    inclusion: Inclusion,
) -> bool {
    let ordering = |op: &Value| compare_values(value, op);

    match (kind, checked) {
        (PredicateKind::Equal, Checked::One(op)) => values_equal(value, op) == Some(true),
        (PredicateKind::NotEqual, Checked::One(op)) => values_equal(value, op) == Some(false),

        (PredicateKind::LessThan, Checked::One(op)) => ordering(op) == Some(Ordering::Less),
        (PredicateKind::LessOrEqual, Checked::One(op)) => {
            matches!(ordering(op), Some(Ordering::Less | Ordering::Equal))
        }
        (PredicateKind::GreaterThan, Checked::One(op)) => ordering(op) == Some(Ordering::Greater),
        (PredicateKind::GreaterOrEqual, Checked::One(op)) => {
            matches!(ordering(op), Some(Ordering::Greater | Ordering::Equal))
        }

        (PredicateKind::Between, Checked::Range(first, second)) => {
            in_range(value, first, second, inclusion) == Some(true)
        }
        (PredicateKind::NotBetween, Checked::Range(first, second)) => {
            in_range(value, first, second, inclusion) == Some(false)
        }

        (PredicateKind::In, Checked::Set(items)) => contains(items, value),

        (PredicateKind::IsEmpty, _) => value.as_text() == Some(""),
        (PredicateKind::IsNotEmpty, _) => value.as_text().is_some_and(|text| !text.is_empty()),

        (kind, Checked::One(Value::Text(needle))) => match value.as_text() {
            Some(haystack) => eval_text(kind, haystack, needle),
            None => false,
        },

        _ => false,
    }
}

fn eval_text(kind: PredicateKind, haystack: &str, needle: &str) -> bool {
    let folded = || (casefold(haystack), casefold(needle));

    match kind {
        PredicateKind::EqualIgnoreCase => {
            let (h, n) = folded();
            h == n
        }
        PredicateKind::NotEqualIgnoreCase => {
            let (h, n) = folded();
            h != n
        }
        PredicateKind::StartsWith => text_matches(haystack, needle, LikeAnchor::Prefix),
        PredicateKind::NotStartsWith => !text_matches(haystack, needle, LikeAnchor::Prefix),
        PredicateKind::EndsWith => text_matches(haystack, needle, LikeAnchor::Suffix),
        PredicateKind::NotEndsWith => !text_matches(haystack, needle, LikeAnchor::Suffix),
        PredicateKind::Contains => text_matches(haystack, needle, LikeAnchor::Infix),
        PredicateKind::NotContains => !text_matches(haystack, needle, LikeAnchor::Infix),
        PredicateKind::StartsWithIgnoreCase => {
            let (h, n) = folded();
            text_matches(&h, &n, LikeAnchor::Prefix)
        }
        PredicateKind::NotStartsWithIgnoreCase => {
            let (h, n) = folded();
            !text_matches(&h, &n, LikeAnchor::Prefix)
        }
        PredicateKind::EndsWithIgnoreCase => {
            let (h, n) = folded();
            text_matches(&h, &n, LikeAnchor::Suffix)
        }
        PredicateKind::NotEndsWithIgnoreCase => {
            let (h, n) = folded();
            !text_matches(&h, &n, LikeAnchor::Suffix)
        }
        PredicateKind::ContainsIgnoreCase => {
            let (h, n) = folded();
            text_matches(&h, &n, LikeAnchor::Infix)
        }
        PredicateKind::NotContainsIgnoreCase => {
            let (h, n) = folded();
            !text_matches(&h, &n, LikeAnchor::Infix)
        }
        _ => false,
    }
}

/// Whether `value` lies inside `[first, second]` under `inclusion`.
/// `None` when the value is not ordered against either bound.
fn in_range(
    value: &Value,
    first: &Value,
    second: &Value,
    inclusion: Inclusion,
) -> Option<bool> {
    let lower = compare_values(value, first)?;
    let upper = compare_values(value, second)?;

    let above = if inclusion.is_start_inclusive() {
        lower != Ordering::Less
    } else {
        lower == Ordering::Greater
    };
    let below = if inclusion.is_end_inclusive() {
        upper != Ordering::Greater
    } else {
        upper == Ordering::Less
    };

    Some(above && below)
}

fn contains(items: &[Value], value: &Value) -> bool {
    items
        .iter()
        .any(|item| values_equal(value, item) == Some(true))
}
