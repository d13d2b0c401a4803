use crate::{
    model::AttributeRef,
    predicate::{Inclusion, Operands, Predicate, PredicateKind},
    value::{FieldValue, OrderedValue, Value},
};

// Typed predicate builders. Every method here produces operands that
// satisfy the kind's contract for the binding's declared value type.

impl<E: 'static, V: FieldValue + 'static> AttributeRef<E, V> {
    fn predicate(&'static self, kind: PredicateKind, operands: Operands) -> Predicate<E> {
        Predicate::new(self, kind, operands)
    }

    fn single(&'static self, kind: PredicateKind, value: &V) -> Predicate<E> {
        self.predicate(kind, Operands::One(value.to_value()))
    }

    fn set<I>(&'static self, kind: PredicateKind, values: I) -> Predicate<E>
    where
        I: IntoIterator<Item = V>,
    {
        let list = values.into_iter().map(|value| value.to_value()).collect();

        self.predicate(kind, Operands::One(Value::List(list)))
    }

    // ------------------------------------------------------------------
    // Structural predicates
    // ------------------------------------------------------------------

    #[must_use]
    pub fn always_true(&'static self) -> Predicate<E> {
        self.predicate(PredicateKind::AlwaysTrue, Operands::None)
    }

    #[must_use]
    pub fn always_false(&'static self) -> Predicate<E> {
        self.predicate(PredicateKind::AlwaysFalse, Operands::None)
    }

    #[must_use]
    pub fn is_null(&'static self) -> Predicate<E> {
        self.predicate(PredicateKind::IsNull, Operands::None)
    }

    #[must_use]
    pub fn is_not_null(&'static self) -> Predicate<E> {
        self.predicate(PredicateKind::IsNotNull, Operands::None)
    }

    // ------------------------------------------------------------------
    // Equality and membership
    // ------------------------------------------------------------------

    #[must_use]
    pub fn equal(&'static self, value: V) -> Predicate<E> {
        self.single(PredicateKind::Equal, &value)
    }

    #[must_use]
    pub fn not_equal(&'static self, value: V) -> Predicate<E> {
        self.single(PredicateKind::NotEqual, &value)
    }

    /// Membership in a fixed set. An empty set matches nothing.
    #[must_use]
    pub fn in_set<I>(&'static self, values: I) -> Predicate<E>
    where
        I: IntoIterator<Item = V>,
    {
        self.set(PredicateKind::In, values)
    }

    /// Rows whose attribute is not in the set, nulls included under the
    /// default compile policy.
    #[must_use]
    pub fn not_in<I>(&'static self, values: I) -> Predicate<E>
    where
        I: IntoIterator<Item = V>,
    {
        self.set(PredicateKind::NotIn, values)
    }
}

impl<E: 'static, V: OrderedValue + 'static> AttributeRef<E, V> {
    // ------------------------------------------------------------------
    // Ordering predicates
    // ------------------------------------------------------------------

    #[must_use]
    pub fn less_than(&'static self, value: V) -> Predicate<E> {
        self.single(PredicateKind::LessThan, &value)
    }

    #[must_use]
    pub fn less_or_equal(&'static self, value: V) -> Predicate<E> {
        self.single(PredicateKind::LessOrEqual, &value)
    }

    #[must_use]
    pub fn greater_than(&'static self, value: V) -> Predicate<E> {
        self.single(PredicateKind::GreaterThan, &value)
    }

    #[must_use]
    pub fn greater_or_equal(&'static self, value: V) -> Predicate<E> {
        self.single(PredicateKind::GreaterOrEqual, &value)
    }

    /// Both bounds inclusive. `first > second` is legal and matches nothing.
    #[must_use]
    pub fn between(&'static self, first: V, second: V) -> Predicate<E> {
        self.between_with(first, second, Inclusion::default())
    }

    #[must_use]
    pub fn between_with(&'static self, first: V, second: V, inclusion: Inclusion) -> Predicate<E> {
        self.range(PredicateKind::Between, &first, &second, inclusion)
    }

    #[must_use]
    pub fn not_between(&'static self, first: V, second: V) -> Predicate<E> {
        self.not_between_with(first, second, Inclusion::default())
    }

    #[must_use]
    pub fn not_between_with(
        &'static self,
        first: V,
        second: V,
        inclusion: Inclusion,
    ) -> Predicate<E> {
        self.range(PredicateKind::NotBetween, &first, &second, inclusion)
    }

    fn range(
        &'static self,
        kind: PredicateKind,
        first: &V,
        second: &V,
        inclusion: Inclusion,
    ) -> Predicate<E> {
        let operands = Operands::Two(first.to_value(), second.to_value());

        self.predicate(kind, operands).with_inclusion(inclusion)
    }
}

impl<E: 'static> AttributeRef<E, String> {
    fn text(&'static self, kind: PredicateKind, value: impl Into<String>) -> Predicate<E> {
        self.predicate(kind, Operands::One(Value::Text(value.into())))
    }

    // ------------------------------------------------------------------
    // Text predicates
    // ------------------------------------------------------------------

    /// Case-insensitive equality (per-codepoint lower casing).
    #[must_use]
    pub fn equal_ignore_case(&'static self, value: impl Into<String>) -> Predicate<E> {
        self.text(PredicateKind::EqualIgnoreCase, value)
    }

    #[must_use]
    pub fn not_equal_ignore_case(&'static self, value: impl Into<String>) -> Predicate<E> {
        self.text(PredicateKind::NotEqualIgnoreCase, value)
    }

    #[must_use]
    pub fn starts_with(&'static self, value: impl Into<String>) -> Predicate<E> {
        self.text(PredicateKind::StartsWith, value)
    }

    #[must_use]
    pub fn not_starts_with(&'static self, value: impl Into<String>) -> Predicate<E> {
        self.text(PredicateKind::NotStartsWith, value)
    }

    #[must_use]
    pub fn starts_with_ignore_case(&'static self, value: impl Into<String>) -> Predicate<E> {
        self.text(PredicateKind::StartsWithIgnoreCase, value)
    }

    #[must_use]
    pub fn not_starts_with_ignore_case(&'static self, value: impl Into<String>) -> Predicate<E> {
        self.text(PredicateKind::NotStartsWithIgnoreCase, value)
    }

    #[must_use]
    pub fn ends_with(&'static self, value: impl Into<String>) -> Predicate<E> {
        self.text(PredicateKind::EndsWith, value)
    }

    #[must_use]
    pub fn not_ends_with(&'static self, value: impl Into<String>) -> Predicate<E> {
        self.text(PredicateKind::NotEndsWith, value)
    }

    #[must_use]
    pub fn ends_with_ignore_case(&'static self, value: impl Into<String>) -> Predicate<E> {
        self.text(PredicateKind::EndsWithIgnoreCase, value)
    }

    #[must_use]
    pub fn not_ends_with_ignore_case(&'static self, value: impl Into<String>) -> Predicate<E> {
        self.text(PredicateKind::NotEndsWithIgnoreCase, value)
    }

    #[must_use]
    pub fn contains(&'static self, value: impl Into<String>) -> Predicate<E> {
        self.text(PredicateKind::Contains, value)
    }

    #[must_use]
    pub fn not_contains(&'static self, value: impl Into<String>) -> Predicate<E> {
        self.text(PredicateKind::NotContains, value)
    }

    #[must_use]
    pub fn contains_ignore_case(&'static self, value: impl Into<String>) -> Predicate<E> {
        self.text(PredicateKind::ContainsIgnoreCase, value)
    }

    #[must_use]
    pub fn not_contains_ignore_case(&'static self, value: impl Into<String>) -> Predicate<E> {
        self.text(PredicateKind::NotContainsIgnoreCase, value)
    }

    #[must_use]
    pub fn is_empty(&'static self) -> Predicate<E> {
        self.predicate(PredicateKind::IsEmpty, Operands::None)
    }

    #[must_use]
    pub fn is_not_empty(&'static self) -> Predicate<E> {
        self.predicate(PredicateKind::IsNotEmpty, Operands::None)
    }
}
