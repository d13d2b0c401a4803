use crate::{
    model::{Attribute, AttributeRef, Field},
    value::{OrderedValue, Value, compare_values},
};
use std::{cmp::Ordering, fmt};

///
/// NullOrder
///
/// Placement of entities whose attribute is absent. Independent of the
/// comparator's direction, like `NULLS FIRST` / `NULLS LAST` in SQL.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum NullOrder {
    First,
    #[default]
    Last,
}

///
/// FieldComparator
///
/// Orders entities by one attribute. Unlike a closure comparator it keeps
/// the attribute, direction and null placement inspectable, so a planner
/// can push it down as `ORDER BY`.
///

pub struct FieldComparator<E: 'static> {
    field: &'static dyn Field<E>,
    reversed: bool,
    null_order: NullOrder,
}

impl<E: 'static> FieldComparator<E> {
    /// Ascending, nulls last.
    #[must_use]
    pub fn new(field: &'static dyn Field<E>) -> Self {
        Self {
            field,
            reversed: false,
            null_order: NullOrder::Last,
        }
    }

    #[must_use]
    pub fn attribute(&self) -> &Attribute {
        self.field.attribute()
    }

    #[must_use]
    pub const fn is_reversed(&self) -> bool {
        self.reversed
    }

    #[must_use]
    pub const fn null_order(&self) -> NullOrder {
        self.null_order
    }

    /// Flip the direction. Null placement is kept.
    #[must_use]
    pub const fn reversed(mut self) -> Self {
        self.reversed = !self.reversed;
        self
    }

    #[must_use]
    pub const fn nulls_first(mut self) -> Self {
        self.null_order = NullOrder::First;
        self
    }

    #[must_use]
    pub const fn nulls_last(mut self) -> Self {
        self.null_order = NullOrder::Last;
        self
    }

    /// Total order over entities; equal attribute values compare equal so
    /// a stable sort keeps their encounter order.
    #[must_use]
    pub fn compare(&self, first: &E, second: &E) -> Ordering {
        let left = self.field.read(first);
        let right = self.field.read(second);

        match (left.is_null(), right.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => self.null_placement(),
            (false, true) => self.null_placement().reverse(),
            (false, false) => {
                let ordering = order_present(&left, &right);
                if self.reversed {
                    ordering.reverse()
                } else {
                    ordering
                }
            }
        }
    }

    const fn null_placement(&self) -> Ordering {
        match self.null_order {
            NullOrder::First => Ordering::Less,
            NullOrder::Last => Ordering::Greater,
        }
    }
}

// Floats follow the IEEE total order so NaN sorts after every number.
fn order_present(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Float(left), Value::Float(right)) => left.total_cmp(right),
        _ => compare_values(left, right).unwrap_or(Ordering::Equal),
    }
}

impl<E: 'static> Clone for FieldComparator<E> {
    fn clone(&self) -> Self {
        Self {
            field: self.field,
            reversed: self.reversed,
            null_order: self.null_order,
        }
    }
}

impl<E: 'static> PartialEq for FieldComparator<E> {
    fn eq(&self, other: &Self) -> bool {
        self.attribute() == other.attribute()
            && self.reversed == other.reversed
            && self.null_order == other.null_order
    }
}

impl<E: 'static> fmt::Debug for FieldComparator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldComparator")
            .field("attribute", self.attribute())
            .field("reversed", &self.reversed)
            .field("null_order", &self.null_order)
            .finish()
    }
}

impl<E: 'static> fmt::Display for FieldComparator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = if self.reversed { "descending" } else { "ascending" };
        write!(f, "(order by {} {direction}", self.attribute().qualified_name())?;
        if self.null_order == NullOrder::First {
            f.write_str(" nulls first")?;
        }

        f.write_str(")")
    }
}

impl<E: 'static, V: OrderedValue + 'static> AttributeRef<E, V> {
    /// Ascending comparator over this attribute, nulls last.
    #[must_use]
    pub fn comparator(&'static self) -> FieldComparator<E> {
        FieldComparator::new(self)
    }
}
