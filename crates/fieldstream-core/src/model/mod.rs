//! Mapped-attribute model: erased descriptors, typed bindings, converters,
//! and attribute-based comparators.

mod attribute;
mod comparator;

#[cfg(test)]
mod tests;

pub use attribute::{Attribute, AttributeConverter, AttributeRef, Field};
pub use comparator::{FieldComparator, NullOrder};
