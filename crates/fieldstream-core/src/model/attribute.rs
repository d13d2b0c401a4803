use crate::value::{FieldValue, Value, ValueKind};
use std::{fmt, marker::PhantomData};

///
/// AttributeConverter
///
/// Bijection between the entity-side value domain (V) and the store-side
/// domain (D). Operand literals cross `to_store` during compilation.
///

pub trait AttributeConverter: Send + Sync {
    fn to_store(&self, value: Value) -> Value;

    fn from_store(&self, value: Value) -> Value;
}

///
/// Attribute
///
/// Type-erased descriptor of one mapped attribute.
/// Copyable, immutable, and shared by every predicate that references it.
///

#[derive(Clone, Copy)]
pub struct Attribute {
    entity: &'static str,
    column: &'static str,
    kind: ValueKind,
    converter: Option<&'static dyn AttributeConverter>,
    unique: bool,
}

impl Attribute {
    #[must_use]
    pub const fn new(entity: &'static str, column: &'static str, kind: ValueKind) -> Self {
        Self {
            entity,
            column,
            kind,
            converter: None,
            unique: false,
        }
    }

    #[must_use]
    pub const fn with_converter(mut self, converter: &'static dyn AttributeConverter) -> Self {
        self.converter = Some(converter);
        self
    }

    #[must_use]
    pub const fn with_unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    #[must_use]
    pub const fn entity(&self) -> &'static str {
        self.entity
    }

    #[must_use]
    pub const fn column(&self) -> &'static str {
        self.column
    }

    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        self.kind
    }

    #[must_use]
    pub const fn is_unique(&self) -> bool {
        self.unique
    }

    #[must_use]
    pub const fn has_converter(&self) -> bool {
        self.converter.is_some()
    }

    /// `entity.column`
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.entity, self.column)
    }

    /// Map one entity-domain value into the store domain.
    /// Nulls never cross the converter.
    #[must_use]
    pub fn to_store(&self, value: Value) -> Value {
        match (self.converter, value) {
            (_, Value::Null) => Value::Null,
            (Some(converter), value) => converter.to_store(value),
            (None, value) => value,
        }
    }

    /// Map one store-domain value back into the entity domain.
    #[must_use]
    pub fn from_store(&self, value: Value) -> Value {
        match (self.converter, value) {
            (_, Value::Null) => Value::Null,
            (Some(converter), value) => converter.from_store(value),
            (None, value) => value,
        }
    }
}

impl fmt::Debug for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attribute")
            .field("entity", &self.entity)
            .field("column", &self.column)
            .field("kind", &self.kind)
            .field("converter", &self.converter.is_some())
            .field("unique", &self.unique)
            .finish()
    }
}

impl PartialEq for Attribute {
    fn eq(&self, other: &Self) -> bool {
        self.entity == other.entity
            && self.column == other.column
            && self.kind == other.kind
            && self.unique == other.unique
    }
}

impl Eq for Attribute {}

///
/// Field
///
/// Object-safe view of a typed attribute over entity `E`.
/// Predicates hold `&'static dyn Field<E>` so the value type is erased
/// while reads stay typed at the binding.
///

pub trait Field<E>: Send + Sync {
    fn attribute(&self) -> &Attribute;

    /// Read the attribute from one entity, `Value::Null` when absent.
    fn read(&self, entity: &E) -> Value;
}

///
/// AttributeRef
///
/// Typed binding of one attribute of entity `E` with value type `V`.
/// Built once at bootstrap (usually into a `static`) and never mutated.
///

pub struct AttributeRef<E, V> {
    attribute: Attribute,
    getter: fn(&E) -> Option<V>,
    _marker: PhantomData<fn() -> V>,
}

impl<E, V: FieldValue> AttributeRef<E, V> {
    #[must_use]
    pub const fn new(
        entity: &'static str,
        column: &'static str,
        getter: fn(&E) -> Option<V>,
    ) -> Self {
        Self {
            attribute: Attribute::new(entity, column, V::KIND),
            getter,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub const fn with_converter(mut self, converter: &'static dyn AttributeConverter) -> Self {
        self.attribute = self.attribute.with_converter(converter);
        self
    }

    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.attribute = self.attribute.with_unique(true);
        self
    }

    #[must_use]
    pub const fn attribute(&self) -> &Attribute {
        &self.attribute
    }

    /// Typed read of the attribute from one entity.
    #[must_use]
    pub fn get(&self, entity: &E) -> Option<V> {
        (self.getter)(entity)
    }
}

impl<E, V: FieldValue> Field<E> for AttributeRef<E, V> {
    fn attribute(&self) -> &Attribute {
        &self.attribute
    }

    fn read(&self, entity: &E) -> Value {
        (self.getter)(entity).map_or(Value::Null, |value| value.to_value())
    }
}

impl<E, V> fmt::Debug for AttributeRef<E, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AttributeRef").field(&self.attribute).finish()
    }
}
