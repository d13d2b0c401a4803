//! Shared fixtures: one entity with static attribute bindings.

use crate::{
    model::{AttributeConverter, AttributeRef, Field},
    value::Value,
};
use std::collections::BTreeMap;

///
/// Person
///

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Person {
    pub id: u64,
    pub name: Option<String>,
    pub age: i64,
    pub initial: char,
    pub score: f64,
    pub active: bool,
    pub celsius: i64,
}

impl Person {
    pub(crate) fn named(id: u64, name: &str, age: i64) -> Self {
        Self {
            id,
            name: Some(name.to_string()),
            age,
            initial: name.chars().next().unwrap_or(' '),
            ..Self::default()
        }
    }
}

///
/// KelvinConverter
/// Stores temperatures as kelvin while entities hold celsius.
///

pub(crate) struct KelvinConverter;

impl AttributeConverter for KelvinConverter {
    fn to_store(&self, value: Value) -> Value {
        match value {
            Value::Int(c) => Value::Int(c + 273),
            other => other,
        }
    }

    fn from_store(&self, value: Value) -> Value {
        match value {
            Value::Int(k) => Value::Int(k - 273),
            other => other,
        }
    }
}

///
/// UpperConverter
/// Stores text upper-cased.
///

pub(crate) struct UpperConverter;

impl AttributeConverter for UpperConverter {
    fn to_store(&self, value: Value) -> Value {
        match value {
            Value::Text(text) => Value::Text(text.to_uppercase()),
            other => other,
        }
    }

    fn from_store(&self, value: Value) -> Value {
        value
    }
}

///
/// IntToTextConverter
/// Deliberately changes the value family; used to test converter contracts.
///

pub(crate) struct IntToTextConverter;

impl AttributeConverter for IntToTextConverter {
    fn to_store(&self, value: Value) -> Value {
        match value {
            Value::Text(text) => Value::Int(i64::try_from(text.len()).unwrap_or(i64::MAX)),
            other => other,
        }
    }

    fn from_store(&self, value: Value) -> Value {
        value
    }
}

///
/// UpperCharConverter
/// Stores single characters as ASCII upper case.
///

pub(crate) struct UpperCharConverter;

impl AttributeConverter for UpperCharConverter {
    fn to_store(&self, value: Value) -> Value {
        match value {
            Value::Char(c) => Value::Char(c.to_ascii_uppercase()),
            other => other,
        }
    }

    fn from_store(&self, value: Value) -> Value {
        match value {
            Value::Char(c) => Value::Char(c.to_ascii_lowercase()),
            other => other,
        }
    }
}

pub(crate) static KELVIN: KelvinConverter = KelvinConverter;
pub(crate) static UPPER: UpperConverter = UpperConverter;
pub(crate) static INT_TO_TEXT: IntToTextConverter = IntToTextConverter;
pub(crate) static UPPER_CHAR: UpperCharConverter = UpperCharConverter;

fn person_id(p: &Person) -> Option<u64> {
    Some(p.id)
}

fn person_name(p: &Person) -> Option<String> {
    p.name.clone()
}

fn person_age(p: &Person) -> Option<i64> {
    Some(p.age)
}

fn person_initial(p: &Person) -> Option<char> {
    Some(p.initial)
}

fn person_score(p: &Person) -> Option<f64> {
    Some(p.score)
}

fn person_active(p: &Person) -> Option<bool> {
    Some(p.active)
}

fn person_celsius(p: &Person) -> Option<i64> {
    Some(p.celsius)
}

pub(crate) static ID: AttributeRef<Person, u64> =
    AttributeRef::new("person", "id", person_id).unique();
pub(crate) static NAME: AttributeRef<Person, String> =
    AttributeRef::new("person", "name", person_name);
pub(crate) static AGE: AttributeRef<Person, i64> = AttributeRef::new("person", "age", person_age);
pub(crate) static INITIAL: AttributeRef<Person, char> =
    AttributeRef::new("person", "initial", person_initial);
pub(crate) static SCORE: AttributeRef<Person, f64> =
    AttributeRef::new("person", "score", person_score);
pub(crate) static ACTIVE: AttributeRef<Person, bool> =
    AttributeRef::new("person", "active", person_active);
pub(crate) static CELSIUS: AttributeRef<Person, i64> =
    AttributeRef::new("person", "celsius", person_celsius).with_converter(&KELVIN);
pub(crate) static SHOUTED_INITIAL: AttributeRef<Person, char> =
    AttributeRef::new("person", "initial", person_initial).with_converter(&UPPER_CHAR);
pub(crate) static SHOUTED_NAME: AttributeRef<Person, String> =
    AttributeRef::new("person", "name", person_name).with_converter(&UPPER);
pub(crate) static BROKEN_NAME: AttributeRef<Person, String> =
    AttributeRef::new("person", "name", person_name).with_converter(&INT_TO_TEXT);

/// Every binding of `Person`, in column order.
pub(crate) fn person_fields() -> [&'static dyn Field<Person>; 7] {
    [&ID, &NAME, &AGE, &INITIAL, &SCORE, &ACTIVE, &CELSIUS]
}

/// Project one person into a store-domain row keyed by column.
pub(crate) fn person_row(person: &Person) -> BTreeMap<String, Value> {
    person_fields()
        .into_iter()
        .map(|field| {
            let attribute = field.attribute();
            (
                attribute.column().to_string(),
                attribute.to_store(field.read(person)),
            )
        })
        .collect()
}

/// Row holding a single column.
pub(crate) fn single_row(column: &str, value: Value) -> BTreeMap<String, Value> {
    BTreeMap::from([(column.to_string(), value)])
}
