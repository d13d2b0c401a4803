use crate::{
    model::{Field, NullOrder},
    test_support::{AGE, CELSIUS, ID, NAME, Person, SCORE, person_row},
    value::{Value, ValueKind},
};
use std::cmp::Ordering;

#[test]
fn attribute_ref_carries_declared_kind_and_name() {
    let attribute = AGE.attribute();

    assert_eq!(attribute.kind(), ValueKind::Int);
    assert_eq!(attribute.qualified_name(), "person.age");
    assert!(!attribute.is_unique());
    assert!(ID.attribute().is_unique());
}

#[test]
fn read_lifts_missing_values_to_null() {
    let mut person = Person::named(1, "ada", 36);
    assert_eq!(NAME.read(&person), Value::Text("ada".to_string()));

    person.name = None;
    assert_eq!(NAME.read(&person), Value::Null);
    assert_eq!(NAME.get(&person), None);
}

#[test]
fn converter_round_trips_and_skips_null() {
    let attribute = CELSIUS.attribute();

    assert!(attribute.has_converter());
    assert_eq!(attribute.to_store(Value::Int(20)), Value::Int(293));
    assert_eq!(attribute.from_store(Value::Int(293)), Value::Int(20));
    assert_eq!(attribute.to_store(Value::Null), Value::Null);
}

#[test]
fn person_row_is_in_store_domain() {
    let person = Person {
        celsius: -10,
        ..Person::named(4, "bob", 40)
    };
    let row = person_row(&person);

    assert_eq!(row.get("celsius"), Some(&Value::Int(263)));
    assert_eq!(row.get("age"), Some(&Value::Int(40)));
    assert_eq!(row.get("initial"), Some(&Value::Char('b')));
}

#[test]
fn attributes_compare_by_identity_not_converter() {
    assert_eq!(*AGE.attribute(), *AGE.attribute());
    assert_ne!(*AGE.attribute(), *CELSIUS.attribute());
}

//
// Field comparators
//

#[test]
fn field_comparator_orders_by_attribute() {
    let young = Person::named(1, "ada", 20);
    let old = Person::named(2, "bob", 60);

    let ascending = AGE.comparator();
    assert!(!ascending.is_reversed());
    assert_eq!(ascending.compare(&young, &old), Ordering::Less);
    assert_eq!(ascending.compare(&young, &young), Ordering::Equal);

    let descending = ascending.clone().reversed();
    assert!(descending.is_reversed());
    assert_eq!(descending.compare(&young, &old), Ordering::Greater);
    assert_eq!(descending.compare(&old, &young), Ordering::Less);
    assert_eq!(descending.reversed(), ascending);
}

#[test]
fn field_comparator_null_placement_ignores_direction() {
    let named = Person::named(1, "ada", 20);
    let nameless = Person {
        name: None,
        ..Person::named(2, "bob", 20)
    };

    let by_name = NAME.comparator();
    assert_eq!(by_name.null_order(), NullOrder::Last);
    assert_eq!(by_name.compare(&nameless, &named), Ordering::Greater);
    assert_eq!(
        by_name.clone().reversed().compare(&nameless, &named),
        Ordering::Greater
    );

    let first = by_name.nulls_first().reversed();
    assert_eq!(first.compare(&nameless, &named), Ordering::Less);
    assert_eq!(first.compare(&named, &nameless), Ordering::Greater);
    assert_eq!(first.compare(&nameless, &nameless), Ordering::Equal);
}

#[test]
fn field_comparator_puts_nan_after_every_score() {
    let scored = |id, score| Person {
        score,
        ..Person::named(id, "x", 1)
    };
    let mut people = vec![scored(1, f64::NAN), scored(2, 2.5), scored(3, -1.0)];

    let by_score = SCORE.comparator();
    people.sort_by(|a, b| by_score.compare(a, b));

    let ids: Vec<u64> = people.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[test]
fn field_comparator_display_names_attribute_and_direction() {
    assert_eq!(AGE.comparator().to_string(), "(order by person.age ascending)");
    assert_eq!(
        AGE.comparator().reversed().nulls_first().to_string(),
        "(order by person.age descending nulls first)"
    );
    assert_ne!(AGE.comparator(), CELSIUS.comparator());
}
