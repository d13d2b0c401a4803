use crate::{
    compile::CompileError,
    predicate::{Inclusion, OperandContract, Operands, Predicate, PredicateKind},
    test_support::{ACTIVE, AGE, CELSIUS, ID, INITIAL, NAME, Person, SCORE},
    value::Value,
};
use proptest::prelude::*;
use std::str::FromStr;

fn people() -> Vec<Person> {
    [1, 2, 5, 8, 9]
        .into_iter()
        .map(|age| Person::named(u64::try_from(age).unwrap_or_default(), "p", age))
        .collect()
}

fn ages_matching(predicate: &Predicate<Person>) -> Vec<i64> {
    people()
        .into_iter()
        .filter(|p| predicate.test(p).unwrap())
        .map(|p| p.age)
        .collect()
}

fn nameless() -> Person {
    Person {
        name: None,
        ..Person::named(7, "x", 30)
    }
}

// ------------------------------------------------------------------
// Kind metadata
// ------------------------------------------------------------------

#[test]
fn kind_tags_and_names_are_stable() {
    for kind in PredicateKind::ALL {
        assert_eq!(PredicateKind::from_tag(kind.tag()).unwrap(), kind);
        assert_eq!(PredicateKind::from_str(kind.name()).unwrap(), kind);
        assert_eq!(kind.complement().complement(), kind);
    }

    assert_eq!(PredicateKind::Between.tag(), 0x0d);
    assert_eq!(PredicateKind::NotIn.to_string(), "NOT_IN");
}

#[test]
fn unknown_kind_is_unsupported() {
    let err = PredicateKind::from_tag(0xff).unwrap_err();
    assert!(matches!(err, CompileError::UnsupportedPredicateKind { .. }));

    let err = PredicateKind::from_str("LIKE").unwrap_err();
    assert_eq!(
        err,
        CompileError::UnsupportedPredicateKind {
            kind: "LIKE".to_string()
        }
    );
}

#[test]
fn kind_serializes_as_screaming_snake_case() {
    let json = serde_json::to_string(&PredicateKind::NotStartsWithIgnoreCase).unwrap();
    assert_eq!(json, "\"NOT_STARTS_WITH_IGNORE_CASE\"");

    let kind: PredicateKind = serde_json::from_str("\"GREATER_OR_EQUAL\"").unwrap();
    assert_eq!(kind, PredicateKind::GreaterOrEqual);
}

// ------------------------------------------------------------------
// Operand contracts
// ------------------------------------------------------------------

#[test]
fn typed_builders_always_validate() {
    let predicates = [
        AGE.always_true(),
        AGE.is_null(),
        AGE.equal(3),
        AGE.not_in([1, 2]),
        AGE.between_with(1, 2, Inclusion::StartExclusiveEndExclusive),
        INITIAL.greater_than('b'),
        SCORE.less_or_equal(1.5),
        ACTIVE.not_equal(true),
        ID.in_set([]),
        NAME.contains_ignore_case("a"),
        NAME.is_not_empty(),
        NAME.not_between("a".to_string(), "m".to_string()),
    ];

    for predicate in predicates {
        predicate.validate().unwrap();
    }
}

#[test]
fn arity_mismatch_is_invalid_operand_type() {
    let cases = [
        (PredicateKind::IsNull, Operands::One(Value::Int(1))),
        (PredicateKind::Equal, Operands::None),
        (PredicateKind::Between, Operands::One(Value::Int(1))),
        (PredicateKind::LessThan, Operands::Two(Value::Int(1), Value::Int(2))),
        (PredicateKind::In, Operands::One(Value::Int(1))),
    ];

    for (kind, operands) in cases {
        let err = Predicate::new(&AGE, kind, operands).validate().unwrap_err();
        assert!(
            matches!(err, CompileError::InvalidOperandType { kind: k, .. } if k == kind),
            "{kind}: {err:?}"
        );
    }
}

#[test]
fn operand_type_mismatch_is_invalid_operand_type() {
    let cases: [(&'static dyn crate::model::Field<Person>, PredicateKind, Value); 6] = [
        (&AGE, PredicateKind::Equal, Value::Text("3".to_string())),
        (&AGE, PredicateKind::Equal, Value::Null),
        (&AGE, PredicateKind::StartsWith, Value::Text("3".to_string())),
        (&NAME, PredicateKind::StartsWith, Value::Int(3)),
        (&NAME, PredicateKind::GreaterThan, Value::Bool(true)),
        (&AGE, PredicateKind::In, Value::List(vec![Value::Int(1), Value::Null])),
    ];

    for (field, kind, operand) in cases {
        let err = Predicate::new(field, kind, Operands::One(operand))
            .validate()
            .unwrap_err();
        assert!(matches!(err, CompileError::InvalidOperandType { .. }));
    }

    let err = Predicate::new(&AGE, PredicateKind::IsEmpty, Operands::None)
        .validate()
        .unwrap_err();
    assert!(matches!(
        err,
        CompileError::InvalidOperandType {
            expected: OperandContract::None,
            ..
        }
    ));
}

#[test]
fn unordered_bounds_are_illegal_comparison_operands() {
    let predicate = Predicate::new(
        &AGE,
        PredicateKind::Between,
        Operands::Two(Value::Int(1), Value::Text("9".to_string())),
    );

    let err = predicate.validate().unwrap_err();
    assert_eq!(
        err,
        CompileError::IllegalComparisonOperands {
            kind: PredicateKind::Between,
            attribute: "person.age".to_string(),
            first: "i64".to_string(),
            second: "text".to_string(),
        }
    );
}

#[test]
fn bounds_of_wrong_family_are_invalid_operand_type() {
    let predicate = Predicate::new(
        &AGE,
        PredicateKind::NotBetween,
        Operands::Two(Value::Text("a".to_string()), Value::Text("b".to_string())),
    );

    assert!(matches!(
        predicate.validate().unwrap_err(),
        CompileError::InvalidOperandType { .. }
    ));
}

// ------------------------------------------------------------------
// In-memory evaluation
// ------------------------------------------------------------------

#[test]
fn between_and_not_between_split_the_sample() {
    assert_eq!(ages_matching(&AGE.between(2, 8)), vec![2, 5, 8]);
    assert_eq!(ages_matching(&AGE.not_between(2, 8)), vec![1, 9]);
    assert_eq!(
        ages_matching(&AGE.between_with(2, 8, Inclusion::StartExclusiveEndExclusive)),
        vec![5]
    );
    assert_eq!(
        ages_matching(&AGE.not_between_with(2, 8, Inclusion::StartInclusiveEndExclusive)),
        vec![1, 8, 9]
    );
}

#[test]
fn reversed_bounds_match_nothing_and_complement_everything() {
    assert!(ages_matching(&AGE.between(8, 2)).is_empty());
    assert_eq!(ages_matching(&AGE.not_between(8, 2)), vec![1, 2, 5, 8, 9]);
}

#[test]
fn equal_ignore_case_folds_both_sides() {
    let predicate = NAME.equal_ignore_case("Foo");

    for name in ["foo", "FOO", "fOo"] {
        assert!(predicate.test(&Person::named(1, name, 1)).unwrap(), "{name}");
    }
    assert!(!predicate.test(&Person::named(1, "foobar", 1)).unwrap());
}

#[test]
fn char_bound_compares_as_code_point() {
    let by_char = INITIAL.less_than('b');
    let by_int = Predicate::new(&INITIAL, PredicateKind::LessThan, Operands::One(Value::Int(98)));

    for name in ["a", "b", "c"] {
        let person = Person::named(1, name, 1);
        assert_eq!(by_char.test(&person).unwrap(), by_int.test(&person).unwrap());
    }
    assert!(by_char.test(&Person::named(1, "a", 1)).unwrap());
}

#[test]
fn null_attribute_matches_only_null_tolerant_kinds() {
    let person = nameless();

    assert!(NAME.is_null().test(&person).unwrap());
    assert!(NAME.always_true().test(&person).unwrap());
    assert!(NAME.not_in(["a".to_string()]).test(&person).unwrap());

    assert!(!NAME.is_not_null().test(&person).unwrap());
    assert!(!NAME.equal("x".to_string()).test(&person).unwrap());
    assert!(!NAME.not_equal("x".to_string()).test(&person).unwrap());
    assert!(!NAME.not_contains("x").test(&person).unwrap());
    assert!(!NAME.is_empty().test(&person).unwrap());
    assert!(!NAME.is_not_empty().test(&person).unwrap());
}

#[test]
fn string_kinds_match_at_their_anchor() {
    let person = Person::named(1, "Margaret", 1);

    assert!(NAME.starts_with("Mar").test(&person).unwrap());
    assert!(!NAME.starts_with("mar").test(&person).unwrap());
    assert!(NAME.starts_with_ignore_case("mar").test(&person).unwrap());
    assert!(NAME.ends_with("ret").test(&person).unwrap());
    assert!(NAME.not_ends_with_ignore_case("RETS").test(&person).unwrap());
    assert!(NAME.contains("gar").test(&person).unwrap());
    assert!(!NAME.not_contains_ignore_case("GAR").test(&person).unwrap());
    assert!(NAME.not_equal_ignore_case("margarets").test(&person).unwrap());
    assert!(NAME.is_empty().test(&Person::named(1, "", 1)).unwrap());
}

#[test]
fn evaluation_uses_entity_domain_despite_converter() {
    let person = Person {
        celsius: 20,
        ..Person::named(1, "a", 1)
    };

    assert!(CELSIUS.equal(20).test(&person).unwrap());
    assert!(!CELSIUS.equal(293).test(&person).unwrap());
}

#[test]
fn empty_set_membership() {
    let person = Person::named(1, "a", 1);

    assert!(!AGE.in_set([]).test(&person).unwrap());
    assert!(AGE.not_in([]).test(&person).unwrap());
}

#[test]
fn invalid_predicates_fail_evaluation() {
    let predicate = Predicate::new(&AGE, PredicateKind::Contains, Operands::None);

    assert!(predicate.test(&Person::named(1, "a", 1)).is_err());
}

// ------------------------------------------------------------------
// Negation and fingerprints
// ------------------------------------------------------------------

#[test]
fn negate_keeps_operands_and_inclusion() {
    let predicate = AGE.between_with(1, 4, Inclusion::StartExclusiveEndInclusive);
    let negated = predicate.negate();

    assert_eq!(negated.kind(), PredicateKind::NotBetween);
    assert_eq!(negated.operands(), predicate.operands());
    assert_eq!(negated.inclusion(), predicate.inclusion());
    assert_eq!(negated.negate(), predicate);
}

#[test]
fn fingerprint_distinguishes_structure() {
    let base = AGE.between(1, 5);

    assert_eq!(base.fingerprint(), AGE.between(1, 5).fingerprint());
    assert_ne!(base.fingerprint(), AGE.between(1, 6).fingerprint());
    assert_ne!(base.fingerprint(), AGE.not_between(1, 5).fingerprint());
    assert_ne!(
        base.fingerprint(),
        AGE.between_with(1, 5, Inclusion::StartExclusiveEndExclusive)
            .fingerprint()
    );
    assert_ne!(
        AGE.equal(1).fingerprint(),
        Predicate::new(&AGE, PredicateKind::Equal, Operands::One(Value::Uint(1))).fingerprint()
    );
    assert_ne!(AGE.is_null().fingerprint(), ID.is_null().fingerprint());
}

#[test]
fn display_names_attribute_and_kind() {
    assert_eq!(AGE.greater_than(3).to_string(), "person.age GREATER_THAN 3");
    assert_eq!(NAME.is_null().to_string(), "person.name IS_NULL");
}

fn arb_inclusion() -> impl Strategy<Value = Inclusion> {
    prop_oneof![
        Just(Inclusion::StartExclusiveEndExclusive),
        Just(Inclusion::StartInclusiveEndExclusive),
        Just(Inclusion::StartExclusiveEndInclusive),
        Just(Inclusion::StartInclusiveEndInclusive),
    ]
}

fn arb_kind() -> impl Strategy<Value = PredicateKind> {
    prop::sample::select(PredicateKind::ALL.to_vec())
}

fn well_formed(kind: PredicateKind, a: i64, b: i64) -> Predicate<Person> {
    let operands = match kind.contract() {
        OperandContract::None => Operands::None,
        OperandContract::Scalar | OperandContract::Ordered => Operands::One(Value::Int(a)),
        OperandContract::Text => Operands::One(Value::Text(a.to_string())),
        OperandContract::Range => Operands::Two(Value::Int(a), Value::Int(b)),
        OperandContract::Set => Operands::One(Value::List(vec![Value::Int(a), Value::Int(b)])),
    };
    let field: &'static dyn crate::model::Field<Person> =
        if kind.contract() == OperandContract::Text
            || matches!(kind, PredicateKind::IsEmpty | PredicateKind::IsNotEmpty)
        {
            &NAME
        } else {
            &AGE
        };

    Predicate::new(field, kind, operands)
}

proptest! {
    #[test]
    fn between_partitions_the_domain(
        first in -20i64..20,
        second in -20i64..20,
        age in -30i64..30,
        inclusion in arb_inclusion(),
    ) {
        let person = Person::named(1, "p", age);
        let inside = AGE.between_with(first, second, inclusion).test(&person).unwrap();
        let outside = AGE.not_between_with(first, second, inclusion).test(&person).unwrap();

        prop_assert!(inside != outside);
    }

    #[test]
    fn negation_is_exact_complement_for_present_values(
        kind in arb_kind(),
        a in -5i64..5,
        b in -5i64..5,
        age in -5i64..5,
    ) {
        let predicate = well_formed(kind, a, b);
        let person = Person::named(1, &age.to_string(), age);

        let direct = predicate.test(&person).unwrap();
        let negated = predicate.negate().test(&person).unwrap();
        prop_assert!(direct != negated, "{}", predicate);
    }

    #[test]
    fn fingerprint_is_deterministic(kind in arb_kind(), a in any::<i64>(), b in any::<i64>()) {
        prop_assert_eq!(
            well_formed(kind, a, b).fingerprint(),
            well_formed(kind, a, b).fingerprint()
        );
    }
}
