//! Compiles predicates through the public API only, against both the
//! reference backend and a string-rendering backend defined here.

use fieldstream_core::{
    ErrorClass,
    compile::{
        CompareOp, CompileContext, CompileError, CompilePolicy, LikePattern, NativeBuilder,
        NotInSemantics, PathResolver, compile_predicate,
    },
    model::{Attribute, AttributeRef},
    native::{ColumnResolver, ExprBuilder},
    pipeline::Pipeline,
    predicate::{Inclusion, Predicate},
    value::Value,
};
use std::collections::BTreeMap;

///
/// Order
///

#[derive(Clone, Debug)]
struct Order {
    id: u64,
    sku: Option<String>,
    quantity: i64,
}

impl Order {
    fn new(id: u64, sku: Option<&str>, quantity: i64) -> Self {
        Self {
            id,
            sku: sku.map(str::to_string),
            quantity,
        }
    }

    fn row(&self) -> BTreeMap<String, Value> {
        BTreeMap::from([
            ("id".to_string(), Value::Uint(self.id)),
            (
                "sku".to_string(),
                self.sku.clone().map_or(Value::Null, Value::Text),
            ),
            ("quantity".to_string(), Value::Int(self.quantity)),
        ])
    }
}

fn order_id(o: &Order) -> Option<u64> {
    Some(o.id)
}

fn order_sku(o: &Order) -> Option<String> {
    o.sku.clone()
}

fn order_quantity(o: &Order) -> Option<i64> {
    Some(o.quantity)
}

static ID: AttributeRef<Order, u64> = AttributeRef::new("orders", "id", order_id).unique();
static SKU: AttributeRef<Order, String> = AttributeRef::new("orders", "sku", order_sku);
static QUANTITY: AttributeRef<Order, i64> =
    AttributeRef::new("orders", "quantity", order_quantity);

fn orders() -> Vec<Order> {
    vec![
        Order::new(1, Some("AB-100"), 0),
        Order::new(2, Some("ab-200"), 4),
        Order::new(3, None, 7),
        Order::new(4, Some(""), 10),
        Order::new(5, Some("XY_9"), 12),
    ]
}

///
/// SqlBuilder
/// Renders every node as a SQL fragment.
///

struct SqlBuilder;

impl NativeBuilder for SqlBuilder {
    type Expr = String;
    type Node = String;

    fn literal(&mut self, value: Value) -> String {
        match value {
            Value::Text(text) => format!("'{text}'"),
            other => other.to_string(),
        }
    }

    fn lower(&mut self, expr: String) -> String {
        format!("lower({expr})")
    }

    fn is_true(&mut self, expr: String) -> String {
        format!("{expr} IS TRUE")
    }

    fn is_false(&mut self, expr: String) -> String {
        format!("{expr} IS FALSE")
    }

    fn is_null(&mut self, expr: String) -> String {
        format!("{expr} IS NULL")
    }

    fn is_not_null(&mut self, expr: String) -> String {
        format!("{expr} IS NOT NULL")
    }

    fn compare(&mut self, left: String, op: CompareOp, right: String) -> String {
        format!("{left} {op} {right}")
    }

    fn like(&mut self, expr: String, pattern: &LikePattern) -> String {
        format!("{expr} LIKE '{}' ESCAPE '{}'", pattern.render(), pattern.escape)
    }

    fn not_like(&mut self, expr: String, pattern: &LikePattern) -> String {
        format!("{expr} NOT LIKE '{}' ESCAPE '{}'", pattern.render(), pattern.escape)
    }

    fn in_list(&mut self, expr: String, values: Vec<Value>) -> String {
        let items: Vec<String> = values.into_iter().map(|v| self.literal(v)).collect();

        format!("{expr} IN ({})", items.join(", "))
    }

    fn and(&mut self, left: String, right: String) -> String {
        format!("({left} AND {right})")
    }

    fn or(&mut self, left: String, right: String) -> String {
        format!("({left} OR {right})")
    }

    fn not(&mut self, node: String) -> String {
        format!("NOT ({node})")
    }
}

///
/// QualifiedResolver
///

struct QualifiedResolver;

impl PathResolver<SqlBuilder> for QualifiedResolver {
    fn resolve(
        &self,
        _builder: &mut SqlBuilder,
        attribute: &Attribute,
    ) -> Result<String, CompileError> {
        Ok(attribute.qualified_name())
    }
}

fn sql(predicate: &Predicate<Order>) -> String {
    sql_with(predicate, CompilePolicy::default()).unwrap()
}

fn sql_with(predicate: &Predicate<Order>, policy: CompilePolicy) -> Result<String, CompileError> {
    let mut builder = SqlBuilder;
    let mut ctx = CompileContext::new(&mut builder, &QualifiedResolver).with_policy(policy);

    compile_predicate(&mut ctx, predicate)
}

fn native_ids(predicate: &Predicate<Order>) -> Vec<u64> {
    let mut builder = ExprBuilder;
    let resolver = ColumnResolver::for_entity("orders");
    let mut ctx = CompileContext::new(&mut builder, &resolver);
    let node = compile_predicate(&mut ctx, predicate).unwrap();

    orders()
        .iter()
        .filter(|order| node.matches(&order.row()))
        .map(|order| order.id)
        .collect()
}

fn memory_ids(predicate: &Predicate<Order>) -> Vec<u64> {
    orders()
        .iter()
        .filter(|order| predicate.test(order).unwrap())
        .map(|order| order.id)
        .collect()
}

#[test]
fn range_kinds_render_as_bound_compositions() {
    assert_eq!(
        sql(&QUANTITY.between(1, 10)),
        "(orders.quantity >= 1 AND orders.quantity <= 10)"
    );
    assert_eq!(
        sql(&QUANTITY.not_between_with(1, 10, Inclusion::StartExclusiveEndExclusive)),
        "(orders.quantity <= 1 OR orders.quantity >= 10)"
    );
}

#[test]
fn string_kinds_render_with_escape_clause() {
    assert_eq!(
        sql(&SKU.starts_with("XY_")),
        "orders.sku LIKE 'XY\\_%' ESCAPE '\\'"
    );
    assert_eq!(
        sql(&SKU.not_contains_ignore_case("AB")),
        "lower(orders.sku) NOT LIKE '%ab%' ESCAPE '\\'"
    );
    assert_eq!(sql(&SKU.equal_ignore_case("Ab-100")), "lower(orders.sku) = 'ab-100'");
}

#[test]
fn not_in_follows_policy() {
    let predicate = SKU.not_in(["AB-100".to_string()]);

    assert_eq!(
        sql(&predicate),
        "(orders.sku IS NULL OR NOT (orders.sku IN ('AB-100')))"
    );
    assert_eq!(
        sql_with(
            &predicate,
            CompilePolicy::new().with_not_in(NotInSemantics::BackendNegation)
        )
        .unwrap(),
        "NOT (orders.sku IN ('AB-100'))"
    );
}

#[test]
fn constants_and_emptiness() {
    assert_eq!(sql(&ID.always_true()), "true IS TRUE");
    assert_eq!(sql(&ID.always_false()), "true IS FALSE");
    assert_eq!(sql(&SKU.is_empty()), "orders.sku = ''");
    assert_eq!(sql(&SKU.is_not_empty()), "orders.sku <> ''");
}

#[test]
fn reference_backend_agrees_with_memory_evaluation() {
    let predicates = [
        QUANTITY.between(4, 10),
        QUANTITY.not_between(4, 10),
        QUANTITY.between_with(10, 4, Inclusion::StartInclusiveEndExclusive),
        QUANTITY.greater_than(4),
        QUANTITY.in_set([0, 12]),
        QUANTITY.not_in([0, 12]),
        SKU.starts_with_ignore_case("ab"),
        SKU.not_starts_with("AB"),
        SKU.ends_with("_9"),
        SKU.contains("-"),
        SKU.is_empty(),
        SKU.is_not_empty(),
        SKU.is_null(),
        SKU.not_in(["XY_9".to_string()]),
        SKU.not_equal_ignore_case("ab-100"),
        ID.equal(3),
        ID.always_false(),
    ];

    for predicate in &predicates {
        assert_eq!(native_ids(predicate), memory_ids(predicate), "{predicate}");
    }
}

#[test]
fn known_selections() {
    assert_eq!(native_ids(&QUANTITY.between(4, 10)), vec![2, 3, 4]);
    assert_eq!(native_ids(&QUANTITY.not_between(4, 10)), vec![1, 5]);
    assert_eq!(native_ids(&SKU.starts_with_ignore_case("ab")), vec![1, 2]);
    assert_eq!(native_ids(&SKU.not_in(["XY_9".to_string()])), vec![1, 2, 3, 4]);
    assert_eq!(native_ids(&SKU.is_empty()), vec![4]);
}

#[test]
fn foreign_entity_is_unresolved() {
    static OTHER: AttributeRef<Order, i64> =
        AttributeRef::new("archive", "quantity", order_quantity);

    let mut builder = ExprBuilder;
    let resolver = ColumnResolver::for_entity("orders");
    let mut ctx = CompileContext::new(&mut builder, &resolver);

    let err = compile_predicate(&mut ctx, &OTHER.equal(1)).unwrap_err();

    assert_eq!(
        err,
        CompileError::UnresolvedAttribute {
            attribute: "archive.quantity".to_string(),
        }
    );
    assert_eq!(err.class(), ErrorClass::Unresolved);
}

#[test]
fn pipeline_filter_matches_compiled_selection() {
    let predicate = QUANTITY.greater_or_equal(7);
    let expected = native_ids(&predicate);

    let pipeline = Pipeline::<Order, Order>::new()
        .filter_by(predicate)
        .unwrap()
        .map(|order| order.id)
        .unwrap()
        .freeze();

    assert_eq!(pipeline.execute(orders()), expected);
}
