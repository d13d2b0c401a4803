//! Module: native
//! Responsibility: reference backend for compiled predicates.
//! Does not own: storage, scanning, or query planning.
//! Boundary: implements `NativeBuilder`/`PathResolver` and evaluates the
//! resulting nodes over in-memory rows with SQL three-valued logic.


use crate::{
    compile::{CompareOp, CompileError, LikePattern, NativeBuilder, PathResolver},
    model::Attribute,
    value::{Value, compare_values, text_matches},
};
use std::{cmp::Ordering, collections::BTreeMap, fmt};

///
/// Row
///
/// Store-domain row exposing column values by name.
/// Absent columns read as `Value::Null`.
///

pub trait Row {
    fn get(&self, column: &str) -> Value;
}

impl Row for BTreeMap<String, Value> {
    fn get(&self, column: &str) -> Value {
        Self::get(self, column).cloned().unwrap_or(Value::Null)
    }
}

///
/// Expr
///

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Column(String),
    Literal(Value),
    Lower(Box<Self>),
}

impl Expr {
    fn eval<R: Row + ?Sized>(&self, row: &R) -> Value {
        match self {
            Self::Column(column) => row.get(column),
            Self::Literal(value) => value.clone(),
            Self::Lower(inner) => match inner.eval(row) {
                Value::Text(text) => Value::Text(text.to_lowercase()),
                _ => Value::Null,
            },
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(column) => f.write_str(column),
            Self::Literal(value) => write!(f, "{value}"),
            Self::Lower(inner) => write!(f, "lower({inner})"),
        }
    }
}

///
/// Node
///
/// Backend predicate tree produced by `ExprBuilder`.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    IsTrue(Expr),
    IsFalse(Expr),
    IsNull(Expr),
    IsNotNull(Expr),
    Compare {
        left: Expr,
        op: CompareOp,
        right: Expr,
    },
    Like {
        expr: Expr,
        pattern: LikePattern,
        negated: bool,
    },
    In {
        expr: Expr,
        values: Vec<Value>,
    },
    And(Box<Self>, Box<Self>),
    Or(Box<Self>, Box<Self>),
    Not(Box<Self>),
}

impl Node {
    /// Three-valued evaluation; `None` is SQL UNKNOWN.
    #[must_use]
    pub fn eval<R: Row + ?Sized>(&self, row: &R) -> Option<bool> {
        match self {
            Self::IsTrue(expr) => Some(expr.eval(row) == Value::Bool(true)),
            Self::IsFalse(expr) => Some(expr.eval(row) == Value::Bool(false)),
            Self::IsNull(expr) => Some(expr.eval(row).is_null()),
            Self::IsNotNull(expr) => Some(!expr.eval(row).is_null()),

            Self::Compare { left, op, right } => {
                let ordering = compare_values(&left.eval(row), &right.eval(row))?;
                Some(apply_op(*op, ordering))
            }

            Self::Like {
                expr,
                pattern,
                negated,
            } => {
                let value = expr.eval(row);
                let text = value.as_text()?;
                let matched = text_matches(text, &pattern.needle, pattern.anchor);
                Some(matched != *negated)
            }

            Self::In { expr, values } => {
                let value = expr.eval(row);
                if value.is_null() {
                    return None;
                }
                let found = values
                    .iter()
                    .any(|item| compare_values(&value, item) == Some(Ordering::Equal));
                Some(found)
            }

            Self::And(left, right) => match (left.eval(row), right.eval(row)) {
                (Some(false), _) | (_, Some(false)) => Some(false),
                (Some(true), Some(true)) => Some(true),
                _ => None,
            },
            Self::Or(left, right) => match (left.eval(row), right.eval(row)) {
                (Some(true), _) | (_, Some(true)) => Some(true),
                (Some(false), Some(false)) => Some(false),
                _ => None,
            },
            Self::Not(inner) => inner.eval(row).map(|truth| !truth),
        }
    }

    /// A row is selected only when the predicate is definitely true.
    #[must_use]
    pub fn matches<R: Row + ?Sized>(&self, row: &R) -> bool {
        self.eval(row) == Some(true)
    }
}

const fn apply_op(op: CompareOp, ordering: Ordering) -> bool {
    match op {
        CompareOp::Eq => matches!(ordering, Ordering::Equal),
        CompareOp::Ne => !matches!(ordering, Ordering::Equal),
        CompareOp::Lt => matches!(ordering, Ordering::Less),
        CompareOp::Le => !matches!(ordering, Ordering::Greater),
        CompareOp::Gt => matches!(ordering, Ordering::Greater),
        CompareOp::Ge => !matches!(ordering, Ordering::Less),
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IsTrue(expr) => write!(f, "{expr} IS TRUE"),
            Self::IsFalse(expr) => write!(f, "{expr} IS FALSE"),
            Self::IsNull(expr) => write!(f, "{expr} IS NULL"),
            Self::IsNotNull(expr) => write!(f, "{expr} IS NOT NULL"),
            Self::Compare { left, op, right } => write!(f, "{left} {op} {right}"),
            Self::Like {
                expr,
                pattern,
                negated,
            } => {
                let not = if *negated { "NOT " } else { "" };
                write!(f, "{expr} {not}LIKE '{}'", pattern.render())
            }
            Self::In { expr, values } => {
                write!(f, "{expr} IN {}", Value::List(values.clone()))
            }
            Self::And(left, right) => write!(f, "({left} AND {right})"),
            Self::Or(left, right) => write!(f, "({left} OR {right})"),
            Self::Not(inner) => write!(f, "NOT ({inner})"),
        }
    }
}

///
/// ExprBuilder
///
/// Stateless `NativeBuilder` producing `Expr`/`Node` trees.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct ExprBuilder;

impl NativeBuilder for ExprBuilder {
    type Expr = Expr;
    type Node = Node;

    fn literal(&mut self, value: Value) -> Expr {
        Expr::Literal(value)
    }

    fn lower(&mut self, expr: Expr) -> Expr {
        Expr::Lower(Box::new(expr))
    }

    fn is_true(&mut self, expr: Expr) -> Node {
        Node::IsTrue(expr)
    }

    fn is_false(&mut self, expr: Expr) -> Node {
        Node::IsFalse(expr)
    }

    fn is_null(&mut self, expr: Expr) -> Node {
        Node::IsNull(expr)
    }

    fn is_not_null(&mut self, expr: Expr) -> Node {
        Node::IsNotNull(expr)
    }

    fn compare(&mut self, left: Expr, op: CompareOp, right: Expr) -> Node {
        Node::Compare { left, op, right }
    }

    fn like(&mut self, expr: Expr, pattern: &LikePattern) -> Node {
        Node::Like {
            expr,
            pattern: pattern.clone(),
            negated: false,
        }
    }

    fn not_like(&mut self, expr: Expr, pattern: &LikePattern) -> Node {
        Node::Like {
            expr,
            pattern: pattern.clone(),
            negated: true,
        }
    }

    fn in_list(&mut self, expr: Expr, values: Vec<Value>) -> Node {
        Node::In { expr, values }
    }

    fn and(&mut self, left: Node, right: Node) -> Node {
        Node::And(Box::new(left), Box::new(right))
    }

    fn or(&mut self, left: Node, right: Node) -> Node {
        Node::Or(Box::new(left), Box::new(right))
    }

    fn not(&mut self, node: Node) -> Node {
        Node::Not(Box::new(node))
    }
}

///
/// ColumnResolver
///
/// Resolves attributes to bare column names, optionally restricted to one
/// entity.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct ColumnResolver {
    entity: Option<&'static str>,
}

impl ColumnResolver {
    #[must_use]
    pub const fn new() -> Self {
        Self { entity: None }
    }

    #[must_use]
    pub const fn for_entity(entity: &'static str) -> Self {
        Self {
            entity: Some(entity),
        }
    }
}

impl PathResolver<ExprBuilder> for ColumnResolver {
    fn resolve(
        &self,
        _builder: &mut ExprBuilder,
        attribute: &Attribute,
    ) -> Result<Expr, CompileError> {
        match self.entity {
            Some(entity) if entity != attribute.entity() => {
                Err(CompileError::UnresolvedAttribute {
                    attribute: attribute.qualified_name(),
                })
            }
            _ => Ok(Expr::Column(attribute.column().to_string())),
        }
    }
}
