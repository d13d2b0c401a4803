use crate::{
    compile::CompileError,
    model::{Attribute, Field},
    predicate::{Inclusion, PredicateKind, eval, fingerprint, operand},
    value::Value,
};
use std::fmt;

///
/// Operands
///
/// Zero, one, or two operands; the kind decides which is legal.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Operands {
    None,
    One(Value),
    Two(Value, Value),
}

impl Operands {
    #[must_use]
    pub const fn arity(&self) -> usize {
        match self {
            Self::None => 0,
            Self::One(_) => 1,
            Self::Two(..) => 2,
        }
    }

    /// Render operand types for diagnostics.
    #[must_use]
    pub fn type_string(&self) -> String {
        match self {
            Self::None => "no operands".to_string(),
            Self::One(value) => value.type_string(),
            Self::Two(first, second) => {
                format!("({}, {})", first.type_string(), second.type_string())
            }
        }
    }
}

///
/// Predicate
///
/// Immutable condition over one attribute of entity `E`.
///
/// `Predicate::new` accepts untyped operands and is the single point where
/// external input enters the model; operand contracts are enforced by
/// `validate`, the compiler, and in-memory evaluation alike.
///

pub struct Predicate<E: 'static> {
    field: &'static dyn Field<E>,
    kind: PredicateKind,
    operands: Operands,
    inclusion: Inclusion,
}

impl<E: 'static> Predicate<E> {
    #[must_use]
    pub const fn new(
        field: &'static dyn Field<E>,
        kind: PredicateKind,
        operands: Operands,
    ) -> Self {
        Self {
            field,
            kind,
            operands,
            inclusion: Inclusion::StartInclusiveEndInclusive,
        }
    }

    /// Set the boundary mode; only BETWEEN and NOT_BETWEEN read it.
    #[must_use]
    pub const fn with_inclusion(mut self, inclusion: Inclusion) -> Self {
        self.inclusion = inclusion;
        self
    }

    #[must_use]
    pub const fn field(&self) -> &'static dyn Field<E> {
        self.field
    }

    #[must_use]
    pub fn attribute(&self) -> &Attribute {
        self.field.attribute()
    }

    #[must_use]
    pub const fn kind(&self) -> PredicateKind {
        self.kind
    }

    #[must_use]
    pub const fn operands(&self) -> &Operands {
        &self.operands
    }

    #[must_use]
    pub const fn inclusion(&self) -> Inclusion {
        self.inclusion
    }

    /// Check the operands against the kind's contract without compiling.
    pub fn validate(&self) -> Result<(), CompileError> {
        operand::check(self.kind, self.attribute(), &self.operands).map(|_| ())
    }

    /// The predicate matching the complementary rows, same operands and inclusion.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self {
            field: self.field,
            kind: self.kind.complement(),
            operands: self.operands.clone(),
            inclusion: self.inclusion,
        }
    }

    /// Evaluate in memory against one entity.
    pub fn test(&self, entity: &E) -> Result<bool, CompileError> {
        eval::eval_predicate(self, entity)
    }

    /// Stable SHA-256 fingerprint of attribute, kind, operands and inclusion.
    #[must_use]
    pub fn fingerprint(&self) -> [u8; 32] {
        fingerprint::fingerprint_predicate(self)
    }
}

// Manual impls: no bounds on `E`.
impl<E: 'static> Clone for Predicate<E> {
    fn clone(&self) -> Self {
        Self {
            field: self.field,
            kind: self.kind,
            operands: self.operands.clone(),
            inclusion: self.inclusion,
        }
    }
}

impl<E: 'static> PartialEq for Predicate<E> {
    fn eq(&self, other: &Self) -> bool {
        self.attribute() == other.attribute()
            && self.kind == other.kind
            && self.operands == other.operands
            && self.inclusion == other.inclusion
    }
}

impl<E: 'static> fmt::Debug for Predicate<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("attribute", &self.attribute().qualified_name())
            .field("kind", &self.kind)
            .field("operands", &self.operands)
            .field("inclusion", &self.inclusion)
            .finish()
    }
}

impl<E: 'static> fmt::Display for Predicate<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.attribute().qualified_name(), self.kind)?;
        match &self.operands {
            Operands::None => Ok(()),
            Operands::One(value) => write!(f, " {value}"),
            Operands::Two(first, second) => {
                write!(f, " {first} AND {second} ({:?})", self.inclusion)
            }
        }
    }
}
