use crate::{model::FieldComparator, pipeline::ConstructionError, predicate::Predicate};
use serde::Serialize;
use std::{any::Any, fmt, sync::Arc};

///
/// OperationKind
///
/// Closed set of intermediate stream operations.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationKind {
    Filter,
    Map,
    MapToPrimitive,
    FlatMap,
    FlatMapToPrimitive,
    Distinct,
    Sorted,
    Peek,
    Limit,
    Skip,
    TakeWhile,
    DropWhile,
}

impl OperationKind {
    /// Output shape always equals input shape.
    #[must_use]
    pub const fn preserves_shape(self) -> bool {
        !matches!(
            self,
            Self::Map | Self::MapToPrimitive | Self::FlatMap | Self::FlatMapToPrimitive
        )
    }

    /// Result depends on encounter order, so the step cannot be reordered
    /// across other order-sensitive steps.
    #[must_use]
    pub const fn is_order_sensitive(self) -> bool {
        matches!(
            self,
            Self::Limit | Self::Skip | Self::TakeWhile | Self::DropWhile
        )
    }

    /// May finish without consuming the whole upstream.
    #[must_use]
    pub const fn is_short_circuiting(self) -> bool {
        matches!(self, Self::Limit | Self::TakeWhile)
    }

    /// Per-element, order-independent selection. TAKE_WHILE and DROP_WHILE
    /// take a predicate but are not filters.
    #[must_use]
    pub const fn is_filter_like(self) -> bool {
        matches!(self, Self::Filter)
    }

    /// Capability class this kind requires.
    /// SORTED also accepts `CapabilityClass::None` (natural order).
    #[must_use]
    pub const fn capability_class(self) -> CapabilityClass {
        match self {
            Self::Filter | Self::TakeWhile | Self::DropWhile => CapabilityClass::Predicate,
            Self::Map | Self::MapToPrimitive | Self::FlatMap | Self::FlatMapToPrimitive => {
                CapabilityClass::Mapper
            }
            Self::Distinct => CapabilityClass::None,
            Self::Sorted => CapabilityClass::Comparator,
            Self::Peek => CapabilityClass::Action,
            Self::Limit | Self::Skip => CapabilityClass::Count,
        }
    }

    fn accepts(self, class: CapabilityClass) -> bool {
        match (self, class) {
            (Self::Sorted, CapabilityClass::None | CapabilityClass::Comparator) => true,
            (kind, class) => kind.capability_class() == class,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Filter => "FILTER",
            Self::Map => "MAP",
            Self::MapToPrimitive => "MAP_TO_PRIMITIVE",
            Self::FlatMap => "FLAT_MAP",
            Self::FlatMapToPrimitive => "FLAT_MAP_TO_PRIMITIVE",
            Self::Distinct => "DISTINCT",
            Self::Sorted => "SORTED",
            Self::Peek => "PEEK",
            Self::Limit => "LIMIT",
            Self::Skip => "SKIP",
            Self::TakeWhile => "TAKE_WHILE",
            Self::DropWhile => "DROP_WHILE",
        };

        f.write_str(label)
    }
}

///
/// StreamShape
///
/// Element shape flowing between operations.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize)]
pub enum StreamShape {
    #[default]
    Elements,
    Int,
    Long,
    Double,
}

impl StreamShape {
    #[must_use]
    pub const fn is_primitive(self) -> bool {
        !matches!(self, Self::Elements)
    }
}

impl fmt::Display for StreamShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Elements => "elements",
            Self::Int => "int",
            Self::Long => "long",
            Self::Double => "double",
        };

        f.write_str(label)
    }
}

///
/// Callable
///
/// Opaque shared callable. Planners may inspect its type or downcast it,
/// but never need to invoke it.
///

#[derive(Clone)]
pub struct Callable {
    type_name: &'static str,
    inner: Arc<dyn Any + Send + Sync>,
}

impl Callable {
    #[must_use]
    pub fn new<F: Any + Send + Sync>(callable: F) -> Self {
        Self::from_arc(Arc::new(callable))
    }

    #[must_use]
    pub fn from_arc<F: Any + Send + Sync>(callable: Arc<F>) -> Self {
        Self {
            type_name: std::any::type_name::<F>(),
            inner: callable,
        }
    }

    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Callable").field(&self.type_name).finish()
    }
}

///
/// CapabilityClass
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum CapabilityClass {
    None,
    Predicate,
    Mapper,
    Comparator,
    Action,
    Count,
}

impl fmt::Display for CapabilityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::None => "none",
            Self::Predicate => "predicate",
            Self::Mapper => "mapper",
            Self::Comparator => "comparator",
            Self::Action => "action",
            Self::Count => "count",
        };

        f.write_str(label)
    }
}

///
/// Capability
///
/// What an operation carries besides its kind and shapes.
///

#[derive(Clone, Debug)]
pub enum Capability {
    None,
    Predicate(Callable),
    Mapper(Callable),
    Comparator(Callable),
    Action(Callable),
    Count(u64),
}

impl Capability {
    #[must_use]
    pub const fn class(&self) -> CapabilityClass {
        match self {
            Self::None => CapabilityClass::None,
            Self::Predicate(_) => CapabilityClass::Predicate,
            Self::Mapper(_) => CapabilityClass::Mapper,
            Self::Comparator(_) => CapabilityClass::Comparator,
            Self::Action(_) => CapabilityClass::Action,
            Self::Count(_) => CapabilityClass::Count,
        }
    }

    #[must_use]
    pub const fn callable(&self) -> Option<&Callable> {
        match self {
            Self::Predicate(callable)
            | Self::Mapper(callable)
            | Self::Comparator(callable)
            | Self::Action(callable) => Some(callable),
            Self::None | Self::Count(_) => None,
        }
    }
}

///
/// Operation
///
/// One immutable, validated pipeline step.
///

#[derive(Clone, Debug)]
pub struct Operation {
    kind: OperationKind,
    input: StreamShape,
    output: StreamShape,
    capability: Capability,
}

impl Operation {
    /// Build one operation, checking its capability class and shape transition.
    pub fn new(
        kind: OperationKind,
        input: StreamShape,
        output: StreamShape,
        capability: Capability,
    ) -> Result<Self, ConstructionError> {
        let class = capability.class();
        if !kind.accepts(class) {
            return Err(if class == CapabilityClass::None {
                ConstructionError::MissingCapability {
                    kind,
                    expected: kind.capability_class(),
                }
            } else {
                ConstructionError::CapabilityMismatch {
                    kind,
                    expected: kind.capability_class(),
                    found: class,
                }
            });
        }

        let legal = match kind {
            OperationKind::Map | OperationKind::FlatMap => output == StreamShape::Elements,
            OperationKind::MapToPrimitive | OperationKind::FlatMapToPrimitive => {
                output.is_primitive()
            }
            _ => input == output,
        };
        if !legal {
            return Err(ConstructionError::ShapeTransition {
                kind,
                input,
                output,
            });
        }

        Ok(Self {
            kind,
            input,
            output,
            capability,
        })
    }

    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        self.kind
    }

    #[must_use]
    pub const fn input(&self) -> StreamShape {
        self.input
    }

    #[must_use]
    pub const fn output(&self) -> StreamShape {
        self.output
    }

    #[must_use]
    pub const fn capability(&self) -> &Capability {
        &self.capability
    }

    /// LIMIT/SKIP argument.
    #[must_use]
    pub const fn count(&self) -> Option<u64> {
        match self.capability {
            Capability::Count(count) => Some(count),
            _ => None,
        }
    }

    /// Field predicate carried by a predicate-taking step, when the step
    /// was built from a `Predicate<E>` rather than a closure.
    #[must_use]
    pub fn field_predicate<E: 'static>(&self) -> Option<&Predicate<E>> {
        match &self.capability {
            Capability::Predicate(callable) => callable.downcast_ref::<Predicate<E>>(),
            _ => None,
        }
    }

    /// Attribute comparator carried by a SORTED step built from a
    /// `FieldComparator<E>`.
    #[must_use]
    pub fn field_comparator<E: 'static>(&self) -> Option<&FieldComparator<E>> {
        match &self.capability {
            Capability::Comparator(callable) => callable.downcast_ref::<FieldComparator<E>>(),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}->{}", self.kind, self.input, self.output)?;
        if let Some(count) = self.count() {
            write!(f, " ({count})")?;
        }

        Ok(())
    }
}
