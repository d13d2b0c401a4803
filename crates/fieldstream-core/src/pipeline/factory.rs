use crate::{
    error::Error,
    model::FieldComparator,
    pipeline::{Callable, Capability, ConstructionError, Operation, OperationKind, StreamShape},
    predicate::Predicate,
};
use std::{cmp::Ordering, fmt, hash::Hash, marker::PhantomData, sync::Arc};

///
/// OperationFactory
///
/// Entry points for creating operations over elements of type `T` arriving
/// in one input shape. Every entry point validates eagerly; the primitive
/// output shape of the `*_to_*` steps is chosen by the entry point, never
/// inferred. Capabilities are typed against `T`, so a callable that does
/// not fit its operation kind is rejected by the compiler.
///

pub struct OperationFactory<T> {
    input: StreamShape,
    _marker: PhantomData<fn() -> T>,
}

impl<T> OperationFactory<T> {
    #[must_use]
    pub const fn new(input: StreamShape) -> Self {
        Self {
            input,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub const fn input(&self) -> StreamShape {
        self.input
    }

    fn create(
        &self,
        kind: OperationKind,
        output: StreamShape,
        capability: Capability,
    ) -> Result<Operation, ConstructionError> {
        Operation::new(kind, self.input, output, capability)
    }

    fn same_shape(
        &self,
        kind: OperationKind,
        capability: Capability,
    ) -> Result<Operation, ConstructionError> {
        self.create(kind, self.input, capability)
    }

    fn counted(&self, kind: OperationKind, count: i64) -> Result<Operation, ConstructionError> {
        let count =
            u64::try_from(count).map_err(|_| ConstructionError::NegativeCount { kind, count })?;

        self.same_shape(kind, Capability::Count(count))
    }

    /// Negative limits are rejected; zero is legal and yields nothing.
    pub fn create_limit(&self, max_size: i64) -> Result<Operation, ConstructionError> {
        self.counted(OperationKind::Limit, max_size)
    }

    pub fn create_skip(&self, n: i64) -> Result<Operation, ConstructionError> {
        self.counted(OperationKind::Skip, n)
    }
}

impl<T> Clone for OperationFactory<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for OperationFactory<T> {}

impl<T> Default for OperationFactory<T> {
    fn default() -> Self {
        Self::new(StreamShape::default())
    }
}

impl<T> fmt::Debug for OperationFactory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationFactory")
            .field("element", &std::any::type_name::<T>())
            .field("input", &self.input)
            .finish()
    }
}

impl<T> PartialEq for OperationFactory<T> {
    fn eq(&self, other: &Self) -> bool {
        self.input == other.input
    }
}

impl<T> Eq for OperationFactory<T> {}

impl<T: 'static> OperationFactory<T> {
    // Shared-callable steps; `Pipeline` keeps the same `Arc` for execution.

    pub(crate) fn predicate_step<F>(
        &self,
        kind: OperationKind,
        predicate: Arc<F>,
    ) -> Result<Operation, ConstructionError>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.same_shape(kind, Capability::Predicate(Callable::from_arc(predicate)))
    }

    pub(crate) fn field_predicate_step(
        &self,
        predicate: Arc<Predicate<T>>,
    ) -> Result<Operation, Error> {
        predicate.validate()?;

        let capability = Capability::Predicate(Callable::from_arc(predicate));

        Ok(self.same_shape(OperationKind::Filter, capability)?)
    }

    pub(crate) fn comparator_step<F>(
        &self,
        comparator: Arc<F>,
    ) -> Result<Operation, ConstructionError>
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        let capability = Capability::Comparator(Callable::from_arc(comparator));

        self.same_shape(OperationKind::Sorted, capability)
    }

    pub(crate) fn field_comparator_step(
        &self,
        comparator: Arc<FieldComparator<T>>,
    ) -> Result<Operation, ConstructionError> {
        let capability = Capability::Comparator(Callable::from_arc(comparator));

        self.same_shape(OperationKind::Sorted, capability)
    }

    pub(crate) fn action_step<F>(&self, action: Arc<F>) -> Result<Operation, ConstructionError>
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.same_shape(OperationKind::Peek, Capability::Action(Callable::from_arc(action)))
    }

    pub(crate) fn mapper_step<U, F>(
        &self,
        kind: OperationKind,
        output: StreamShape,
        mapper: Arc<F>,
    ) -> Result<Operation, ConstructionError>
    where
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        self.create(kind, output, Capability::Mapper(Callable::from_arc(mapper)))
    }

    pub(crate) fn flat_mapper_step<U, I, F>(
        &self,
        kind: OperationKind,
        output: StreamShape,
        mapper: Arc<F>,
    ) -> Result<Operation, ConstructionError>
    where
        I: IntoIterator<Item = U>,
        F: Fn(T) -> I + Send + Sync + 'static,
    {
        self.create(kind, output, Capability::Mapper(Callable::from_arc(mapper)))
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn create_filter<F>(&self, predicate: F) -> Result<Operation, ConstructionError>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.predicate_step(OperationKind::Filter, Arc::new(predicate))
    }

    /// Filter by a field predicate, validated here and recoverable through
    /// `Operation::field_predicate`.
    pub fn create_filter_by(&self, predicate: Predicate<T>) -> Result<Operation, Error> {
        self.field_predicate_step(Arc::new(predicate))
    }

    pub fn create_take_while<F>(&self, predicate: F) -> Result<Operation, ConstructionError>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.predicate_step(OperationKind::TakeWhile, Arc::new(predicate))
    }

    pub fn create_drop_while<F>(&self, predicate: F) -> Result<Operation, ConstructionError>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.predicate_step(OperationKind::DropWhile, Arc::new(predicate))
    }

    // ------------------------------------------------------------------
    // Ordering and side effects
    // ------------------------------------------------------------------

    pub fn create_sorted_by<F>(&self, comparator: F) -> Result<Operation, ConstructionError>
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        self.comparator_step(Arc::new(comparator))
    }

    /// Attribute order, recoverable through `Operation::field_comparator`.
    pub fn create_sorted_by_field(
        &self,
        comparator: FieldComparator<T>,
    ) -> Result<Operation, ConstructionError> {
        self.field_comparator_step(Arc::new(comparator))
    }

    pub fn create_peek<F>(&self, action: F) -> Result<Operation, ConstructionError>
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.action_step(Arc::new(action))
    }

    // ------------------------------------------------------------------
    // Mapping
    // ------------------------------------------------------------------

    pub fn create_map<U, F>(&self, mapper: F) -> Result<Operation, ConstructionError>
    where
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        self.mapper_step(OperationKind::Map, StreamShape::Elements, Arc::new(mapper))
    }

    pub fn create_map_to_int<F>(&self, mapper: F) -> Result<Operation, ConstructionError>
    where
        F: Fn(T) -> i32 + Send + Sync + 'static,
    {
        self.mapper_step(OperationKind::MapToPrimitive, StreamShape::Int, Arc::new(mapper))
    }

    pub fn create_map_to_long<F>(&self, mapper: F) -> Result<Operation, ConstructionError>
    where
        F: Fn(T) -> i64 + Send + Sync + 'static,
    {
        self.mapper_step(OperationKind::MapToPrimitive, StreamShape::Long, Arc::new(mapper))
    }

    pub fn create_map_to_double<F>(&self, mapper: F) -> Result<Operation, ConstructionError>
    where
        F: Fn(T) -> f64 + Send + Sync + 'static,
    {
        self.mapper_step(OperationKind::MapToPrimitive, StreamShape::Double, Arc::new(mapper))
    }

    pub fn create_flat_map<U, I, F>(&self, mapper: F) -> Result<Operation, ConstructionError>
    where
        I: IntoIterator<Item = U>,
        F: Fn(T) -> I + Send + Sync + 'static,
    {
        let mapper = Arc::new(mapper);

        self.flat_mapper_step(OperationKind::FlatMap, StreamShape::Elements, mapper)
    }

    pub fn create_flat_map_to_int<I, F>(&self, mapper: F) -> Result<Operation, ConstructionError>
    where
        I: IntoIterator<Item = i32>,
        F: Fn(T) -> I + Send + Sync + 'static,
    {
        let mapper = Arc::new(mapper);

        self.flat_mapper_step(OperationKind::FlatMapToPrimitive, StreamShape::Int, mapper)
    }

    pub fn create_flat_map_to_long<I, F>(&self, mapper: F) -> Result<Operation, ConstructionError>
    where
        I: IntoIterator<Item = i64>,
        F: Fn(T) -> I + Send + Sync + 'static,
    {
        let mapper = Arc::new(mapper);

        self.flat_mapper_step(OperationKind::FlatMapToPrimitive, StreamShape::Long, mapper)
    }

    pub fn create_flat_map_to_double<I, F>(&self, mapper: F) -> Result<Operation, ConstructionError>
    where
        I: IntoIterator<Item = f64>,
        F: Fn(T) -> I + Send + Sync + 'static,
    {
        let mapper = Arc::new(mapper);

        self.flat_mapper_step(OperationKind::FlatMapToPrimitive, StreamShape::Double, mapper)
    }
}

impl<T: Eq + Hash + 'static> OperationFactory<T> {
    pub fn create_distinct(&self) -> Result<Operation, ConstructionError> {
        self.same_shape(OperationKind::Distinct, Capability::None)
    }
}

impl<T: Ord + 'static> OperationFactory<T> {
    /// Natural order.
    pub fn create_sorted(&self) -> Result<Operation, ConstructionError> {
        self.same_shape(OperationKind::Sorted, Capability::None)
    }
}
