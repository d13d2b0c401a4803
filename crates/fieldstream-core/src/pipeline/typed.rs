//! Module: pipeline::typed
//! Responsibility: typed pipeline builder that records operations while
//! composing an in-memory executor.
//! Does not own: operation validation, which stays with `OperationFactory`.
//! Boundary: `freeze` hands out an immutable, shareable `FrozenPipeline`.

use crate::{
    error::Error,
    model::FieldComparator,
    pipeline::{
        FrozenOperations, Operation, OperationFactory, OperationKind, OperationSequence,
        PipelineExplain, StreamShape,
    },
    predicate::Predicate,
};
use std::{cmp::Ordering, collections::HashSet, fmt, hash::Hash, sync::Arc};

type BoxIter<T> = Box<dyn Iterator<Item = T>>;
type Stage<S, T> = Arc<dyn Fn(BoxIter<S>) -> BoxIter<T> + Send + Sync>;

///
/// Pipeline
///
/// Builder from source elements `S` to current elements `T`.
/// Every step is validated when it is added; a builder that exists is
/// always a well-formed pipeline.
///

pub struct Pipeline<S, T> {
    stage: Stage<S, T>,
    operations: OperationSequence,
}

impl<S: 'static> Pipeline<S, S> {
    /// Empty pipeline over element-shaped sources.
    #[must_use]
    pub fn new() -> Self {
        Self::over(StreamShape::Elements)
    }

    /// Empty pipeline over a source of the given shape.
    #[must_use]
    pub fn over(source: StreamShape) -> Self {
        Self {
            stage: Arc::new(|source: BoxIter<S>| source),
            operations: OperationSequence::new(source),
        }
    }
}

impl<S, T> fmt::Debug for Pipeline<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("operations", &self.operations)
            .finish_non_exhaustive()
    }
}

impl<S: 'static> Default for Pipeline<S, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: 'static, T: 'static> Pipeline<S, T> {
    #[must_use]
    pub const fn operations(&self) -> &OperationSequence {
        &self.operations
    }

    #[must_use]
    pub fn shape(&self) -> StreamShape {
        self.operations.output()
    }

    fn factory(&self) -> OperationFactory<T> {
        OperationFactory::new(self.shape())
    }

    fn then<U, N>(self, operation: Operation, next: N) -> Result<Pipeline<S, U>, Error>
    where
        U: 'static,
        N: Fn(BoxIter<T>) -> BoxIter<U> + Send + Sync + 'static,
    {
        let mut operations = self.operations;
        operations.push(operation)?;

        let previous = self.stage;

        Ok(Pipeline {
            stage: Arc::new(move |source: BoxIter<S>| next(previous(source))),
            operations,
        })
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn filter<F>(self, predicate: F) -> Result<Self, Error>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let predicate = Arc::new(predicate);
        let operation = self
            .factory()
            .predicate_step(OperationKind::Filter, Arc::clone(&predicate))?;

        self.then(operation, move |source| {
            let predicate = Arc::clone(&predicate);
            Box::new(source.filter(move |item| predicate(item)))
        })
    }

    /// Filter by a field predicate. The predicate is validated here and
    /// stays recoverable through `Operation::field_predicate`.
    pub fn filter_by(self, predicate: Predicate<T>) -> Result<Self, Error> {
        let predicate = Arc::new(predicate);
        let operation = self.factory().field_predicate_step(Arc::clone(&predicate))?;

        self.then(operation, move |source| {
            let predicate = Arc::clone(&predicate);
            Box::new(source.filter(move |item| predicate.test(item).unwrap_or(false)))
        })
    }

    /// Pass elements until the first one failing `predicate`, then stop.
    pub fn take_while<F>(self, predicate: F) -> Result<Self, Error>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let predicate = Arc::new(predicate);
        let operation = self
            .factory()
            .predicate_step(OperationKind::TakeWhile, Arc::clone(&predicate))?;

        self.then(operation, move |source| {
            let predicate = Arc::clone(&predicate);
            Box::new(source.take_while(move |item| predicate(item)))
        })
    }

    /// Drop elements until the first one failing `predicate`, then pass
    /// everything that follows unconditionally.
    pub fn drop_while<F>(self, predicate: F) -> Result<Self, Error>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let predicate = Arc::new(predicate);
        let operation = self
            .factory()
            .predicate_step(OperationKind::DropWhile, Arc::clone(&predicate))?;

        self.then(operation, move |source| {
            let predicate = Arc::clone(&predicate);
            Box::new(source.skip_while(move |item| predicate(item)))
        })
    }

    pub fn limit(self, max_size: i64) -> Result<Self, Error> {
        let operation = self.factory().create_limit(max_size)?;
        let count = to_usize(operation.count());

        self.then(operation, move |source| Box::new(source.take(count)))
    }

    pub fn skip(self, n: i64) -> Result<Self, Error> {
        let operation = self.factory().create_skip(n)?;
        let count = to_usize(operation.count());

        self.then(operation, move |source| Box::new(source.skip(count)))
    }

    // ------------------------------------------------------------------
    // Side effects
    // ------------------------------------------------------------------

    pub fn peek<F>(self, action: F) -> Result<Self, Error>
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let action = Arc::new(action);
        let operation = self.factory().action_step(Arc::clone(&action))?;

        self.then(operation, move |source| {
            let action = Arc::clone(&action);
            Box::new(source.inspect(move |item| action(item)))
        })
    }

    // ------------------------------------------------------------------
    // Ordering
    // ------------------------------------------------------------------

    pub fn sorted_by<F>(self, comparator: F) -> Result<Self, Error>
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        let comparator = Arc::new(comparator);
        let operation = self.factory().comparator_step(Arc::clone(&comparator))?;

        self.then(operation, move |source| {
            let mut items: Vec<T> = source.collect();
            items.sort_by(|a, b| comparator(a, b));
            Box::new(items.into_iter())
        })
    }

    /// Stable sort by one attribute. The comparator stays recoverable
    /// through `Operation::field_comparator`.
    pub fn sorted_by_field(self, comparator: FieldComparator<T>) -> Result<Self, Error> {
        let comparator = Arc::new(comparator);
        let operation = self.factory().field_comparator_step(Arc::clone(&comparator))?;

        self.then(operation, move |source| {
            let mut items: Vec<T> = source.collect();
            items.sort_by(|a, b| comparator.compare(a, b));
            Box::new(items.into_iter())
        })
    }

    // ------------------------------------------------------------------
    // Mapping
    // ------------------------------------------------------------------

    pub fn map<U, F>(self, mapper: F) -> Result<Pipeline<S, U>, Error>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        self.map_into(OperationKind::Map, StreamShape::Elements, mapper)
    }

    pub fn map_to_int<F>(self, mapper: F) -> Result<Pipeline<S, i32>, Error>
    where
        F: Fn(T) -> i32 + Send + Sync + 'static,
    {
        self.map_into(OperationKind::MapToPrimitive, StreamShape::Int, mapper)
    }

    pub fn map_to_long<F>(self, mapper: F) -> Result<Pipeline<S, i64>, Error>
    where
        F: Fn(T) -> i64 + Send + Sync + 'static,
    {
        self.map_into(OperationKind::MapToPrimitive, StreamShape::Long, mapper)
    }

    pub fn map_to_double<F>(self, mapper: F) -> Result<Pipeline<S, f64>, Error>
    where
        F: Fn(T) -> f64 + Send + Sync + 'static,
    {
        self.map_into(OperationKind::MapToPrimitive, StreamShape::Double, mapper)
    }

    pub fn flat_map<U, I, F>(self, mapper: F) -> Result<Pipeline<S, U>, Error>
    where
        U: 'static,
        I: IntoIterator<Item = U> + 'static,
        I::IntoIter: 'static,
        F: Fn(T) -> I + Send + Sync + 'static,
    {
        self.flat_map_into(OperationKind::FlatMap, StreamShape::Elements, mapper)
    }

    pub fn flat_map_to_int<I, F>(self, mapper: F) -> Result<Pipeline<S, i32>, Error>
    where
        I: IntoIterator<Item = i32> + 'static,
        I::IntoIter: 'static,
        F: Fn(T) -> I + Send + Sync + 'static,
    {
        self.flat_map_into(OperationKind::FlatMapToPrimitive, StreamShape::Int, mapper)
    }

    pub fn flat_map_to_long<I, F>(self, mapper: F) -> Result<Pipeline<S, i64>, Error>
    where
        I: IntoIterator<Item = i64> + 'static,
        I::IntoIter: 'static,
        F: Fn(T) -> I + Send + Sync + 'static,
    {
        self.flat_map_into(OperationKind::FlatMapToPrimitive, StreamShape::Long, mapper)
    }

    pub fn flat_map_to_double<I, F>(self, mapper: F) -> Result<Pipeline<S, f64>, Error>
    where
        I: IntoIterator<Item = f64> + 'static,
        I::IntoIter: 'static,
        F: Fn(T) -> I + Send + Sync + 'static,
    {
        self.flat_map_into(OperationKind::FlatMapToPrimitive, StreamShape::Double, mapper)
    }

    fn map_into<U, F>(
        self,
        kind: OperationKind,
        output: StreamShape,
        mapper: F,
    ) -> Result<Pipeline<S, U>, Error>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let mapper = Arc::new(mapper);
        let operation = self.factory().mapper_step(kind, output, Arc::clone(&mapper))?;

        self.then(operation, move |source| {
            let mapper = Arc::clone(&mapper);
            Box::new(source.map(move |item| mapper(item)))
        })
    }

    fn flat_map_into<U, I, F>(
        self,
        kind: OperationKind,
        output: StreamShape,
        mapper: F,
    ) -> Result<Pipeline<S, U>, Error>
    where
        U: 'static,
        I: IntoIterator<Item = U> + 'static,
        I::IntoIter: 'static,
        F: Fn(T) -> I + Send + Sync + 'static,
    {
        let mapper = Arc::new(mapper);
        let operation = self.factory().flat_mapper_step(kind, output, Arc::clone(&mapper))?;

        self.then(operation, move |source| {
            let mapper = Arc::clone(&mapper);
            Box::new(source.flat_map(move |item| mapper(item)))
        })
    }

    #[must_use]
    pub fn freeze(self) -> FrozenPipeline<S, T> {
        FrozenPipeline {
            stage: self.stage,
            operations: self.operations.freeze(),
        }
    }
}

impl<S: 'static, T: Eq + Hash + Clone + 'static> Pipeline<S, T> {
    /// Keep the first occurrence of each element.
    pub fn distinct(self) -> Result<Self, Error> {
        let operation = self.factory().create_distinct()?;

        self.then(operation, |source| {
            let mut seen = HashSet::new();
            Box::new(source.filter(move |item| seen.insert(item.clone())))
        })
    }
}

impl<S: 'static, T: Ord + 'static> Pipeline<S, T> {
    /// Natural order; stable.
    pub fn sorted(self) -> Result<Self, Error> {
        let operation = self.factory().create_sorted()?;

        self.then(operation, |source| {
            let mut items: Vec<T> = source.collect();
            items.sort();
            Box::new(items.into_iter())
        })
    }
}

fn to_usize(count: Option<u64>) -> usize {
    count.map_or(0, |count| usize::try_from(count).unwrap_or(usize::MAX))
}

///
/// FrozenPipeline
///
/// Immutable pipeline: shareable across threads and executable any number
/// of times.
///

pub struct FrozenPipeline<S, T> {
    stage: Stage<S, T>,
    operations: FrozenOperations,
}

impl<S: 'static, T: 'static> FrozenPipeline<S, T> {
    #[must_use]
    pub const fn operations(&self) -> &FrozenOperations {
        &self.operations
    }

    #[must_use]
    pub fn explain(&self) -> PipelineExplain {
        self.operations.explain()
    }

    /// Run the pipeline over one source.
    pub fn execute<I>(&self, source: I) -> Vec<T>
    where
        I: IntoIterator<Item = S>,
        I::IntoIter: 'static,
    {
        (self.stage)(Box::new(source.into_iter())).collect()
    }
}

impl<S, T> fmt::Debug for FrozenPipeline<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrozenPipeline")
            .field("operations", &self.operations)
            .finish_non_exhaustive()
    }
}

impl<S, T> Clone for FrozenPipeline<S, T> {
    fn clone(&self) -> Self {
        Self {
            stage: Arc::clone(&self.stage),
            operations: self.operations.clone(),
        }
    }
}
