//! Predicate compile tracing boundary.
//!
//! Tracing is optional, injected by the caller, and must not affect compile results.

use crate::{error::ErrorClass, model::Attribute, predicate::PredicateKind};

///
/// CompileTraceSink
///

pub trait CompileTraceSink: Send + Sync {
    fn on_event(&self, event: CompileTraceEvent);
}

///
/// CompileTraceEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompileTraceEvent {
    Start {
        kind: PredicateKind,
        entity: &'static str,
        column: &'static str,
    },
    Finish {
        kind: PredicateKind,
        strategy: &'static str,
    },
    Error {
        kind: PredicateKind,
        class: ErrorClass,
    },
}

///
/// TraceScope
///
/// One traced compilation: `Start` on open, then exactly one of
/// `Finish` or `Error`.
///

pub(crate) struct TraceScope<'a> {
    sink: &'a dyn CompileTraceSink,
    kind: PredicateKind,
}

impl<'a> TraceScope<'a> {
    fn new(sink: &'a dyn CompileTraceSink, kind: PredicateKind, attribute: &Attribute) -> Self {
        sink.on_event(CompileTraceEvent::Start {
            kind,
            entity: attribute.entity(),
            column: attribute.column(),
        });

        Self { sink, kind }
    }

    pub(crate) fn finish(self, strategy: &'static str) {
        self.sink.on_event(CompileTraceEvent::Finish {
            kind: self.kind,
            strategy,
        });
    }

    pub(crate) fn error(self, class: ErrorClass) {
        self.sink.on_event(CompileTraceEvent::Error {
            kind: self.kind,
            class,
        });
    }
}

pub(crate) fn start_compile_trace<'a>(
    sink: Option<&'a dyn CompileTraceSink>,
    kind: PredicateKind,
    attribute: &Attribute,
) -> Option<TraceScope<'a>> {
    let sink = sink?;

    Some(TraceScope::new(sink, kind, attribute))
}
