use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use crate::trace::{Event, Id, Kind, LogSink, NullSink, Operand, Origin, RecordingSink, TraceSink};

static GLOBAL: OnceLock<Arc<Tracker>> = OnceLock::new();

#[derive(Default)]
struct Counter {
    created: AtomicUsize,
    dropped: AtomicUsize,
}

impl Counter {
    fn next(&self) -> Id {
        Id(self.created.fetch_add(1, Ordering::Relaxed) + 1)
    }

    fn created(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }

    fn alive(&self) -> usize {
        self.created() - self.dropped.load(Ordering::Relaxed)
    }
}

/// Owns the creation counters for both value types together with the sink
/// their events go to. Every `Vector` and `Matrix` holds a handle to the
/// tracker it was created in, and results of an operation inherit the
/// tracker of their left operand.
pub struct Tracker {
    vectors: Counter,
    matrices: Counter,
    sink: Arc<dyn TraceSink>,
}

impl Tracker {
    pub fn new<S: TraceSink + 'static>(sink: Arc<S>) -> Arc<Self> {
        Arc::new(Self {
            vectors: Counter::default(),
            matrices: Counter::default(),
            sink,
        })
    }

    pub fn logging() -> Arc<Self> {
        Self::new(Arc::new(LogSink))
    }

    pub fn silent() -> Arc<Self> {
        Self::new(Arc::new(NullSink))
    }

    /// Fresh tracker plus a handle on the events it records.
    pub fn recording() -> (Arc<Self>, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        (Self::new(sink.clone()), sink)
    }

    /// Process-wide tracker used by the constructors that take none.
    pub fn global() -> Arc<Self> {
        GLOBAL.get_or_init(Self::logging).clone()
    }

    pub fn vectors_created(&self) -> usize {
        self.vectors.created()
    }

    pub fn matrices_created(&self) -> usize {
        self.matrices.created()
    }

    pub fn vectors_alive(&self) -> usize {
        self.vectors.alive()
    }

    pub fn matrices_alive(&self) -> usize {
        self.matrices.alive()
    }

    pub(crate) fn register(&self, kind: Kind, origin: Origin) -> Id {
        let id = self.counter(kind).next();
        self.emit(Event::Created { operand: Operand { kind, id }, origin });
        id
    }

    pub(crate) fn release(&self, operand: Operand) {
        self.counter(operand.kind).dropped.fetch_add(1, Ordering::Relaxed);
        self.emit(Event::Dropped(operand));
    }

    pub(crate) fn emit(&self, event: Event) {
        self.sink.record(&event);
    }

    fn counter(&self, kind: Kind) -> &Counter {
        match kind {
            Kind::Vector => &self.vectors,
            Kind::Matrix => &self.matrices,
        }
    }
}

impl std::fmt::Debug for Tracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracker")
            .field("vectors_created", &self.vectors_created())
            .field("matrices_created", &self.matrices_created())
            .finish_non_exhaustive()
    }
}
