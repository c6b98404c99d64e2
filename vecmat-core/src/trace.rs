//! Lifecycle and operator events.
//!
//! Every construction, drop and operator invocation on a [`Vector`] or
//! [`Matrix`] produces exactly one [`Event`], which the owning
//! [`Tracker`] hands to its [`TraceSink`]. The arithmetic itself lives in
//! [`crate::ops`] and never sees a sink.
//!
//! [`Vector`]: crate::Vector
//! [`Matrix`]: crate::Matrix
//! [`Tracker`]: crate::Tracker

use std::fmt;
use std::sync::Mutex;

/// Target used for every trace line sent through `log`.
pub const LOG_TARGET: &str = "vecmat::trace";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(pub(crate) usize);

impl Id {
    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Vector,
    Matrix,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::Vector => "vector",
            Kind::Matrix => "matrix",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Operand {
    pub kind: Kind,
    pub id: Id,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    Default,
    Sized(usize),
    Copy(Id),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Dot,
}

/// Which side of the `*` the scalar was written on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Created { operand: Operand, origin: Origin },
    Dropped(Operand),
    Binary { op: BinOp, lhs: Operand, rhs: Operand },
    Negate(Operand),
    Scale { operand: Operand, factor: f64, side: Side },
    Assign { target: Operand, source: Operand },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Created { operand, origin } => match (origin, operand.kind) {
                (Origin::Default, _) => write!(f, "{operand} created by default"),
                (Origin::Sized(n), Kind::Vector) => {
                    write!(f, "{operand} created with dimension {n}")
                }
                (Origin::Sized(n), Kind::Matrix) => write!(f, "{operand} created {n}x{n}"),
                (Origin::Copy(src), _) => write!(f, "{operand} created by copy from {src}"),
            },
            Event::Dropped(operand) => write!(f, "{operand} dropped"),
            Event::Binary { op, lhs, rhs } => match op {
                BinOp::Add => write!(f, "{lhs} + {rhs}"),
                BinOp::Sub => write!(f, "{lhs} - {rhs}"),
                BinOp::Mul => write!(f, "{lhs} * {rhs}"),
                BinOp::Dot => write!(f, "{lhs} * {rhs} (dot)"),
            },
            Event::Negate(operand) => write!(f, "-{operand}"),
            Event::Scale { operand, factor, side: Side::Left } => write!(f, "{factor} * {operand}"),
            Event::Scale { operand, factor, side: Side::Right } => write!(f, "{operand} * {factor}"),
            Event::Assign { target, source } => write!(f, "{target} = {source}"),
        }
    }
}

pub trait TraceSink: Send + Sync {
    fn record(&self, event: &Event);
}

/// Forwards events to the `log` facade at info level.
#[derive(Default)]
pub struct LogSink;

impl TraceSink for LogSink {
    fn record(&self, event: &Event) {
        log::info!(target: LOG_TARGET, "{event}");
    }
}

#[derive(Default)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn record(&self, _: &Event) {}
}

/// Keeps every event in memory, in order.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Event>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Event>> {
        // a panicking recorder thread leaves the log itself intact
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TraceSink for RecordingSink {
    fn record(&self, event: &Event) {
        self.lock().push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(id: usize) -> Operand {
        Operand { kind: Kind::Vector, id: Id(id) }
    }

    fn matrix(id: usize) -> Operand {
        Operand { kind: Kind::Matrix, id: Id(id) }
    }

    #[test]
    fn event_lines() {
        let cases = [
            (Event::Created { operand: vector(1), origin: Origin::Default }, "vector #1 created by default"),
            (Event::Created { operand: vector(2), origin: Origin::Sized(3) }, "vector #2 created with dimension 3"),
            (Event::Created { operand: matrix(1), origin: Origin::Sized(2) }, "matrix #1 created 2x2"),
            (Event::Created { operand: vector(4), origin: Origin::Copy(Id(2)) }, "vector #4 created by copy from #2"),
            (Event::Dropped(matrix(7)), "matrix #7 dropped"),
            (Event::Binary { op: BinOp::Dot, lhs: vector(1), rhs: vector(2) }, "vector #1 * vector #2 (dot)"),
            (Event::Binary { op: BinOp::Mul, lhs: matrix(1), rhs: vector(3) }, "matrix #1 * vector #3"),
            (Event::Negate(vector(1)), "-vector #1"),
            (Event::Scale { operand: vector(1), factor: 2.5, side: Side::Left }, "2.5 * vector #1"),
            (Event::Scale { operand: matrix(1), factor: 3.0, side: Side::Right }, "matrix #1 * 3"),
            (Event::Assign { target: vector(5), source: vector(1) }, "vector #5 = vector #1"),
        ];

        for (event, line) in cases {
            assert_eq!(event.to_string(), line);
        }
    }

    #[test]
    fn recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        assert!(sink.is_empty());

        sink.record(&Event::Negate(vector(1)));
        sink.record(&Event::Dropped(vector(1)));

        assert_eq!(sink.events(), vec![Event::Negate(vector(1)), Event::Dropped(vector(1))]);

        sink.clear();
        assert_eq!(sink.len(), 0);
    }
}
