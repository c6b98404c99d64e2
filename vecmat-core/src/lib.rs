mod error;
mod matrix;
pub mod ops;
pub mod trace;
mod tracker;
mod vector;

pub use error::{LinalgError, Result};
pub use matrix::Matrix;
pub use trace::{Event, Id, Kind, LogSink, NullSink, RecordingSink, TraceSink};
pub use tracker::Tracker;
pub use vector::Vector;
