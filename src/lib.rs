//! Turns JVM garbage collection logs into a timeline of typed events and run-level
//! statistics.
//!
//! Lines flow through the preprocessor (multi-line merge), the recognizer
//! (classification), the hydrator (field extraction) and the aggregator, which freezes
//! the result into a [`JvmRun`].

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod gc;
pub mod logging;
pub mod pipeline;
pub mod run;
pub mod summary;

pub use error::{AppError, Result};
pub use gc::{EventType, LogEvent};
pub use pipeline::{parse_lines, parse_reader, EventStream, Ingest};
pub use run::JvmRun;
