//! Core logging engine for loghub
//!
//! This crate provides the building blocks a logging channel is assembled
//! from: severity levels, structured log records, and the `Sink`,
//! `Formatter`, and `Processor` capability traits, together with the
//! built-in implementations of each and the `Channel` pipeline that wires
//! them together at log time.

#![warn(missing_docs, unreachable_pub)]
#![forbid(unsafe_code)]

mod channel;
mod context;
mod error;
mod file;
mod formatter;
mod level;
mod memory;
mod processor;
mod record;
mod sink;
mod stdout;

pub use channel::{BoundSink, Channel};
pub use context::Context;
pub use error::{Error, Result};
pub use file::FileSink;
pub use formatter::{Formatter, JsonFormatter, PlainTextFormatter};
pub use level::{Level, ParseLevelError};
pub use memory::{CapturedRecord, MemorySink};
pub use processor::{Processor, ProcessIdProcessor, TagsProcessor, UidProcessor};
pub use record::Record;
pub use sink::{NullSink, Propagation, Sink};
pub use stdout::{StderrSink, StdoutSink};
