//! Core sink trait

use crate::{Error, Level, Record, Result};
use serde::Deserialize;
use serde_json::Value;

/// Whether the sink chain should keep going after a sink has taken a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Hand the record to the next sink in the chain
    Continue,
    /// Stop the chain; later sinks never see the record
    Halt,
}

/// A component that receives a finished log record and delivers it to a
/// destination.
///
/// Sinks are invoked in channel-configuration order. A sink that returns
/// [`Propagation::Halt`] stops the chain, so ordering is semantically
/// significant.
pub trait Sink: Send + Sync {
    /// Deliver a record. `rendered` is the record as produced by the sink's
    /// bound formatter (or the engine default when none is bound).
    fn deliver(&self, record: &Record, rendered: &str) -> Result<Propagation>;

    /// Whether this sink accepts records at `level`. Disabled levels are
    /// skipped without affecting propagation.
    fn is_enabled(&self, _level: Level) -> bool {
        true
    }

    /// Flush any buffered output
    fn flush(&self) -> Result<()> {
        Ok(())
    }
}
impl std::fmt::Debug for dyn Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Sink")
    }
}


/// Deserialize a component parameter bag into its typed parameter struct.
///
/// A missing bag (JSON `null`) deserializes every field to its default.
pub(crate) fn parse_params<T: serde::de::DeserializeOwned + Default>(params: Value) -> Result<T> {
    if params.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(params).map_err(|e| Error::InvalidParams(e.to_string()))
}

/// Sink that discards every record
#[derive(Debug, Default)]
pub struct NullSink {
    propagate: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct NullSinkParams {
    propagate: bool,
}

impl Default for NullSinkParams {
    fn default() -> Self {
        Self { propagate: true }
    }
}

impl NullSink {
    /// Create a null sink that lets records propagate onward
    pub fn new() -> Self {
        Self { propagate: true }
    }

    /// Control whether records propagate past this sink
    pub fn with_propagate(mut self, propagate: bool) -> Self {
        self.propagate = propagate;
        self
    }

    /// Build from a configuration parameter bag
    pub fn from_params(params: Value) -> Result<Self> {
        let params: NullSinkParams = parse_params(params)?;
        Ok(Self {
            propagate: params.propagate,
        })
    }
}

impl Sink for NullSink {
    fn deliver(&self, _record: &Record, _rendered: &str) -> Result<Propagation> {
        if self.propagate {
            Ok(Propagation::Continue)
        } else {
            Ok(Propagation::Halt)
        }
    }
}
