//! In-memory capture sink
//!
//! Captures every delivered record in a shared buffer. Useful for asserting
//! on pipeline output in tests, and registered as the `memory` sink type.

use crate::sink::parse_params;
use crate::{Context, Level, Propagation, Record, Result, Sink};
use serde::Deserialize;
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// A captured record together with its rendered form
#[derive(Debug, Clone)]
pub struct CapturedRecord {
    /// Severity of the captured record
    pub level: Level,
    /// Channel that produced the record
    pub channel: String,
    /// The raw message
    pub message: String,
    /// Context after all processors ran
    pub context: Context,
    /// The line produced by the bound formatter
    pub rendered: String,
}

/// Sink that captures all records in memory.
///
/// Cloning yields a handle onto the same buffer, so a clone kept outside
/// the channel can observe everything the channel delivered.
#[derive(Clone)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<CapturedRecord>>>,
    min_level: Level,
    propagate: bool,
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct MemoryParams {
    level: Level,
    propagate: bool,
}

impl Default for MemoryParams {
    fn default() -> Self {
        Self {
            level: Level::Debug,
            propagate: true,
        }
    }
}

impl MemorySink {
    /// Create a new capture sink
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            min_level: Level::Debug,
            propagate: true,
        }
    }

    /// Create with a specific minimum level
    pub fn with_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Control whether records propagate past this sink
    pub fn with_propagate(mut self, propagate: bool) -> Self {
        self.propagate = propagate;
        self
    }

    /// Build from a configuration parameter bag
    pub fn from_params(params: Value) -> Result<Self> {
        let params: MemoryParams = parse_params(params)?;
        Ok(Self::new()
            .with_level(params.level)
            .with_propagate(params.propagate))
    }

    /// All captured records, in delivery order
    pub fn entries(&self) -> Vec<CapturedRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// All rendered lines, in delivery order
    pub fn rendered(&self) -> Vec<String> {
        self.entries().into_iter().map(|r| r.rendered).collect()
    }

    /// Check if any captured record's message or rendered line contains `text`
    pub fn contains(&self, text: &str) -> bool {
        self.entries()
            .iter()
            .any(|r| r.message.contains(text) || r.rendered.contains(text))
    }

    /// Number of captured records
    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// Whether nothing has been captured yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear captured records
    pub fn clear(&self) {
        if let Ok(mut records) = self.records.lock() {
            records.clear();
        }
    }
}

impl Sink for MemorySink {
    fn deliver(&self, record: &Record, rendered: &str) -> Result<Propagation> {
        if let Ok(mut records) = self.records.lock() {
            records.push(CapturedRecord {
                level: record.level,
                channel: record.channel.clone(),
                message: record.message.clone(),
                context: record.context.clone(),
                rendered: rendered.to_string(),
            });
        }
        if self.propagate {
            Ok(Propagation::Continue)
        } else {
            Ok(Propagation::Halt)
        }
    }

    fn is_enabled(&self, level: Level) -> bool {
        level >= self.min_level
    }
}
