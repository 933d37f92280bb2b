//! Record-enrichment processors

use crate::sink::parse_params;
use crate::{Error, Record, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// A component that enriches or mutates a record's context before the
/// record reaches the sinks. Processors run in channel-configuration order.
pub trait Processor: Send + Sync {
    /// Enrich the record in place
    fn process(&self, record: &mut Record);
}
impl std::fmt::Debug for dyn Processor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Processor")
    }
}


/// Adds a unique identifier, generated once per processor instance, to
/// every record. Useful for correlating all records of one process run.
#[derive(Debug)]
pub struct UidProcessor {
    key: String,
    uid: String,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct UidParams {
    length: usize,
    key: String,
}

impl Default for UidParams {
    fn default() -> Self {
        Self {
            length: 7,
            key: "uid".to_string(),
        }
    }
}

impl UidProcessor {
    /// Create a processor with a fresh 7-character uid under the key `uid`
    pub fn new() -> Self {
        Self::with_length(7, "uid")
    }

    fn with_length(length: usize, key: impl Into<String>) -> Self {
        let length = length.clamp(1, 32);
        let uid = uuid::Uuid::new_v4().simple().to_string();
        Self {
            key: key.into(),
            uid: uid[..length].to_string(),
        }
    }

    /// Build from a configuration parameter bag
    pub fn from_params(params: Value) -> Result<Self> {
        let params: UidParams = parse_params(params)?;
        Ok(Self::with_length(params.length, params.key))
    }

    /// The identifier this processor stamps onto records
    pub fn uid(&self) -> &str {
        &self.uid
    }
}

impl Default for UidProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for UidProcessor {
    fn process(&self, record: &mut Record) {
        record.context.set(self.key.clone(), self.uid.clone());
    }
}

/// Adds the operating system process id under `process_id`
#[derive(Debug, Default)]
pub struct ProcessIdProcessor;

impl ProcessIdProcessor {
    /// Create the processor
    pub fn new() -> Self {
        Self
    }

    /// Build from a configuration parameter bag (takes no parameters)
    pub fn from_params(params: Value) -> Result<Self> {
        #[derive(Debug, Default, Deserialize)]
        #[serde(default, deny_unknown_fields)]
        struct NoParams {}
        let _: NoParams = parse_params(params)?;
        Ok(Self)
    }
}

impl Processor for ProcessIdProcessor {
    fn process(&self, record: &mut Record) {
        record.context.set("process_id", std::process::id());
    }
}

/// Merges a fixed set of tags into every record's context
#[derive(Debug)]
pub struct TagsProcessor {
    tags: IndexMap<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TagsParams {
    tags: IndexMap<String, Value>,
}

impl TagsProcessor {
    /// Create a processor carrying the given tags
    pub fn new(tags: IndexMap<String, Value>) -> Self {
        Self { tags }
    }

    /// Build from a configuration parameter bag; `tags` is required
    pub fn from_params(params: Value) -> Result<Self> {
        if params.is_null() {
            return Err(Error::InvalidParams(
                "tags processor requires a `tags` map".to_string(),
            ));
        }
        let params: TagsParams =
            serde_json::from_value(params).map_err(|e| Error::InvalidParams(e.to_string()))?;
        Ok(Self { tags: params.tags })
    }
}

impl Processor for TagsProcessor {
    fn process(&self, record: &mut Record) {
        for (key, value) in &self.tags {
            record.context.set(key.clone(), value.clone());
        }
    }
}
