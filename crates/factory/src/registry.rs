//! Component registry
//!
//! Maps component type names to constructor functions, one table per
//! category. This is the compile-time replacement for construct-by-name
//! reflection: every constructor is an ordinary closure that consumes a
//! parameter bag and returns a boxed component.

use crate::BoxError;
use loghub_logger::{
    FileSink, Formatter, JsonFormatter, MemorySink, NullSink, PlainTextFormatter,
    ProcessIdProcessor, Processor, Sink, StderrSink, StdoutSink, TagsProcessor, UidProcessor,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Constructor for a sink type. Receives the parameter bag as a JSON
/// object, or `Value::Null` when the configuration supplied no `params`.
pub type SinkCtor = Arc<dyn Fn(Value) -> Result<Box<dyn Sink>, BoxError> + Send + Sync>;

/// Constructor for a formatter type
pub type FormatterCtor = Arc<dyn Fn(Value) -> Result<Box<dyn Formatter>, BoxError> + Send + Sync>;

/// Constructor for a processor type
pub type ProcessorCtor = Arc<dyn Fn(Value) -> Result<Box<dyn Processor>, BoxError> + Send + Sync>;

/// Registry of component constructors, keyed by `(category, type name)`.
///
/// Registering a name twice in the same category replaces the earlier
/// constructor; this is how callers override a built-in type.
#[derive(Clone, Default)]
pub struct ComponentRegistry {
    sinks: HashMap<String, SinkCtor>,
    formatters: HashMap<String, FormatterCtor>,
    processors: HashMap<String, ProcessorCtor>,
}

impl ComponentRegistry {
    /// An empty registry with no known types
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with every built-in component type.
    ///
    /// Sinks: `stdout`, `stderr`, `file`, `null`, `memory`.
    /// Formatters: `plain`, `json`.
    /// Processors: `uid`, `process_id`, `tags`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();

        registry.register_sink("stdout", |params| {
            Ok(Box::new(StdoutSink::from_params(params)?))
        });
        registry.register_sink("stderr", |params| {
            Ok(Box::new(StderrSink::from_params(params)?))
        });
        registry.register_sink("file", |params| Ok(Box::new(FileSink::from_params(params)?)));
        registry.register_sink("null", |params| Ok(Box::new(NullSink::from_params(params)?)));
        registry.register_sink("memory", |params| {
            Ok(Box::new(MemorySink::from_params(params)?))
        });

        registry.register_formatter("plain", |params| {
            Ok(Box::new(PlainTextFormatter::from_params(params)?))
        });
        registry.register_formatter("json", |params| {
            Ok(Box::new(JsonFormatter::from_params(params)?))
        });

        registry.register_processor("uid", |params| {
            Ok(Box::new(UidProcessor::from_params(params)?))
        });
        registry.register_processor("process_id", |params| {
            Ok(Box::new(ProcessIdProcessor::from_params(params)?))
        });
        registry.register_processor("tags", |params| {
            Ok(Box::new(TagsProcessor::from_params(params)?))
        });

        registry
    }

    /// Register (or replace) a sink constructor
    pub fn register_sink<F>(&mut self, type_name: impl Into<String>, ctor: F)
    where
        F: Fn(Value) -> Result<Box<dyn Sink>, BoxError> + Send + Sync + 'static,
    {
        self.sinks.insert(type_name.into(), Arc::new(ctor));
    }

    /// Register (or replace) a formatter constructor
    pub fn register_formatter<F>(&mut self, type_name: impl Into<String>, ctor: F)
    where
        F: Fn(Value) -> Result<Box<dyn Formatter>, BoxError> + Send + Sync + 'static,
    {
        self.formatters.insert(type_name.into(), Arc::new(ctor));
    }

    /// Register (or replace) a processor constructor
    pub fn register_processor<F>(&mut self, type_name: impl Into<String>, ctor: F)
    where
        F: Fn(Value) -> Result<Box<dyn Processor>, BoxError> + Send + Sync + 'static,
    {
        self.processors.insert(type_name.into(), Arc::new(ctor));
    }

    /// Resolve a sink constructor
    pub fn sink_ctor(&self, type_name: &str) -> Option<&SinkCtor> {
        self.sinks.get(type_name)
    }

    /// Resolve a formatter constructor
    pub fn formatter_ctor(&self, type_name: &str) -> Option<&FormatterCtor> {
        self.formatters.get(type_name)
    }

    /// Resolve a processor constructor
    pub fn processor_ctor(&self, type_name: &str) -> Option<&ProcessorCtor> {
        self.processors.get(type_name)
    }

    /// Whether a sink type is registered
    pub fn has_sink(&self, type_name: &str) -> bool {
        self.sinks.contains_key(type_name)
    }

    /// Whether a formatter type is registered
    pub fn has_formatter(&self, type_name: &str) -> bool {
        self.formatters.contains_key(type_name)
    }

    /// Whether a processor type is registered
    pub fn has_processor(&self, type_name: &str) -> bool {
        self.processors.contains_key(type_name)
    }
}
