//! Channel runtime entity

use crate::{Context, Formatter, Level, PlainTextFormatter, Propagation, Record, Result, Sink};

/// A sink together with its optionally bound formatter.
///
/// A sink owns at most one formatter; binding again replaces the previous
/// one. When no formatter is bound the engine-default plain-text layout
/// applies.
pub struct BoundSink {
    sink: Box<dyn Sink>,
    formatter: Option<Box<dyn Formatter>>,
}

impl BoundSink {
    /// Wrap a sink with no formatter bound
    pub fn new(sink: Box<dyn Sink>) -> Self {
        Self {
            sink,
            formatter: None,
        }
    }

    /// Bind a formatter, replacing any previously bound one
    pub fn set_formatter(&mut self, formatter: Box<dyn Formatter>) {
        self.formatter = Some(formatter);
    }

    /// Builder-style variant of [`set_formatter`](Self::set_formatter)
    pub fn with_formatter(mut self, formatter: Box<dyn Formatter>) -> Self {
        self.set_formatter(formatter);
        self
    }

    /// Whether a formatter is bound
    pub fn has_formatter(&self) -> bool {
        self.formatter.is_some()
    }

    fn render(&self, record: &Record) -> String {
        match &self.formatter {
            Some(formatter) => formatter.format(record),
            None => PlainTextFormatter::default().format(record),
        }
    }
}

/// A named, independently configured logging pipeline: an ordered sink
/// chain plus an ordered processor chain.
///
/// Channels are immutable after construction and are shared behind `Arc`
/// by the channel registry.
pub struct Channel {
    name: String,
    sinks: Vec<BoundSink>,
    processors: Vec<Box<dyn crate::Processor>>,
}

impl std::fmt::Debug for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel")
            .field("name", &self.name)
            .field("sinks", &self.sinks.len())
            .field("processors", &self.processors.len())
            .finish()
    }
}

impl Channel {
    /// Create an empty channel
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sinks: Vec::new(),
            processors: Vec::new(),
        }
    }

    /// Append a bound sink; delivery order equals append order
    pub fn push_sink(&mut self, sink: BoundSink) {
        self.sinks.push(sink);
    }

    /// Append a processor; execution order equals append order
    pub fn push_processor(&mut self, processor: Box<dyn crate::Processor>) {
        self.processors.push(processor);
    }

    /// The channel's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of sinks in the chain
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Number of processors in the chain
    pub fn processor_count(&self) -> usize {
        self.processors.len()
    }

    /// Emit one event through the pipeline.
    ///
    /// The record is built, enriched by every processor in order, then
    /// delivered to each enabled sink in configuration order. A sink
    /// returning [`Propagation::Halt`] stops the chain; a sink error
    /// propagates to the caller immediately. A channel with no sinks
    /// processes the record and drops it.
    pub fn log(&self, level: Level, message: &str, context: Context) -> Result<()> {
        let mut record = Record::new(level, self.name.clone(), message, context);
        for processor in &self.processors {
            processor.process(&mut record);
        }
        for bound in &self.sinks {
            if !bound.sink.is_enabled(record.level) {
                continue;
            }
            let rendered = bound.render(&record);
            if bound.sink.deliver(&record, &rendered)? == Propagation::Halt {
                break;
            }
        }
        Ok(())
    }

    /// Flush every sink in the chain
    pub fn flush(&self) -> Result<()> {
        for bound in &self.sinks {
            bound.sink.flush()?;
        }
        Ok(())
    }
}
