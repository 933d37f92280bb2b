//! Channel builder

use crate::{ChannelConfig, ComponentFactory, ComponentRegistry, Result};
use loghub_logger::{BoundSink, Channel};

/// Assembles one channel from its configuration: the sink chain (each sink
/// optionally bound to a formatter), then the processor chain, both in
/// configured order.
pub struct ChannelBuilder<'a> {
    factory: ComponentFactory<'a>,
}

impl<'a> ChannelBuilder<'a> {
    /// Create a builder resolving component types against `registry`
    pub fn new(registry: &'a ComponentRegistry) -> Self {
        Self {
            factory: ComponentFactory::new(registry),
        }
    }

    /// Build a channel. Any component failure aborts the whole build.
    pub fn build(&self, name: &str, config: &ChannelConfig) -> Result<Channel> {
        let mut channel = Channel::new(name);

        for (type_name, handler) in &config.handlers {
            let sink = self.factory.build_sink(type_name, handler.params.as_ref())?;
            let mut bound = BoundSink::new(sink);
            if let Some(formatter) = &handler.formatter {
                bound.set_formatter(
                    self.factory
                        .build_formatter(&formatter.name, formatter.params.as_ref())?,
                );
            }
            channel.push_sink(bound);
        }

        for (type_name, component) in &config.processors {
            channel.push_processor(
                self.factory
                    .build_processor(type_name, component.params.as_ref())?,
            );
        }

        tracing::debug!(
            channel = name,
            sinks = channel.sink_count(),
            processors = channel.processor_count(),
            "built logging channel"
        );
        Ok(channel)
    }
}
