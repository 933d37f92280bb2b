//! Declarative channel configuration
//!
//! The configuration is a nested mapping keyed by channel name:
//!
//! ```json
//! {
//!     "app": {
//!         "enabled": true,
//!         "default": true,
//!         "handlers": {
//!             "file": {
//!                 "params": { "path": "/var/log/app.log" },
//!                 "formatter": { "name": "json" }
//!             },
//!             "stdout": { "params": { "level": "warning" } }
//!         },
//!         "processors": {
//!             "uid": { "params": { "length": 8 } }
//!         }
//!     }
//! }
//! ```
//!
//! Handler and processor order is semantically significant and is preserved
//! exactly as configured.

use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An ordered bag of named constructor arguments for one component
pub type Params = serde_json::Map<String, Value>;

/// Formatter fragment of a handler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormatterConfig {
    /// Registered formatter type name
    pub name: String,
    /// Constructor arguments; absent means the formatter's own defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Params>,
}

impl FormatterConfig {
    /// Reference a formatter type with no explicit parameters
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: None,
        }
    }

    /// Attach constructor parameters
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = Some(params);
        self
    }
}

/// Configuration for one sink in a channel's handler chain
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HandlerConfig {
    /// Constructor arguments; absent means the sink's own defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Params>,
    /// Formatter bound to this sink; absent means the engine default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatter: Option<FormatterConfig>,
}

impl HandlerConfig {
    /// A handler with default parameters and no bound formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach constructor parameters
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = Some(params);
        self
    }

    /// Bind a formatter
    pub fn with_formatter(mut self, formatter: FormatterConfig) -> Self {
        self.formatter = Some(formatter);
        self
    }
}

/// Configuration for one processor in a channel's processor chain
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentConfig {
    /// Constructor arguments; absent means the component's own defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Params>,
}

impl ComponentConfig {
    /// A component with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach constructor parameters
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = Some(params);
        self
    }
}

/// Configuration of a single channel
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelConfig {
    /// Disabled channels are never built, registered, or discoverable
    #[serde(default = "ChannelConfig::enabled_default")]
    pub enabled: bool,
    /// Whether this channel is the process default; exactly one enabled
    /// channel must set this
    #[serde(default, rename = "default")]
    pub is_default: bool,
    /// Sink chain, keyed by sink type name, in invocation order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub handlers: IndexMap<String, HandlerConfig>,
    /// Processor chain, keyed by processor type name, in execution order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub processors: IndexMap<String, ComponentConfig>,
}

impl ChannelConfig {
    fn enabled_default() -> bool {
        true
    }

    /// An enabled, non-default channel with empty chains
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark this channel as the process default
    pub fn default_channel(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Disable the channel
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Append a handler; order of calls is invocation order
    pub fn handler(mut self, type_name: impl Into<String>, handler: HandlerConfig) -> Self {
        self.handlers.insert(type_name.into(), handler);
        self
    }

    /// Append a processor; order of calls is execution order
    pub fn processor(mut self, type_name: impl Into<String>, component: ComponentConfig) -> Self {
        self.processors.insert(type_name.into(), component);
        self
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            is_default: false,
            handlers: IndexMap::new(),
            processors: IndexMap::new(),
        }
    }
}

/// The whole logging configuration: channel name → channel configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoggingConfig {
    channels: IndexMap<String, ChannelConfig>,
}

impl LoggingConfig {
    /// An empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from a JSON value
    pub fn from_json(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::InvalidConfiguration(e.to_string()))
    }

    /// Add a channel; a repeated name replaces the earlier definition
    pub fn channel(mut self, name: impl Into<String>, config: ChannelConfig) -> Self {
        self.channels.insert(name.into(), config);
        self
    }

    /// Iterate channels in configuration order
    pub fn channels(&self) -> impl Iterator<Item = (&str, &ChannelConfig)> {
        self.channels.iter().map(|(name, cfg)| (name.as_str(), cfg))
    }

    /// Look up one channel's configuration
    pub fn get(&self, name: &str) -> Option<&ChannelConfig> {
        self.channels.get(name)
    }

    /// Number of configured channels (enabled or not)
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether no channels are configured
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
