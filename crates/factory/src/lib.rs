//! Configuration-driven logging channel factory
//!
//! This crate turns a declarative configuration into one or more
//! independent logging channels and exposes the [`LogManager`] facade
//! through which callers emit leveled events without knowing which channel
//! is active. Component types (sinks, formatters, processors) are resolved
//! by name through a [`ComponentRegistry`] of factory functions; channels
//! are stored in a [`ChannelRegistry`]; the manager keeps the ephemeral
//! "current channel" selection that every logging call consumes and resets.
//!
//! ```
//! use loghub_factory::{LoggingConfig, LogManager};
//! use loghub_logger::Context;
//! use serde_json::json;
//!
//! let config = LoggingConfig::from_json(json!({
//!     "app": { "default": true, "handlers": { "stdout": {} } },
//!     "audit": { "handlers": { "null": {} } }
//! }))?;
//!
//! let manager = LogManager::new(config)?;
//! manager.info("service started", Context::new())?;
//! manager.select_channel("audit")?.warning("odd login", Context::new())?;
//! assert_eq!(manager.current_channel_name(), "app");
//! # Ok::<(), loghub_factory::Error>(())
//! ```

#![warn(missing_docs, unreachable_pub)]
#![forbid(unsafe_code)]

mod builder;
mod channels;
mod config;
mod error;
mod factory;
mod manager;
mod registry;

pub use builder::ChannelBuilder;
pub use channels::ChannelRegistry;
pub use config::{ChannelConfig, ComponentConfig, FormatterConfig, HandlerConfig, LoggingConfig, Params};
pub use error::{BoxError, Error, Result};
pub use factory::ComponentFactory;
pub use manager::LogManager;
pub use registry::{ComponentRegistry, FormatterCtor, ProcessorCtor, SinkCtor};

// The engine types callers need alongside the factory
pub use loghub_logger::{Channel, Context, Level, Record};
