//! Logging facade and channel-selection state machine

use crate::{ChannelBuilder, ChannelRegistry, ComponentRegistry, Error, LoggingConfig, Result};
use loghub_logger::{Channel, Context, Level};
use parking_lot::Mutex;
use std::sync::Arc;

/// The logging facade.
///
/// Built from a [`LoggingConfig`], it owns every constructed channel and a
/// two-part selection state: the default channel name, fixed at
/// construction, and the currently selected channel name. Selection is
/// single-use: every logging call consumes the current selection and
/// resets it to the default, whether or not delivery succeeded.
pub struct LogManager {
    channels: ChannelRegistry,
    default_channel: String,
    current: Mutex<String>,
}

impl std::fmt::Debug for LogManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogManager")
            .field("default_channel", &self.default_channel)
            .field("current", &*self.current.lock())
            .finish()
    }
}

impl LogManager {
    /// Build every enabled channel using the built-in component types.
    ///
    /// Construction is all-or-nothing: an invalid configuration or any
    /// component construction failure aborts the whole manager.
    pub fn new(config: LoggingConfig) -> Result<Self> {
        Self::with_registry(config, &ComponentRegistry::with_builtins())
    }

    /// Build every enabled channel, resolving component types against a
    /// caller-supplied registry (built-ins plus custom registrations).
    pub fn with_registry(config: LoggingConfig, registry: &ComponentRegistry) -> Result<Self> {
        let enabled: Vec<_> = config.channels().filter(|(_, cfg)| cfg.enabled).collect();

        if enabled.iter().any(|(name, _)| name.is_empty()) {
            return Err(Error::InvalidConfiguration(
                "channel names must be non-empty".to_string(),
            ));
        }

        let defaults: Vec<&str> = enabled
            .iter()
            .filter(|(_, cfg)| cfg.is_default)
            .map(|(name, _)| *name)
            .collect();
        let default_channel = match defaults.as_slice() {
            [single] => single.to_string(),
            [] => {
                return Err(Error::InvalidConfiguration(
                    "exactly one enabled channel must set `default = true`; none does".to_string(),
                ));
            }
            several => {
                return Err(Error::InvalidConfiguration(format!(
                    "exactly one enabled channel must set `default = true`; found {}",
                    several.join(", ")
                )));
            }
        };

        let builder = ChannelBuilder::new(registry);
        let channels = ChannelRegistry::new();
        for (name, channel_config) in &enabled {
            channels.put(builder.build(name, channel_config)?);
        }

        tracing::debug!(
            default = %default_channel,
            channels = channels.len(),
            "log manager constructed"
        );
        Ok(Self {
            channels,
            current: Mutex::new(default_channel.clone()),
            default_channel,
        })
    }

    /// Add or override a channel. A name collision silently replaces the
    /// existing channel; ownership transfers to the manager.
    pub fn add_channel(&self, channel: Channel) {
        self.channels.put(channel);
    }

    /// Look up a channel by name
    pub fn get_channel(&self, name: &str) -> Result<Arc<Channel>> {
        self.channels.get(name)
    }

    /// The currently selected channel. Reading it does not consume the
    /// selection; only a logging call does.
    pub fn current_channel(&self) -> Result<Arc<Channel>> {
        let name = self.current.lock().clone();
        self.channels.get(&name)
    }

    /// Whether a channel with this name exists
    pub fn is_channel(&self, name: &str) -> bool {
        self.channels.has(name)
    }

    /// Select the channel the next logging call delegates to.
    ///
    /// Fails with [`Error::ChannelNotFound`] for an unregistered name,
    /// leaving the current selection untouched. The selection is ambient
    /// process-wide state: when several threads interleave select and log
    /// calls on one manager, a selection can be consumed by another
    /// thread's logging call.
    pub fn select_channel(&self, name: &str) -> Result<&Self> {
        if !self.channels.has(name) {
            return Err(Error::ChannelNotFound(name.to_string()));
        }
        *self.current.lock() = name.to_string();
        Ok(self)
    }

    /// Name of the currently selected channel
    pub fn current_channel_name(&self) -> String {
        self.current.lock().clone()
    }

    /// Name of the default channel, fixed at construction
    pub fn default_channel_name(&self) -> &str {
        &self.default_channel
    }

    /// Names of all registered channels
    pub fn channel_names(&self) -> Vec<String> {
        self.channels.names()
    }

    /// Flush every registered channel
    pub fn flush(&self) -> Result<()> {
        for name in self.channels.names() {
            self.channels.get(&name)?.flush()?;
        }
        Ok(())
    }

    /// Log at an arbitrary level. `level` is anything convertible to
    /// [`Level`]: a `Level` value, or a severity name whose parse failure
    /// is [`Error::InvalidLevel`].
    pub fn log<L>(&self, level: L, message: &str, context: Context) -> Result<()>
    where
        L: TryInto<Level>,
        Error: From<L::Error>,
    {
        let level = level.try_into()?;
        self.dispatch(level, message, context)
    }

    /// Log at [`Level::Emergency`]
    pub fn emergency(&self, message: &str, context: Context) -> Result<()> {
        self.dispatch(Level::Emergency, message, context)
    }

    /// Log at [`Level::Alert`]
    pub fn alert(&self, message: &str, context: Context) -> Result<()> {
        self.dispatch(Level::Alert, message, context)
    }

    /// Log at [`Level::Critical`]
    pub fn critical(&self, message: &str, context: Context) -> Result<()> {
        self.dispatch(Level::Critical, message, context)
    }

    /// Log at [`Level::Error`]
    pub fn error(&self, message: &str, context: Context) -> Result<()> {
        self.dispatch(Level::Error, message, context)
    }

    /// Log at [`Level::Warning`]
    pub fn warning(&self, message: &str, context: Context) -> Result<()> {
        self.dispatch(Level::Warning, message, context)
    }

    /// Log at [`Level::Notice`]
    pub fn notice(&self, message: &str, context: Context) -> Result<()> {
        self.dispatch(Level::Notice, message, context)
    }

    /// Log at [`Level::Info`]
    pub fn info(&self, message: &str, context: Context) -> Result<()> {
        self.dispatch(Level::Info, message, context)
    }

    /// Log at [`Level::Debug`]
    pub fn debug(&self, message: &str, context: Context) -> Result<()> {
        self.dispatch(Level::Debug, message, context)
    }

    fn dispatch(&self, level: Level, message: &str, context: Context) -> Result<()> {
        // Consume the selection and reset it to the default in one critical
        // section; the reset happens before delegation, so it is
        // unconditional with respect to the delivery outcome.
        let name = {
            let mut current = self.current.lock();
            std::mem::replace(&mut *current, self.default_channel.clone())
        };
        let channel = self.channels.get(&name)?;
        channel.log(level, message, context)?;
        Ok(())
    }
}
