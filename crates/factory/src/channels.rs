//! Channel registry

use crate::{Error, Result};
use loghub_logger::Channel;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Process-scoped store of built channels, keyed by name.
///
/// The registry exclusively owns every channel; callers receive `Arc`
/// handles. Insertion is an unconditional overwrite (last write wins),
/// which is what makes the public add-or-override operation collision-free.
/// The map is read-mostly after construction, hence the reader/writer lock.
#[derive(Default)]
pub struct ChannelRegistry {
    channels: RwLock<HashMap<String, Arc<Channel>>>,
}

impl ChannelRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a channel under its own name, replacing any existing entry
    pub fn put(&self, channel: Channel) {
        self.channels
            .write()
            .insert(channel.name().to_string(), Arc::new(channel));
    }

    /// Look up a channel by name
    pub fn get(&self, name: &str) -> Result<Arc<Channel>> {
        self.channels
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::ChannelNotFound(name.to_string()))
    }

    /// Whether a channel with this name is registered
    pub fn has(&self, name: &str) -> bool {
        self.channels.read().contains_key(name)
    }

    /// Names of all registered channels, in no particular order
    pub fn names(&self) -> Vec<String> {
        self.channels.read().keys().cloned().collect()
    }

    /// Number of registered channels
    pub fn len(&self) -> usize {
        self.channels.read().len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.channels.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_after_put() {
        let registry = ChannelRegistry::new();
        registry.put(Channel::new("app"));

        assert!(registry.has("app"));
        assert_eq!(registry.get("app").unwrap().name(), "app");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn missing_name_fails_with_channel_not_found() {
        let registry = ChannelRegistry::new();
        assert!(!registry.has("ghost"));
        match registry.get("ghost").unwrap_err() {
            Error::ChannelNotFound(name) => assert_eq!(name, "ghost"),
            other => panic!("expected ChannelNotFound, got {other:?}"),
        }
    }

    #[test]
    fn put_overwrites_silently() {
        let registry = ChannelRegistry::new();

        let mut first = Channel::new("app");
        first.push_sink(loghub_logger::BoundSink::new(Box::new(
            loghub_logger::NullSink::new(),
        )));
        registry.put(first);
        assert_eq!(registry.get("app").unwrap().sink_count(), 1);

        registry.put(Channel::new("app"));
        assert_eq!(registry.get("app").unwrap().sink_count(), 0);
        assert_eq!(registry.len(), 1);
    }
}
