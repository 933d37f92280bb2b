//! Log record type

use crate::{Context, Level};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single log event flowing through a channel.
///
/// Records are created by the channel on each logging call, enriched by the
/// channel's processors, then handed to each sink in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Severity level
    pub level: Level,
    /// Name of the channel that produced the record
    pub channel: String,
    /// The log message
    pub message: String,
    /// When the record was created
    pub timestamp: DateTime<Utc>,
    /// Structured context, mutable by processors
    pub context: Context,
}

impl Record {
    /// Create a new record stamped with the current time
    pub fn new(
        level: Level,
        channel: impl Into<String>,
        message: impl Into<String>,
        context: Context,
    ) -> Self {
        Self {
            level,
            channel: channel.into(),
            message: message.into(),
            timestamp: Utc::now(),
            context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_captures_fields() {
        let ctx = Context::new().with("key", "value");
        let record = Record::new(Level::Warning, "app", "disk almost full", ctx);

        assert_eq!(record.level, Level::Warning);
        assert_eq!(record.channel, "app");
        assert_eq!(record.message, "disk almost full");
        assert_eq!(record.context.len(), 1);
    }

    #[test]
    fn serializes_to_json() {
        let record = Record::new(Level::Info, "app", "hello", Context::new());
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["level"], "info");
        assert_eq!(value["channel"], "app");
        assert_eq!(value["message"], "hello");
        assert!(value["timestamp"].is_string());
    }
}
