//! Record formatters

use crate::sink::parse_params;
use crate::{Record, Result};
use serde::Deserialize;
use serde_json::Value;

/// A component that renders a log record into its final textual
/// representation before a sink delivers it.
pub trait Formatter: Send + Sync {
    /// Render a record
    fn format(&self, record: &Record) -> String;
}
impl std::fmt::Debug for dyn Formatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Formatter")
    }
}


/// Human-readable single-line formatter.
///
/// This is the engine default applied when a handler has no formatter of
/// its own: `timestamp [channel.LEVEL] message context-json`.
#[derive(Debug, Clone)]
pub struct PlainTextFormatter {
    include_timestamp: bool,
    date_format: String,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PlainTextParams {
    include_timestamp: bool,
    date_format: String,
}

impl Default for PlainTextParams {
    fn default() -> Self {
        Self {
            include_timestamp: true,
            date_format: "%Y-%m-%dT%H:%M:%S%.3fZ".to_string(),
        }
    }
}

impl Default for PlainTextFormatter {
    fn default() -> Self {
        let params = PlainTextParams::default();
        Self {
            include_timestamp: params.include_timestamp,
            date_format: params.date_format,
        }
    }
}

impl PlainTextFormatter {
    /// Create a formatter with the default layout
    pub fn new() -> Self {
        Self::default()
    }

    /// Control whether the timestamp is rendered
    pub fn with_timestamp(mut self, include: bool) -> Self {
        self.include_timestamp = include;
        self
    }

    /// Set the `chrono` strftime format used for the timestamp
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Build from a configuration parameter bag
    pub fn from_params(params: Value) -> Result<Self> {
        let params: PlainTextParams = parse_params(params)?;
        Ok(Self {
            include_timestamp: params.include_timestamp,
            date_format: params.date_format,
        })
    }
}

impl Formatter for PlainTextFormatter {
    fn format(&self, record: &Record) -> String {
        let mut line = String::new();
        if self.include_timestamp {
            line.push_str(&record.timestamp.format(&self.date_format).to_string());
            line.push(' ');
        }
        line.push_str(&format!(
            "[{}.{}] {}",
            record.channel, record.level, record.message
        ));
        if !record.context.is_empty() {
            // Context serialization cannot fail: keys are strings, values JSON
            if let Ok(json) = serde_json::to_string(&record.context) {
                line.push(' ');
                line.push_str(&json);
            }
        }
        line
    }
}

/// Formatter that renders the whole record as a JSON object
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    pretty: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct JsonParams {
    pretty: bool,
}

impl JsonFormatter {
    /// Create a compact JSON formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Render multi-line indented JSON instead of a single line
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Build from a configuration parameter bag
    pub fn from_params(params: Value) -> Result<Self> {
        let params: JsonParams = parse_params(params)?;
        Ok(Self {
            pretty: params.pretty,
        })
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, record: &Record) -> String {
        let result = if self.pretty {
            serde_json::to_string_pretty(record)
        } else {
            serde_json::to_string(record)
        };
        // Record serialization is infallible in practice; fall back to the
        // bare message rather than dropping the event
        result.unwrap_or_else(|_| record.message.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Context, Level};
    use serde_json::json;

    #[test]
    fn plain_text_layout() {
        let record = Record::new(
            Level::Error,
            "app",
            "boom",
            Context::new().with("request_id", 9),
        );
        let formatter = PlainTextFormatter::new().with_timestamp(false);
        assert_eq!(formatter.format(&record), "[app.ERROR] boom {\"request_id\":9}");
    }

    #[test]
    fn plain_text_omits_empty_context() {
        let record = Record::new(Level::Info, "app", "hello", Context::new());
        let formatter = PlainTextFormatter::new().with_timestamp(false);
        assert_eq!(formatter.format(&record), "[app.INFO] hello");
    }

    #[test]
    fn plain_text_includes_timestamp_by_default() {
        let record = Record::new(Level::Info, "app", "hello", Context::new());
        let line = PlainTextFormatter::new().format(&record);
        assert!(line.ends_with("[app.INFO] hello"));
        assert!(line.len() > "[app.INFO] hello".len());
    }

    #[test]
    fn json_formatter_emits_full_record() {
        let record = Record::new(Level::Notice, "audit", "login", Context::new().with("user", "bo"));
        let formatter = JsonFormatter::from_params(json!({})).unwrap();
        let value: serde_json::Value = serde_json::from_str(&formatter.format(&record)).unwrap();

        assert_eq!(value["level"], "notice");
        assert_eq!(value["channel"], "audit");
        assert_eq!(value["message"], "login");
        assert_eq!(value["context"]["user"], "bo");
    }

    #[test]
    fn json_pretty_param() {
        let record = Record::new(Level::Info, "app", "x", Context::new());
        let formatter = JsonFormatter::from_params(json!({"pretty": true})).unwrap();
        assert!(formatter.format(&record).contains('\n'));
    }
}
