//! Console sinks

use crate::sink::parse_params;
use crate::{Level, Propagation, Record, Result, Sink};
use serde::Deserialize;
use serde_json::Value;
use std::io::Write;
use std::sync::{Arc, Mutex};

#[cfg(feature = "color")]
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConsoleParams {
    level: Level,
    propagate: bool,
}

impl Default for ConsoleParams {
    fn default() -> Self {
        Self {
            level: Level::Debug,
            propagate: true,
        }
    }
}

#[cfg(feature = "color")]
fn level_color(level: Level) -> Color {
    match level {
        Level::Debug => Color::Blue,
        Level::Info | Level::Notice => Color::Green,
        Level::Warning => Color::Yellow,
        _ => Color::Red,
    }
}

/// Sink that writes one line per record to stdout
pub struct StdoutSink {
    min_level: Level,
    propagate: bool,
    /// Lock for stdout (to prevent interleaving)
    #[cfg(not(feature = "color"))]
    stdout: Arc<Mutex<std::io::Stdout>>,
    #[cfg(feature = "color")]
    stdout: Arc<Mutex<StandardStream>>,
}

impl StdoutSink {
    /// Create a new stdout sink accepting every level
    pub fn new() -> Self {
        Self {
            min_level: Level::Debug,
            propagate: true,
            #[cfg(not(feature = "color"))]
            stdout: Arc::new(Mutex::new(std::io::stdout())),
            #[cfg(feature = "color")]
            stdout: Arc::new(Mutex::new(StandardStream::stdout(ColorChoice::Auto))),
        }
    }

    /// Create with a specific minimum level
    pub fn with_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Control whether records propagate past this sink
    pub fn with_propagate(mut self, propagate: bool) -> Self {
        self.propagate = propagate;
        self
    }

    /// Build from a configuration parameter bag
    pub fn from_params(params: Value) -> Result<Self> {
        let params: ConsoleParams = parse_params(params)?;
        Ok(Self::new()
            .with_level(params.level)
            .with_propagate(params.propagate))
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for StdoutSink {
    fn deliver(&self, record: &Record, rendered: &str) -> Result<Propagation> {
        if let Ok(mut stdout) = self.stdout.lock() {
            #[cfg(feature = "color")]
            {
                let mut spec = ColorSpec::new();
                spec.set_fg(Some(level_color(record.level)));
                let _ = stdout.set_color(&spec);
                writeln!(stdout, "{rendered}")?;
                let _ = stdout.reset();
            }
            #[cfg(not(feature = "color"))]
            {
                let _ = record;
                writeln!(stdout, "{rendered}")?;
            }
        }
        if self.propagate {
            Ok(Propagation::Continue)
        } else {
            Ok(Propagation::Halt)
        }
    }

    fn is_enabled(&self, level: Level) -> bool {
        level >= self.min_level
    }

    fn flush(&self) -> Result<()> {
        if let Ok(mut stdout) = self.stdout.lock() {
            stdout.flush()?;
        }
        Ok(())
    }
}

/// Sink that writes one line per record to stderr
pub struct StderrSink {
    min_level: Level,
    propagate: bool,
    stderr: Arc<Mutex<std::io::Stderr>>,
}

impl StderrSink {
    /// Create a new stderr sink accepting every level
    pub fn new() -> Self {
        Self {
            min_level: Level::Debug,
            propagate: true,
            stderr: Arc::new(Mutex::new(std::io::stderr())),
        }
    }

    /// Create with a specific minimum level
    pub fn with_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Control whether records propagate past this sink
    pub fn with_propagate(mut self, propagate: bool) -> Self {
        self.propagate = propagate;
        self
    }

    /// Build from a configuration parameter bag
    pub fn from_params(params: Value) -> Result<Self> {
        let params: ConsoleParams = parse_params(params)?;
        Ok(Self::new()
            .with_level(params.level)
            .with_propagate(params.propagate))
    }
}

impl Default for StderrSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for StderrSink {
    fn deliver(&self, _record: &Record, rendered: &str) -> Result<Propagation> {
        if let Ok(mut stderr) = self.stderr.lock() {
            writeln!(stderr, "{rendered}")?;
        }
        if self.propagate {
            Ok(Propagation::Continue)
        } else {
            Ok(Propagation::Halt)
        }
    }

    fn is_enabled(&self, level: Level) -> bool {
        level >= self.min_level
    }

    fn flush(&self) -> Result<()> {
        if let Ok(mut stderr) = self.stderr.lock() {
            stderr.flush()?;
        }
        Ok(())
    }
}
