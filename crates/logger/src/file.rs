//! Append-only file sink

use crate::sink::parse_params;
use crate::{Error, Level, Propagation, Record, Result, Sink};
use serde::Deserialize;
use serde_json::Value;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileParams {
    path: PathBuf,
    #[serde(default = "FileParams::default_level")]
    level: Level,
    #[serde(default = "FileParams::default_true")]
    propagate: bool,
    #[serde(default = "FileParams::default_true")]
    create_dirs: bool,
}

impl FileParams {
    fn default_level() -> Level {
        Level::Debug
    }

    fn default_true() -> bool {
        true
    }
}

impl Default for FileParams {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            level: Level::Debug,
            propagate: true,
            create_dirs: true,
        }
    }
}

/// Sink that appends one line per record to a log file.
///
/// Rotation, batching, and delivery guarantees are out of scope; the file
/// is opened once at construction and appended to for the sink's lifetime.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    min_level: Level,
    propagate: bool,
    writer: Mutex<BufWriter<File>>,
}

impl FileSink {
    /// Open (or create) the file at `path` for appending
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(path.as_ref(), Level::Debug, true, true)
    }

    fn open(path: &Path, min_level: Level, propagate: bool, create_dirs: bool) -> Result<Self> {
        if create_dirs
            && let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| Error::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            min_level,
            propagate,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    /// Build from a configuration parameter bag; `path` is required
    pub fn from_params(params: Value) -> Result<Self> {
        if params.is_null() {
            return Err(Error::InvalidParams(
                "file sink requires a `path` parameter".to_string(),
            ));
        }
        let params: FileParams = parse_params(params)?;
        Self::open(
            &params.path,
            params.level,
            params.propagate,
            params.create_dirs,
        )
    }

    /// The file this sink appends to
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn deliver(&self, _record: &Record, rendered: &str) -> Result<Propagation> {
        {
            let mut writer = self.writer.lock().map_err(|_| {
                Error::Io(std::io::Error::other("file sink writer lock poisoned"))
            })?;
            writeln!(writer, "{rendered}")?;
            writer.flush()?;
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
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| Error::Io(std::io::Error::other("file sink writer lock poisoned")))?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Context;
    use serde_json::json;

    #[test]
    fn appends_rendered_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let sink = FileSink::new(&path).unwrap();

        let record = Record::new(Level::Info, "app", "first", Context::new());
        sink.deliver(&record, "line one").unwrap();
        sink.deliver(&record, "line two").unwrap();
        sink.flush().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "line one\nline two\n");
    }

    #[test]
    fn creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/app.log");
        let sink = FileSink::from_params(json!({"path": path})).unwrap();
        assert!(sink.path().parent().unwrap().is_dir());
    }

    #[test]
    fn path_is_required() {
        let err = FileSink::from_params(Value::Null).unwrap_err();
        assert!(matches!(err, Error::InvalidParams(_)));
    }

    #[test]
    fn level_param_filters() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("errors.log");
        let sink = FileSink::from_params(json!({"path": path, "level": "error"})).unwrap();
        assert!(!sink.is_enabled(Level::Warning));
        assert!(sink.is_enabled(Level::Critical));
    }
}
