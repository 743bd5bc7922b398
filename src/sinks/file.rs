use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::error::Result;
use crate::level::Level;
use crate::sink::{format_line, Sink};

/// Target file used when no path is configured.
pub const DEFAULT_LOG_FILE: &str = "log.log";

/// Appends one formatted line per message to a plain-text log file.
///
/// The file is opened in create/append mode at construction and the handle is
/// held for the sink's lifetime; an open failure fails construction. The
/// target cannot change afterwards.
pub struct FileSink {
    name: String,
    path: PathBuf,
    file: Mutex<File>,
    level: Mutex<Level>,
}

impl FileSink {
    /// Opens `path`, falling back to [`DEFAULT_LOG_FILE`] when absent.
    pub fn new(level: Level, path: Option<PathBuf>) -> Result<Self> {
        let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        debug!(path = %path.display(), "opened file sink target");
        Ok(Self {
            name: "FileSink".to_string(),
            path,
            file: Mutex::new(file),
            level: Mutex::new(level),
        })
    }

    /// The resolved target path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn send_message(&self, message: &str, level: Level) -> Result<()> {
        let line = format_line(&self.name, level, message);
        let mut file = self.file.lock().unwrap();
        writeln!(file, "{line}")?;
        file.flush()?;
        Ok(())
    }

    fn level(&self) -> Level {
        *self.level.lock().unwrap()
    }

    fn set_level(&self, level: Level) {
        *self.level.lock().unwrap() = level;
    }
}
