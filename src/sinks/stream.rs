use std::io::{Stderr, Write};
use std::sync::Mutex;

use crate::error::Result;
use crate::level::Level;
use crate::sink::{format_line, Sink};

/// Writes one formatted line per message to the process stderr stream.
///
/// The stderr handle is acquired at construction and kept for the sink's
/// lifetime. Construction cannot fail.
pub struct StreamSink {
    name: String,
    stream: Mutex<Stderr>,
    level: Mutex<Level>,
}

impl StreamSink {
    pub fn new(level: Level) -> Self {
        Self {
            name: "StreamSink".to_string(),
            stream: Mutex::new(std::io::stderr()),
            level: Mutex::new(level),
        }
    }
}

impl Sink for StreamSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn send_message(&self, message: &str, level: Level) -> Result<()> {
        let line = format_line(&self.name, level, message);
        let mut stream = self.stream.lock().unwrap();
        writeln!(stream, "{line}")?;
        Ok(())
    }

    fn level(&self) -> Level {
        *self.level.lock().unwrap()
    }

    fn set_level(&self, level: Level) {
        *self.level.lock().unwrap() = level;
    }
}
