use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::error::Result;
use crate::level;
use crate::sink::Sink;
use crate::sinks::{FileSink, HttpPostSink, StreamSink};

/// Declarative description of a sink set, loadable from TOML.
///
/// ```toml
/// [[sinks]]
/// kind = "stream"
/// level = "debug"
///
/// [[sinks]]
/// kind = "file"
/// level = "info"
/// path = "service.log"
///
/// [[sinks]]
/// kind = "http"
/// level = "warning"
/// host = "127.0.0.1"
/// port = 8000
/// url_path = "/message"
/// ```
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub sinks: Vec<SinkConfig>,
}

/// Construction surface of one sink family.
///
/// Levels are plain strings here and go through the level validator when the
/// sink set is built, so a typo fails the build rather than being carried
/// along silently.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SinkConfig {
    Stream {
        level: String,
    },
    File {
        level: String,
        #[serde(default)]
        path: Option<PathBuf>,
    },
    Http {
        level: String,
        host: String,
        port: u16,
        url_path: String,
        #[serde(default = "default_method")]
        method: String,
    },
}

fn default_method() -> String {
    "POST".to_string()
}

impl LoggingConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Builds the configured sinks in declaration order.
    ///
    /// The first failing constructor (unknown level name, disallowed HTTP
    /// method, file-open fault) aborts the build; callers must not register a
    /// partially-built set.
    pub fn build_sinks(&self) -> Result<Vec<Arc<dyn Sink>>> {
        let mut sinks: Vec<Arc<dyn Sink>> = Vec::with_capacity(self.sinks.len());
        for sink in &self.sinks {
            sinks.push(match sink {
                SinkConfig::Stream { level } => Arc::new(StreamSink::new(level::validate(level)?)),
                SinkConfig::File { level, path } => {
                    Arc::new(FileSink::new(level::validate(level)?, path.clone())?)
                }
                SinkConfig::Http {
                    level,
                    host,
                    port,
                    url_path,
                    method,
                } => Arc::new(HttpPostSink::new(
                    level::validate(level)?,
                    host,
                    *port,
                    url_path,
                    method,
                )?),
            });
        }
        debug!(count = sinks.len(), "built sink set from config");
        Ok(sinks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LogfanError;

    #[test]
    fn test_parses_all_sink_kinds() {
        let config = LoggingConfig::from_toml_str(
            r#"
            [[sinks]]
            kind = "stream"
            level = "debug"

            [[sinks]]
            kind = "file"
            level = "info"
            path = "service.log"

            [[sinks]]
            kind = "http"
            level = "warning"
            host = "127.0.0.1"
            port = 8000
            url_path = "/message"
            "#,
        )
        .unwrap();
        assert_eq!(config.sinks.len(), 3);
    }

    #[test]
    fn test_http_method_defaults_to_post() {
        let config = LoggingConfig::from_toml_str(
            r#"
            [[sinks]]
            kind = "http"
            level = "info"
            host = "localhost"
            port = 8000
            url_path = "/message"
            "#,
        )
        .unwrap();
        match &config.sinks[0] {
            SinkConfig::Http { method, .. } => assert_eq!(method, "POST"),
            other => panic!("expected http sink, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_level_fails_build() {
        let config = LoggingConfig::from_toml_str(
            r#"
            [[sinks]]
            kind = "stream"
            level = "verbose"
            "#,
        )
        .unwrap();
        match config.build_sinks() {
            Err(LogfanError::LevelNotValid { level, .. }) => assert_eq!(level, "verbose"),
            _ => panic!("expected LevelNotValid"),
        }
    }

    #[test]
    fn test_disallowed_method_fails_build() {
        let config = LoggingConfig::from_toml_str(
            r#"
            [[sinks]]
            kind = "http"
            level = "info"
            host = "localhost"
            port = 8000
            url_path = "/message"
            method = "delete"
            "#,
        )
        .unwrap();
        match config.build_sinks() {
            Err(LogfanError::MethodNotAllowed { method, .. }) => assert_eq!(method, "delete"),
            _ => panic!("expected MethodNotAllowed"),
        }
    }

    #[test]
    fn test_empty_config_builds_empty_set() {
        let config = LoggingConfig::from_toml_str("").unwrap();
        assert!(config.build_sinks().unwrap().is_empty());
    }
}
