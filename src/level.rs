use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::{LogfanError, Result};

/// Severity levels accepted by every sink and by the dispatcher.
///
/// The set is closed: typed callers cannot produce a level outside it, and
/// untyped input (config files, wire payloads) goes through [`validate`].
/// Ordering carries no meaning here; a level is a tag passed through to the
/// transport, not a filtering threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Debug,
    Warning,
    Error,
}

impl Level {
    /// The accepted levels, in declaration order.
    pub const ALL: [Level; 4] = [Level::Info, Level::Debug, Level::Warning, Level::Error];

    /// Canonical uppercase name, used in the formatted line template.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
        }
    }

    /// Lowercase name carried in the HTTP message envelope.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Debug => "debug",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LogfanError;

    fn from_str(s: &str) -> Result<Self> {
        validate(s)
    }
}

/// Accepted level names, used in validation error messages.
pub fn accepted_names() -> Vec<&'static str> {
    Level::ALL.iter().map(Level::as_str).collect()
}

/// Returns true iff `name` is one of the accepted level names.
/// Matching is case-insensitive.
pub fn is_valid(name: &str) -> bool {
    validate(name).is_ok()
}

/// Parses `name` against the closed level set.
pub fn validate(name: &str) -> Result<Level> {
    match name.to_ascii_uppercase().as_str() {
        "INFO" => Ok(Level::Info),
        "DEBUG" => Ok(Level::Debug),
        "WARNING" => Ok(Level::Warning),
        "ERROR" => Ok(Level::Error),
        _ => Err(LogfanError::LevelNotValid {
            level: name.to_string(),
            accepted: accepted_names(),
        }),
    }
}

// Process-wide minimum-severity threshold, indexed into Level::ALL.
static AMBIENT_LEVEL: AtomicU8 = AtomicU8::new(0);

/// Current process-wide minimum-severity threshold.
pub fn ambient_level() -> Level {
    Level::ALL[AMBIENT_LEVEL.load(Ordering::Relaxed) as usize]
}

/// Sets the process-wide minimum-severity threshold.
///
/// This is a global side channel: the dispatcher stores each outgoing
/// message's level here before fanning out, and concurrent senders race on
/// the value (last store wins). Callers that need a stable threshold should
/// pass levels explicitly instead of reading this back.
pub fn change_ambient_level(level: Level) {
    AMBIENT_LEVEL.store(level as u8, Ordering::Relaxed);
}

/// Serializes tests that touch the ambient threshold or the global facade.
#[cfg(test)]
pub(crate) static GLOBAL_STATE_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
