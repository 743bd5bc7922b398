use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogfanError {
    #[error("level '{}' is not valid; accepted levels are {}", .level, .accepted.join(", "))]
    LevelNotValid {
        level: String,
        accepted: Vec<&'static str>,
    },

    #[error("the method {} is not allowed; use {}", .method, .allowed.join(", "))]
    MethodNotAllowed {
        method: String,
        allowed: Vec<&'static str>,
    },

    #[error("no sink registered at position {index}")]
    MissingSink { index: usize },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LogfanError>;
