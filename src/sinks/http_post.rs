use std::sync::Mutex;

use reqwest::blocking::Client;
use serde::Serialize;
use tracing::debug;

use crate::error::{LogfanError, Result};
use crate::level::Level;
use crate::sink::Sink;

/// HTTP methods a sink may be configured with.
pub const ALLOWED_METHODS: [&str; 2] = ["POST", "GET"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HttpMethod {
    Post,
    Get,
}

/// Structured envelope delivered to the receiving endpoint.
#[derive(Debug, Serialize)]
struct Envelope<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    msg: &'a str,
}

/// Delivers each message to an HTTP endpoint as a JSON envelope
/// `{"type": <level name>, "msg": <message>}`.
///
/// Unlike the stream and file sinks, the payload is structured rather than a
/// formatted line; the receiving end sees the level name and the original
/// message body. Delivery blocks until the server responds.
pub struct HttpPostSink {
    name: String,
    client: Client,
    url: String,
    method: HttpMethod,
    level: Mutex<Level>,
}

impl HttpPostSink {
    /// Validates `method` against [`ALLOWED_METHODS`], then opens the HTTP
    /// client. Validation runs before the client is built, so a rejected
    /// method never leaves a transport handle behind.
    pub fn new(level: Level, host: &str, port: u16, url_path: &str, method: &str) -> Result<Self> {
        let method = match method.to_ascii_uppercase().as_str() {
            "POST" => HttpMethod::Post,
            "GET" => HttpMethod::Get,
            _ => {
                return Err(LogfanError::MethodNotAllowed {
                    method: method.to_string(),
                    allowed: ALLOWED_METHODS.to_vec(),
                })
            }
        };

        let path = url_path.strip_prefix('/').unwrap_or(url_path);
        let url = format!("http://{host}:{port}/{path}");
        let client = Client::new();
        debug!(%url, ?method, "opened http sink target");

        Ok(Self {
            name: "HttpPostSink".to_string(),
            client,
            url,
            method,
            level: Mutex::new(level),
        })
    }

    /// Convenience constructor for the default POST method.
    pub fn post(level: Level, host: &str, port: u16, url_path: &str) -> Result<Self> {
        Self::new(level, host, port, url_path, "POST")
    }

    /// The assembled target URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Sink for HttpPostSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn send_message(&self, message: &str, level: Level) -> Result<()> {
        let envelope = Envelope {
            kind: level.wire_name(),
            msg: message,
        };
        let request = match self.method {
            HttpMethod::Post => self.client.post(&self.url).json(&envelope),
            HttpMethod::Get => {
                let body = serde_json::to_string(&envelope)?;
                self.client.get(&self.url).query(&[("msg", body)])
            }
        };
        request.send()?.error_for_status()?;
        Ok(())
    }

    fn level(&self) -> Level {
        *self.level.lock().unwrap()
    }

    fn set_level(&self, level: Level) {
        *self.level.lock().unwrap() = level;
    }
}
