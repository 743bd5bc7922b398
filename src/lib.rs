pub mod config;
pub mod dispatcher;
pub mod error;
pub mod level;
pub mod sink;
pub mod sinks;

pub use config::{LoggingConfig, SinkConfig};
pub use dispatcher::{Dispatcher, Logging};
pub use error::{LogfanError, Result};
pub use level::Level;
pub use sink::Sink;
pub use sinks::{FileSink, HttpPostSink, StreamSink};
