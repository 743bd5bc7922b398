pub mod file;
pub mod http_post;
pub mod stream;

pub use file::FileSink;
pub use http_post::HttpPostSink;
pub use stream::StreamSink;
