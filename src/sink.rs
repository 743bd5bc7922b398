use chrono::Utc;

use crate::error::Result;
use crate::level::Level;

/// Capability contract shared by every delivery target.
///
/// A sink's transport target is fixed at construction and held for its whole
/// lifetime; only the active severity level may be reconfigured afterwards.
/// The dispatcher treats all sinks uniformly through this trait even though
/// each family opens a different transport and shapes its payload differently.
pub trait Sink: Send + Sync {
    /// Sink identity, used in the formatted line template.
    fn name(&self) -> &str;

    /// Formats `message` with the fixed template and delivers it through the
    /// sink's transport, tagged with `level`.
    ///
    /// Delivery is synchronous: the call blocks until the transport accepts
    /// the write, and any transport fault surfaces unmodified.
    fn send_message(&self, message: &str, level: Level) -> Result<()>;

    /// The sink's active severity level.
    fn level(&self) -> Level;

    /// Reconfigures the active severity level without reopening the transport.
    fn set_level(&self, level: Level);
}

/// Renders the fixed line template: `<timestamp> - <sink-name> - <LEVEL> - <message>`.
pub fn format_line(name: &str, level: Level, message: &str) -> String {
    let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
    format!("{} - {} - {} - {}", timestamp, name, level.as_str(), message)
}
