use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;
use tracing::{debug, warn};

use crate::error::{LogfanError, Result};
use crate::level::{self, Level};
use crate::sink::Sink;

/// Ordered registry of active sinks plus the fan-out loop.
///
/// The registry is replaced wholesale by [`set_services`](Self::set_services)
/// (last writer wins, never an append) and snapshotted by [`send`](Self::send),
/// so a send that overlaps a replacement observes either the old list or the
/// new one, never a partial mix. Replacements are expected to be rare; `send`
/// is the hot path.
///
/// The dispatcher holds shared references to its sinks but does not manage
/// their lifetime; each sink owns its transport handle.
pub struct Dispatcher {
    services: RwLock<Vec<Option<Arc<dyn Sink>>>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            services: RwLock::new(Vec::new()),
        }
    }

    /// Replaces the entire registry with `sinks`, in the given order.
    pub fn set_services(&self, sinks: Vec<Arc<dyn Sink>>) -> &Self {
        self.set_service_slots(sinks.into_iter().map(Some).collect())
    }

    /// Raw form of [`set_services`](Self::set_services): slots may be empty.
    ///
    /// An empty slot is still "registered": `send` fails loudly when it
    /// reaches one instead of skipping it.
    pub fn set_service_slots(&self, slots: Vec<Option<Arc<dyn Sink>>>) -> &Self {
        let mut services = self.services.write().unwrap();
        debug!(count = slots.len(), "replacing sink registry");
        *services = slots;
        self
    }

    /// Fans `message` out to every registered sink, in registration order.
    ///
    /// The ambient severity threshold is set to `level` before delivery
    /// starts. The first failing sink aborts the fan-out: sinks after it do
    /// not receive the message, and the fault surfaces unmodified. Level
    /// validation is each sink's concern, not the dispatcher's.
    pub fn send(&self, message: &str, level: Level) -> Result<&Self> {
        level::change_ambient_level(level);
        let services = self.services.read().unwrap().clone();
        for (index, slot) in services.iter().enumerate() {
            match slot {
                Some(sink) => {
                    if let Err(err) = sink.send_message(message, level) {
                        warn!(sink = sink.name(), index, error = %err, "fan-out aborted by sink fault");
                        return Err(err);
                    }
                }
                None => {
                    warn!(index, "fan-out aborted by empty registry slot");
                    return Err(LogfanError::MissingSink { index });
                }
            }
        }
        Ok(self)
    }

    /// Number of registered slots, empty ones included.
    pub fn service_count(&self) -> usize {
        self.services.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.read().unwrap().is_empty()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL: Lazy<Dispatcher> = Lazy::new(Dispatcher::new);

/// Process-wide dispatcher facade.
///
/// Wraps one static [`Dispatcher`] whose registry lives until process exit
/// and is only ever reset by another `set_services` call. Tests that share
/// the facade must re-set the registry between runs. Callers that prefer an
/// explicit handle over global state can construct their own [`Dispatcher`]
/// or thread [`Logging::global`] through their code.
pub struct Logging;

impl Logging {
    /// The dispatcher behind the facade.
    pub fn global() -> &'static Dispatcher {
        &GLOBAL
    }

    /// Replaces the process-wide registry; returns the dispatcher for call
    /// chaining with an immediately following `send`.
    pub fn set_services(sinks: Vec<Arc<dyn Sink>>) -> &'static Dispatcher {
        GLOBAL.set_services(sinks)
    }

    /// Fans `message` out through the process-wide registry.
    pub fn send(message: &str, level: Level) -> Result<&'static Dispatcher> {
        GLOBAL.send(message, level)
    }
}
