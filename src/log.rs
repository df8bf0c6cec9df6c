// src/log.rs
// =============================================================================
// Log sinks.
//
// The store and the crawler never print directly. They are handed a sink at
// construction time and send every human-readable message through it, so a
// front-end can redirect progress to a text widget, stdout, or nowhere.
//
// Sinks:
// - TracingSink: forwards to `tracing` (the default, used by the CLI)
// - StdoutSink: plain println!
// - NullSink: drops everything
// - CallbackSink: wraps any closure (a status bar, a channel, a Vec)
//
// Unit tests also get a MemorySink that records messages for assertions.
// =============================================================================

use std::sync::Arc;
#[cfg(test)]
use std::sync::Mutex;

/// Something that accepts one log line at a time
pub trait LogSink: Send + Sync {
    fn log(&self, message: &str);
}

/// Shared handle type passed into the store and crawler
pub type SharedSink = Arc<dyn LogSink>;

/// Default sink: every message becomes a tracing info event
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, message: &str) {
        tracing::info!("{}", message);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl LogSink for StdoutSink {
    fn log(&self, message: &str) {
        println!("{}", message);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl LogSink for NullSink {
    fn log(&self, _message: &str) {}
}

/// Adapts a closure into a sink
///
/// Example:
///   let sink = CallbackSink(|msg: &str| status_bar.set_text(msg));
pub struct CallbackSink<F>(pub F);

impl<F> LogSink for CallbackSink<F>
where
    F: Fn(&str) + Send + Sync,
{
    fn log(&self, message: &str) {
        (self.0)(message)
    }
}

/// Collects messages so tests can inspect them afterwards
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Mutex<Vec<String>>,
}

#[cfg(test)]
impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// True if any collected message contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.messages().iter().any(|m| m.contains(needle))
    }
}

#[cfg(test)]
impl LogSink for MemorySink {
    fn log(&self, message: &str) {
        match self.messages.lock() {
            Ok(mut guard) => guard.push(message.to_string()),
            Err(poisoned) => poisoned.into_inner().push(message.to_string()),
        }
    }
}

/// The sink used when the caller does not provide one
pub fn default_sink() -> SharedSink {
    Arc::new(TracingSink)
}
