//! Shared application state for axum handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use homegraph_engine::{Clock, Engine};

/// Application state shared across all axum handlers.
///
/// The engine executes every operation synchronously and atomically; the
/// mutex is what realizes that contract under concurrent HTTP requests.
/// `Clone` is implemented manually so the engine itself does not need to be
/// `Clone` — only the `Arc` wrapper is cloned.
pub struct AppState<C> {
    /// The command/state engine behind a single async lock.
    pub engine: Arc<Mutex<Engine<C>>>,
}

impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
        }
    }
}

impl<C: Clock> AppState<C> {
    /// Create a new application state owning the engine.
    pub fn new(engine: Engine<C>) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
        }
    }

    /// Create a new application state from a pre-wrapped engine.
    ///
    /// Use this when the engine needs to be shared with a background driver
    /// before constructing the HTTP state.
    #[must_use]
    pub fn from_arc(engine: Arc<Mutex<Engine<C>>>) -> Self {
        Self { engine }
    }
}
