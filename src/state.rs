//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds no lobby data: every lobby lives in its own Slack message. What is
//! shared is configuration (the engine) and the outbound notifier, both
//! built once in `main` and passed in explicitly.

use std::sync::Arc;

use crate::lobby::LobbyEngine;
use crate::services::broadcast::Notifier;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<LobbyEngine>,
    /// Sends the full-lobby broadcast.
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    #[must_use]
    pub fn new(engine: LobbyEngine, notifier: Arc<dyn Notifier>) -> Self {
        Self { engine: Arc::new(engine), notifier }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
