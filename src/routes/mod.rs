//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Slack calls two endpoints: `/slash` when someone types the kicker command
//! and `/interactive` when someone clicks a lobby button. Both bodies are
//! form-encoded. Every protocol failure answers 500 with an empty body; the
//! details go to the log, never to the channel.

pub mod interactive;
pub mod slash;

use axum::Router;
use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::lobby::LobbyError;
use crate::state::AppState;

/// Build the service router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/slash", post(slash::handle_command))
        .route("/interactive", post(interactive::handle_interaction))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Protocol errors are operator-facing only: log, then a bare 500.
pub(crate) fn lobby_error_to_status(err: LobbyError) -> StatusCode {
    error!(error = %err, "lobby request failed");
    StatusCode::INTERNAL_SERVER_ERROR
}

pub(crate) fn form_rejection_to_status(rejection: FormRejection) -> StatusCode {
    error!(error = %rejection, "failed to decode form body");
    StatusCode::INTERNAL_SERVER_ERROR
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
