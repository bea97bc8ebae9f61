//! `POST /interactive` — apply a lobby button click.
//!
//! The click's `original_message` is the lobby. It is decoded, run through
//! the engine, and the result is sent back as the replacement message (or a
//! private rejection). A full lobby also schedules the rally broadcast, which
//! is spawned only after the response body is built.

use axum::Form;
use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::Json;
use tracing::error;

use crate::lobby::{ActionEvent, ActionTarget, LobbyError, Outcome, ReplyAddress};
use crate::routes::{form_rejection_to_status, lobby_error_to_status};
use crate::services::broadcast;
use crate::slack::codec;
use crate::slack::{InteractionCallback, InteractionForm, Message};
use crate::state::AppState;

pub async fn handle_interaction(
    State(state): State<AppState>,
    form: Result<Form<InteractionForm>, FormRejection>,
) -> Result<Json<Message>, StatusCode> {
    let Form(form) = form.map_err(form_rejection_to_status)?;
    let callback: InteractionCallback = serde_json::from_str(&form.payload).map_err(|e| {
        error!(error = %e, "failed to decode interaction payload");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let event = action_event(&callback).map_err(lobby_error_to_status)?;
    let transition = state.engine.transition(event).map_err(lobby_error_to_status)?;

    let body = match &transition.outcome {
        Outcome::Rejected { rejection, .. } => codec::encode_rejection(*rejection),
        Outcome::Updated(snapshot) | Outcome::Full(snapshot) | Outcome::Cancelled(snapshot) => {
            codec::encode_update(snapshot)
        }
    };

    if let Some(rally) = transition.broadcast {
        broadcast::dispatch(state.notifier.clone(), rally);
    }

    Ok(Json(body))
}

/// Decode the click into the engine's input. The action identifier is parsed
/// here and nowhere else.
fn action_event(callback: &InteractionCallback) -> Result<ActionEvent, LobbyError> {
    let action = callback
        .actions
        .first()
        .ok_or_else(|| LobbyError::UnrecognizedAction("payload carries no action".into()))?;
    let target: ActionTarget = action.name.parse()?;
    let snapshot = codec::decode_snapshot(&callback.original_message)?;

    let thread = (!callback.message_ts.is_empty()).then(|| callback.message_ts.clone());
    Ok(ActionEvent {
        acting_user: callback.user.id.clone(),
        target,
        snapshot,
        reply_to: ReplyAddress { url: callback.response_url.clone(), thread },
    })
}
