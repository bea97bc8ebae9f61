//! `POST /slash` — open a new lobby.

use axum::Form;
use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::Json;
use tracing::info;

use crate::routes::{form_rejection_to_status, lobby_error_to_status};
use crate::slack::codec;
use crate::slack::{Message, SlashCommand};
use crate::state::AppState;

/// Answer the slash command with a public lobby message, invoker seated.
pub async fn handle_command(
    State(state): State<AppState>,
    form: Result<Form<SlashCommand>, FormRejection>,
) -> Result<Json<Message>, StatusCode> {
    let Form(command) = form.map_err(form_rejection_to_status)?;

    let snapshot = state
        .engine
        .initialize(&command.command, &command.user_id)
        .map_err(lobby_error_to_status)?;

    info!(user_id = %command.user_id, channel_id = %command.channel_id, slots = snapshot.slots.len(), "lobby created");
    Ok(Json(codec::encode_lobby(&snapshot)))
}
