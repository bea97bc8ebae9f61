//! Snapshot <-> Slack message translation.
//!
//! DESIGN
//! ======
//! Each slot renders as one attachment holding exactly one button. The
//! button's `name` is the slot's action identifier and its `value` is the
//! occupant ID (empty when free). Decoding reads those two fields back and
//! nothing else; title, colour and styling are presentation and are
//! regenerated on every encode.

use crate::lobby::{ActionKind, ActionTarget, Broadcast, LobbyError, LobbySnapshot, Rejection, Slot};

use super::{Attachment, AttachmentAction, Message, ResponseType};

pub const CALLBACK_ID: &str = "kicker";
pub const FALLBACK_TEXT: &str = "You are unable to answer this request";
pub const OCCUPIED_COLOR: &str = "#20aa20";
pub const FREE_COLOR: &str = "#DCDCDC";

// =============================================================================
// ENCODE
// =============================================================================

/// Public lobby message, as posted by the slash command.
#[must_use]
pub fn encode_lobby(snapshot: &LobbySnapshot) -> Message {
    Message {
        text: snapshot.announcement.clone(),
        attachments: snapshot.slots.iter().map(encode_slot).collect(),
        response_type: Some(ResponseType::InChannel),
        ..Message::default()
    }
}

/// Public lobby message that replaces the one the click came from.
#[must_use]
pub fn encode_update(snapshot: &LobbySnapshot) -> Message {
    Message { replace_original: true, ..encode_lobby(snapshot) }
}

/// Private advisory shown only to the acting user. The lobby stays as is.
#[must_use]
pub fn encode_rejection(rejection: Rejection) -> Message {
    Message {
        text: rejection.message().to_owned(),
        response_type: Some(ResponseType::Ephemeral),
        replace_original: false,
        delete_original: false,
        ..Message::default()
    }
}

/// Full-lobby rally call, posted as a new in-channel message.
#[must_use]
pub fn encode_broadcast(broadcast: &Broadcast) -> Message {
    Message {
        text: broadcast.text.clone(),
        response_type: Some(ResponseType::InChannel),
        replace_original: false,
        thread_ts: broadcast.reply_to.thread.clone(),
        ..Message::default()
    }
}

fn encode_slot(slot: &Slot) -> Attachment {
    let target = slot.action_target();
    let (text, style, color) = match target.kind {
        ActionKind::Join => ("Join", "primary", FREE_COLOR),
        ActionKind::Leave => ("Leave", "danger", OCCUPIED_COLOR),
    };

    Attachment {
        title: slot.title.clone(),
        fallback: FALLBACK_TEXT.to_owned(),
        callback_id: CALLBACK_ID.to_owned(),
        color: color.to_owned(),
        actions: vec![AttachmentAction {
            name: target.to_string(),
            text: text.to_owned(),
            kind: "button".to_owned(),
            style: style.to_owned(),
            value: slot.occupant.clone().unwrap_or_default(),
        }],
    }
}

// =============================================================================
// DECODE
// =============================================================================

/// Rebuild the lobby from the message a click was attached to.
///
/// # Errors
///
/// Returns `MalformedSnapshot` if an attachment lacks its button, the
/// button's identifier disagrees with the attachment's position, or the
/// identifier's action contradicts the occupant value.
pub fn decode_snapshot(message: &Message) -> Result<LobbySnapshot, LobbyError> {
    let slots = message
        .attachments
        .iter()
        .enumerate()
        .map(|(position, attachment)| decode_slot(position, attachment))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LobbySnapshot { slots, announcement: message.text.clone() })
}

fn decode_slot(position: usize, attachment: &Attachment) -> Result<Slot, LobbyError> {
    let malformed = |why: &str| LobbyError::MalformedSnapshot(format!("attachment {position}: {why}"));

    let action = attachment.actions.first().ok_or_else(|| malformed("no action"))?;
    let target: ActionTarget = action.name.parse().map_err(|_| malformed("unrecognized action name"))?;
    if target.index != position {
        return Err(malformed("action index does not match position"));
    }

    let occupant = (!action.value.is_empty()).then(|| action.value.clone());
    let slot = Slot { index: position, occupant, title: attachment.title.clone() };
    if slot.available_action() != target.kind {
        return Err(malformed("action does not match occupancy"));
    }

    Ok(slot)
}

#[cfg(test)]
#[path = "codec_test.rs"]
mod tests;
