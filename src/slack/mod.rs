//! Slack wire types — slash commands, interaction callbacks, messages.
//!
//! ARCHITECTURE
//! ============
//! Only the fields the lobby reads or writes are modelled. Slack sends more
//! (ids, team info, block kit fields); serde drops what is not declared here.
//! Inbound requests are `application/x-www-form-urlencoded`: slash commands
//! as flat fields, interactions as one `payload` field holding JSON.

pub mod codec;

use serde::{Deserialize, Serialize};

// =============================================================================
// INBOUND
// =============================================================================

/// Form body of a slash command invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct SlashCommand {
    pub command: String,
    pub user_id: String,
    #[serde(default)]
    pub channel_id: String,
}

/// Form body of an interactive-message callback.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionForm {
    pub payload: String,
}

/// JSON carried in `InteractionForm::payload`.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionCallback {
    #[serde(default)]
    pub actions: Vec<CallbackAction>,
    pub user: CallbackUser,
    /// The lobby message as last rendered. This is the lobby state.
    pub original_message: Message,
    #[serde(default)]
    pub response_url: String,
    #[serde(default)]
    pub message_ts: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackAction {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackUser {
    pub id: String,
}

// =============================================================================
// MESSAGES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    InChannel,
    Ephemeral,
}

/// A message as sent to, and echoed back by, Slack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_type: Option<ResponseType>,
    #[serde(default)]
    pub replace_original: bool,
    #[serde(default)]
    pub delete_original: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<String>,
}

/// One lobby slot as rendered: a titled, coloured block with one button.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub fallback: String,
    #[serde(default)]
    pub callback_id: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub actions: Vec<AttachmentAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentAction {
    /// Action identifier, `button-{join|leave}-{index}`.
    pub name: String,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub style: String,
    /// Occupant user ID; empty for a free slot.
    #[serde(default)]
    pub value: String,
}
