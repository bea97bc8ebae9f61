//! Lobby — the kicker sign-up state machine.
//!
//! DESIGN
//! ======
//! There is no store. The chat message carrying the lobby *is* the lobby:
//! every interaction delivers the last rendered snapshot, the engine computes
//! the next one, and the platform redisplays it. `slack::codec` translates
//! between the wire message and `LobbySnapshot`, so nothing in this module
//! sees JSON.
//!
//! A slot is either free (exposes `Join`) or occupied (exposes `Leave`).
//! A lobby ends when every slot is occupied (full) or none is (cancelled);
//! terminal snapshots carry no slots, so a late click against one can only
//! fail as an out-of-range action.

pub mod action;
pub mod engine;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

pub use action::{ActionKind, ActionTarget};
pub use engine::{ActionEvent, Broadcast, LobbyEngine, Outcome, ReplyAddress, Transition};

/// Number of seats at a kicker table.
pub const DEFAULT_LOBBY_SIZE: usize = 4;

pub const FREE_SLOT_TITLE: &str = "Free Slot";
pub const CREATED_ANNOUNCEMENT: &str = "New kicker game created. Feel free to join!";
pub const FULL_ANNOUNCEMENT: &str = "Enjoy the game! :soccer:";
pub const CANCELLED_ANNOUNCEMENT: &str = "This game has been cancelled!";

// =============================================================================
// ERRORS
// =============================================================================

/// Protocol-level failures. Each one fails the whole request; none of them
/// is shown to the acting user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LobbyError {
    #[error("unrecognized command: {0}")]
    UnrecognizedCommand(String),
    #[error("unrecognized action: {0}")]
    UnrecognizedAction(String),
    #[error("malformed lobby snapshot: {0}")]
    MalformedSnapshot(String),
}

/// Business rejections. Not errors: the request succeeds with a private
/// advisory and the lobby is left exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The user already holds a slot somewhere in this lobby.
    AlreadyJoined,
    /// The targeted slot was taken by someone else after the button rendered.
    SlotTaken,
    /// The user tried to vacate a slot they do not hold.
    NotYourSpot,
}

impl Rejection {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::AlreadyJoined => "You are already occupying a spot in this game, leave some room to others!",
            Self::SlotTaken => "Someone was faster and took this spot, try another one!",
            Self::NotYourSpot => "You can not leave a spot that belongs to someone else!",
        }
    }
}

// =============================================================================
// SLOT
// =============================================================================

/// One seat. `index` is the slot's permanent identity and is also embedded
/// in its action identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub index: usize,
    pub occupant: Option<String>,
    /// Display title. Presentation only; occupancy is decided by `occupant`.
    pub title: String,
}

impl Slot {
    #[must_use]
    pub fn free(index: usize) -> Self {
        Self { index, occupant: None, title: FREE_SLOT_TITLE.to_owned() }
    }

    #[must_use]
    pub fn occupied(index: usize, user_id: &str) -> Self {
        Self { index, occupant: Some(user_id.to_owned()), title: joined_title(user_id) }
    }

    /// The only action currently legal on this slot.
    #[must_use]
    pub fn available_action(&self) -> ActionKind {
        if self.occupant.is_some() { ActionKind::Leave } else { ActionKind::Join }
    }

    /// Identifier of the button this slot exposes.
    #[must_use]
    pub fn action_target(&self) -> ActionTarget {
        ActionTarget { index: self.index, kind: self.available_action() }
    }

    #[must_use]
    pub fn is_occupied_by(&self, user_id: &str) -> bool {
        self.occupant.as_deref() == Some(user_id)
    }

    fn occupy(&mut self, user_id: &str) {
        self.occupant = Some(user_id.to_owned());
        self.title = joined_title(user_id);
    }

    fn vacate(&mut self, user_id: &str) {
        self.occupant = None;
        self.title = left_title(user_id);
    }
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Complete state of one lobby, exactly as carried by the chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LobbySnapshot {
    pub slots: Vec<Slot>,
    pub announcement: String,
}

impl LobbySnapshot {
    /// A lobby that has ended: no slots, only announcement text.
    #[must_use]
    pub fn terminal(announcement: &str) -> Self {
        Self { slots: Vec::new(), announcement: announcement.to_owned() }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.slots.is_empty()
    }

    /// Occupant IDs in slot order.
    #[must_use]
    pub fn occupants(&self) -> Vec<String> {
        self.slots.iter().filter_map(|slot| slot.occupant.clone()).collect()
    }
}

// =============================================================================
// TEXT
// =============================================================================

/// Platform mention markup for a user ID.
#[must_use]
pub fn mention(user_id: &str) -> String {
    format!("<@{user_id}>")
}

#[must_use]
pub fn joined_title(user_id: &str) -> String {
    format!("{} joined!", mention(user_id))
}

#[must_use]
pub fn left_title(user_id: &str) -> String {
    format!("{} left!", mention(user_id))
}

/// Rally call naming every player in slot order.
#[must_use]
pub fn rally_text(occupants: &[String]) -> String {
    let names: Vec<String> = occupants.iter().map(|id| mention(id)).collect();
    format!("{} GO GO GO!", names.join(", "))
}
