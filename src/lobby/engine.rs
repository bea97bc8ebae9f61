//! Lobby engine — initializer and transition function.
//!
//! DESIGN
//! ======
//! `LobbyEngine` is pure: it takes a snapshot in and hands a snapshot back,
//! never touching the network. A transition that fills the lobby also
//! describes a broadcast; the caller decides when and how to send it.
//!
//! Validation happens before any mutation, so a rejected action returns the
//! incoming snapshot untouched.
//!
//! KNOWN GAP
//! =========
//! Two clicks racing on the same stale message each see the same free slot
//! and each produce an "occupied" snapshot. Whichever the platform renders
//! last wins. The platform is the only arbiter of message order, so the
//! engine does not try to detect this.

use tracing::{debug, info};

use super::{
    ActionKind, ActionTarget, CANCELLED_ANNOUNCEMENT, CREATED_ANNOUNCEMENT, FULL_ANNOUNCEMENT, LobbyError,
    LobbySnapshot, Rejection, Slot, rally_text,
};

// =============================================================================
// TYPES
// =============================================================================

/// Where the full-lobby broadcast goes. Opaque to the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplyAddress {
    pub url: String,
    /// Message to thread the broadcast under, when the platform supplies one.
    pub thread: Option<String>,
}

/// One click, already decoded at the boundary.
#[derive(Debug, Clone)]
pub struct ActionEvent {
    pub acting_user: String,
    pub target: ActionTarget,
    pub snapshot: LobbySnapshot,
    pub reply_to: ReplyAddress,
}

/// Primary result of a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Lobby still forming; the mutated snapshot replaces the old message.
    Updated(LobbySnapshot),
    /// Every slot taken. Terminal.
    Full(LobbySnapshot),
    /// Every slot vacated. Terminal.
    Cancelled(LobbySnapshot),
    /// Action refused. `snapshot` is the input, unchanged.
    Rejected { rejection: Rejection, snapshot: LobbySnapshot },
}

/// Side-channel announcement emitted when a lobby fills.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Broadcast {
    pub reply_to: ReplyAddress,
    /// Occupants in slot order.
    pub occupants: Vec<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub outcome: Outcome,
    pub broadcast: Option<Broadcast>,
}

impl Transition {
    fn primary(outcome: Outcome) -> Self {
        Self { outcome, broadcast: None }
    }
}

// =============================================================================
// ENGINE
// =============================================================================

#[derive(Debug, Clone)]
pub struct LobbyEngine {
    command: String,
    size: usize,
}

impl LobbyEngine {
    #[must_use]
    pub fn new(command: impl Into<String>, size: usize) -> Self {
        Self { command: command.into(), size }
    }

    /// Build a fresh lobby with the invoking user in slot 0.
    ///
    /// # Errors
    ///
    /// Returns `UnrecognizedCommand` if `command` is not the configured one.
    pub fn initialize(&self, command: &str, user_id: &str) -> Result<LobbySnapshot, LobbyError> {
        if command != self.command {
            return Err(LobbyError::UnrecognizedCommand(command.to_owned()));
        }

        let slots = (0..self.size)
            .map(|index| if index == 0 { Slot::occupied(index, user_id) } else { Slot::free(index) })
            .collect();

        Ok(LobbySnapshot { slots, announcement: CREATED_ANNOUNCEMENT.to_owned() })
    }

    /// Apply one click to the snapshot it carried.
    ///
    /// # Errors
    ///
    /// Returns `UnrecognizedAction` if the target slot does not exist (this
    /// includes every click against a terminal snapshot), and
    /// `MalformedSnapshot` if the snapshot is not shaped like a lobby of the
    /// configured size.
    pub fn transition(&self, event: ActionEvent) -> Result<Transition, LobbyError> {
        let ActionEvent { acting_user, target, mut snapshot, reply_to } = event;

        if snapshot.is_terminal() || target.index >= snapshot.slots.len() {
            return Err(LobbyError::UnrecognizedAction(target.to_string()));
        }
        self.check_shape(&snapshot)?;

        if let Some(rejection) = validate(&snapshot, target, &acting_user) {
            debug!(user_id = %acting_user, action = %target, ?rejection, "lobby action rejected");
            return Ok(Transition::primary(Outcome::Rejected { rejection, snapshot }));
        }

        let Some(slot) = snapshot.slots.get_mut(target.index) else {
            return Err(LobbyError::UnrecognizedAction(target.to_string()));
        };
        match target.kind {
            ActionKind::Join => slot.occupy(&acting_user),
            ActionKind::Leave => slot.vacate(&acting_user),
        }

        let occupants = snapshot.occupants();
        info!(user_id = %acting_user, action = %target, occupancy = occupants.len(), "lobby action applied");

        if occupants.len() == self.size {
            let broadcast = Broadcast { reply_to, text: rally_text(&occupants), occupants };
            return Ok(Transition {
                outcome: Outcome::Full(LobbySnapshot::terminal(FULL_ANNOUNCEMENT)),
                broadcast: Some(broadcast),
            });
        }
        if occupants.is_empty() {
            return Ok(Transition::primary(Outcome::Cancelled(LobbySnapshot::terminal(CANCELLED_ANNOUNCEMENT))));
        }

        Ok(Transition::primary(Outcome::Updated(snapshot)))
    }

    fn check_shape(&self, snapshot: &LobbySnapshot) -> Result<(), LobbyError> {
        if snapshot.slots.len() != self.size {
            return Err(LobbyError::MalformedSnapshot(format!(
                "expected {} slots, found {}",
                self.size,
                snapshot.slots.len()
            )));
        }
        if let Some((position, slot)) = snapshot.slots.iter().enumerate().find(|(i, slot)| slot.index != *i) {
            return Err(LobbyError::MalformedSnapshot(format!(
                "slot at position {position} claims index {}",
                slot.index
            )));
        }
        Ok(())
    }
}

/// Decide whether `user_id` may perform `target` against `snapshot`.
///
/// A user holds at most one slot across the whole lobby, and may only
/// vacate a slot they hold themselves.
fn validate(snapshot: &LobbySnapshot, target: ActionTarget, user_id: &str) -> Option<Rejection> {
    let slot = snapshot.slots.get(target.index)?;
    match target.kind {
        ActionKind::Join if snapshot.slots.iter().any(|s| s.is_occupied_by(user_id)) => Some(Rejection::AlreadyJoined),
        ActionKind::Join if slot.occupant.is_some() => Some(Rejection::SlotTaken),
        ActionKind::Leave if !slot.is_occupied_by(user_id) => Some(Rejection::NotYourSpot),
        _ => None,
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
