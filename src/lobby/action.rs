//! Action identifiers — `button-{join|leave}-{index}`.
//!
//! The identifier is the only place slot identity travels with a click, so
//! it is decoded exactly once, at the boundary, into an `ActionTarget`.
//! Decoding is strict: anything `Display` would not have produced is
//! rejected, which keeps the wire form round-trippable.

use std::fmt;
use std::str::FromStr;

use super::LobbyError;

const PREFIX: &str = "button-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Join,
    Leave,
}

impl ActionKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Join => "join",
            Self::Leave => "leave",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "join" => Some(Self::Join),
            "leave" => Some(Self::Leave),
            _ => None,
        }
    }
}

/// Typed form of an action identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionTarget {
    pub index: usize,
    pub kind: ActionKind,
}

impl fmt::Display for ActionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}{}-{}", self.kind.as_str(), self.index)
    }
}

impl FromStr for ActionTarget {
    type Err = LobbyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unrecognized = || LobbyError::UnrecognizedAction(s.to_owned());

        let rest = s.strip_prefix(PREFIX).ok_or_else(unrecognized)?;
        let (kind, index) = rest.split_once('-').ok_or_else(unrecognized)?;
        let kind = ActionKind::parse(kind).ok_or_else(unrecognized)?;

        if !is_canonical_decimal(index) {
            return Err(unrecognized());
        }
        let index = index.parse::<usize>().map_err(|_| unrecognized())?;

        Ok(Self { index, kind })
    }
}

/// Digits only, no sign, no leading zeros.
fn is_canonical_decimal(raw: &str) -> bool {
    !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) && (raw == "0" || !raw.starts_with('0'))
}

#[cfg(test)]
#[path = "action_test.rs"]
mod tests;
