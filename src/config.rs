//! Service configuration parsed from environment variables.

use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_COMMAND: &str = "/kicker";
pub const DEFAULT_BROADCAST_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_BROADCAST_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Smallest lobby that can both fill and empty on separate clicks.
pub const MIN_LOBBY_SIZE: usize = 2;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but does not parse.
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },

    #[error("{var} must be at least {min}, got {value}")]
    TooSmall { var: &'static str, min: usize, value: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    /// Slash command that opens a lobby.
    pub command: String,
    pub lobby_size: usize,
    pub broadcast: BroadcastTimeouts,
}

impl Config {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `KICKER_COMMAND`: default `/kicker`
    /// - `KICKER_LOBBY_SIZE`: default 4, at least 2
    /// - `BROADCAST_REQUEST_TIMEOUT_SECS`: default 10
    /// - `BROADCAST_CONNECT_TIMEOUT_SECS`: default 5
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to something unparseable or the
    /// lobby size is too small.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`Config::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let command = lookup("KICKER_COMMAND")
            .map(|raw| raw.trim().to_owned())
            .filter(|raw| !raw.is_empty())
            .unwrap_or_else(|| DEFAULT_COMMAND.to_owned());

        let lobby_size = parse_or(&lookup, "KICKER_LOBBY_SIZE", crate::lobby::DEFAULT_LOBBY_SIZE)?;
        if lobby_size < MIN_LOBBY_SIZE {
            return Err(ConfigError::TooSmall { var: "KICKER_LOBBY_SIZE", min: MIN_LOBBY_SIZE, value: lobby_size });
        }

        let broadcast = BroadcastTimeouts {
            request_secs: parse_or(&lookup, "BROADCAST_REQUEST_TIMEOUT_SECS", DEFAULT_BROADCAST_REQUEST_TIMEOUT_SECS)?,
            connect_secs: parse_or(&lookup, "BROADCAST_CONNECT_TIMEOUT_SECS", DEFAULT_BROADCAST_CONNECT_TIMEOUT_SECS)?,
        };

        Ok(Self { port, command, lobby_size, broadcast })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|_| ConfigError::Invalid { var, value: raw }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
