//! Broadcast service — best-effort delivery of the full-lobby rally call.
//!
//! DESIGN
//! ======
//! The interaction handler returns its primary response without waiting on
//! the network. When a transition carries a `Broadcast`, `dispatch` spawns a
//! task that posts it to the interaction's response URL. Delivery is a single
//! attempt; failures are logged and otherwise dropped.
//!
//! `Notifier` is the seam the handler depends on. `SlackNotifier` is the
//! production implementation; tests substitute a recording mock.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::config::BroadcastTimeouts;
use crate::lobby::Broadcast;
use crate::slack::Message;
use crate::slack::codec;

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// Transport-level failure: DNS, connect, timeout.
    #[error("broadcast request failed: {0}")]
    Request(String),

    /// Slack answered with a non-success status.
    #[error("broadcast rejected: status {status}: {body}")]
    Response { status: u16, body: String },
}

// =============================================================================
// NOTIFIER
// =============================================================================

#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Post `message` to a platform response URL.
    ///
    /// # Errors
    ///
    /// Returns a [`NotifyError`] if the request fails or is refused.
    async fn post(&self, url: &str, message: &Message) -> Result<(), NotifyError>;
}

/// Posts messages to Slack response URLs.
pub struct SlackNotifier {
    http: reqwest::Client,
}

impl SlackNotifier {
    /// # Errors
    ///
    /// Returns `HttpClientBuild` if the TLS backend cannot be initialized.
    pub fn new(timeouts: BroadcastTimeouts) -> Result<Self, NotifyError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| NotifyError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http })
    }
}

#[async_trait::async_trait]
impl Notifier for SlackNotifier {
    async fn post(&self, url: &str, message: &Message) -> Result<(), NotifyError> {
        let response = self
            .http
            .post(url)
            .json(message)
            .send()
            .await
            .map_err(|e| NotifyError::Request(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(NotifyError::Response { status: status.as_u16(), body })
    }
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Send `broadcast` in the background. The handle is only useful to tests;
/// production callers drop it.
pub fn dispatch(notifier: Arc<dyn Notifier>, broadcast: Broadcast) -> JoinHandle<()> {
    tokio::spawn(async move {
        let url = broadcast.reply_to.url.as_str();
        if url.is_empty() {
            warn!(occupants = ?broadcast.occupants, "full lobby has no response url; broadcast skipped");
            return;
        }

        let message = codec::encode_broadcast(&broadcast);
        match notifier.post(url, &message).await {
            Ok(()) => info!(occupants = ?broadcast.occupants, "full lobby broadcast delivered"),
            Err(e) => error!(error = %e, occupants = ?broadcast.occupants, "full lobby broadcast failed"),
        }
    })
}

#[cfg(test)]
#[path = "broadcast_test.rs"]
mod tests;
