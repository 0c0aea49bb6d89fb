//! Escalation notifications for review results.
//!
//! Delivery failure never propagates: the review result stands on its
//! own, and the dispatch outcome records what happened to the message.

mod compose;
mod outbox;

pub use compose::compose;
pub use outbox::FileOutbox;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use linewatch_model::{ProjectConfig, ReviewResult};

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to write outbox file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("mail transport failed: {0}")]
    Transport(String),
}

/// A composed escalation message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundEmail {
    pub to: String,
    #[serde(default)]
    pub cc: Vec<String>,
    pub subject: String,
    pub html_body: String,
}

/// Outbound transport boundary. The real relay lives outside this crate.
pub trait Mailer: Send + Sync {
    fn send(&self, email: &OutboundEmail) -> Result<(), NotifyError>;
}

/// What happened to the notification for one review result.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NotificationOutcome {
    pub attempted: bool,
    pub delivered: bool,
    pub recipient: Option<String>,
    pub subject: Option<String>,
    pub error: Option<String>,
}

/// Composes and sends the escalation for a review result.
pub struct Notifier<'a> {
    mailer: &'a dyn Mailer,
}

impl<'a> Notifier<'a> {
    pub fn new(mailer: &'a dyn Mailer) -> Self {
        Self { mailer }
    }

    pub fn dispatch(&self, review: &ReviewResult, project: &ProjectConfig) -> NotificationOutcome {
        let Some(email) = compose(review, project) else {
            debug!(report = %review.report_id, "no notification required");
            return NotificationOutcome::default();
        };

        let mut outcome = NotificationOutcome {
            attempted: true,
            delivered: false,
            recipient: Some(email.to.clone()),
            subject: Some(email.subject.clone()),
            error: None,
        };
        match self.mailer.send(&email) {
            Ok(()) => {
                outcome.delivered = true;
                info!(to = %email.to, report = %review.report_id, "compliance notification sent");
            }
            Err(error) => {
                warn!(%error, report = %review.report_id, "notification delivery failed");
                outcome.error = Some(error.to_string());
            }
        }
        outcome
    }
}
