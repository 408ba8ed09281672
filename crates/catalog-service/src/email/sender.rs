//! Email sender trait and the non-SMTP implementations

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::info;

/// Delivers a single message
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), String>;
}

/// Writes messages to the log instead of sending them.
///
/// Used when no SMTP relay is configured.
#[derive(Debug, Default, Clone)]
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), String> {
        info!(to = %to, subject = %subject, body = %body, "Email not sent (no SMTP relay configured)");
        Ok(())
    }
}

/// A message captured by [`RecordingEmailSender`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Keeps every message in memory so tests can inspect links and tokens
#[derive(Debug, Default, Clone)]
pub struct RecordingEmailSender {
    sent: Arc<Mutex<Vec<SentEmail>>>,
    failing: bool,
}

impl RecordingEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sender whose every delivery fails
    pub fn failing() -> Self {
        Self {
            sent: Arc::default(),
            failing: true,
        }
    }

    /// Snapshot of all captured messages, oldest first
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    /// The newest message addressed to `to`
    pub fn last_to(&self, to: &str) -> Option<SentEmail> {
        self.sent().into_iter().rev().find(|email| email.to == to)
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), String> {
        if self.failing {
            return Err("delivery disabled".to_string());
        }
        self.sent
            .lock()
            .map_err(|e| e.to_string())?
            .push(SentEmail {
                to: to.to_string(),
                subject: subject.to_string(),
                body: body.to_string(),
            });
        Ok(())
    }
}
