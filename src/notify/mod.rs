//! Email notifications for schedule edits.
//!
//! # Data Flow
//! ```text
//! ai-edit handler (after persisting)
//!     → EmailMessage
//!     → spawn_notification (detached tokio task)
//!     → Notifier::send (resend.rs over HTTPS)
//!     → outcome logged, never reported to the request
//! ```

pub mod resend;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::JoinHandle;

pub use resend::ResendClient;

use crate::config::EmailConfig;

/// Request body for the email service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

impl EmailMessage {
    /// Notification announcing an applied schedule edit.
    pub fn schedule_edited(config: &EmailConfig, instruction: &str, time: &str) -> Self {
        Self {
            from: config.from.clone(),
            to: config.to.clone(),
            subject: config.subject.clone(),
            html: format!(
                "<p>The trip schedule was updated.</p>\
                 <p><strong>Change:</strong> {}</p>\
                 <p><small>{}</small></p>",
                escape_html(instruction),
                escape_html(time)
            ),
        }
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("email service returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("email transport error: {0}")]
    Transport(String),
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<(), NotifyError>;
}

/// Send `message` on a detached task.
///
/// The caller never awaits the handle on the request path; it is returned so
/// tests can observe completion.
pub fn spawn_notification(notifier: Arc<dyn Notifier>, message: EmailMessage) -> JoinHandle<()> {
    tokio::spawn(async move {
        let to = message.to.clone();
        match notifier.send(message).await {
            Ok(()) => tracing::info!(to = %to, "Notification sent"),
            Err(e) => tracing::warn!(to = %to, error = %e, "Notification failed"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Failing(AtomicUsize);

    #[async_trait]
    impl Notifier for Failing {
        async fn send(&self, _message: EmailMessage) -> Result<(), NotifyError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(NotifyError::Transport("connection refused".into()))
        }
    }

    #[test]
    fn test_message_escapes_instruction() {
        let msg = EmailMessage::schedule_edited(
            &EmailConfig::default(),
            "<b>Lunch</b> & snorkel",
            "2026-10-19T10:00:00.000Z",
        );
        assert!(msg.html.contains("&lt;b&gt;Lunch&lt;/b&gt; &amp; snorkel"));
        assert_eq!(msg.subject, "Schedule updated");
    }

    #[tokio::test]
    async fn test_failed_send_is_swallowed() {
        let notifier = Arc::new(Failing(AtomicUsize::new(0)));
        let msg = EmailMessage::schedule_edited(&EmailConfig::default(), "x", "t");
        spawn_notification(notifier.clone(), msg).await.unwrap();
        assert_eq!(notifier.0.load(Ordering::SeqCst), 1);
    }
}
