//! Mail dispatch seam.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailDetails {
    pub to: Vec<String>,
    pub subject: String,
    pub text: Option<String>,
    pub html: Option<String>,
}

impl EmailDetails {
    pub fn new(to: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            to: vec![to.into()],
            subject: subject.into(),
            text: None,
            html: None,
        }
    }

    pub fn to_many(to: impl IntoIterator<Item = impl Into<String>>, subject: impl Into<String>) -> Self {
        Self {
            to: to.into_iter().map(Into::into).collect(),
            subject: subject.into(),
            text: None,
            html: None,
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailReceipt {
    pub message_id: String,
    pub accepted: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("mailer unavailable: {0}")]
    Unavailable(String),

    #[error("invalid email: {0}")]
    InvalidDetails(String),

    #[error("mail rejected: {0}")]
    Rejected(String),

    #[error("mail transport failed: {0}")]
    Transport(String),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_mail(&self, details: &EmailDetails) -> Result<MailReceipt, MailError>;
}

#[async_trait]
pub trait MailerProvider: Send + Sync {
    async fn get_mailer(&self) -> Result<Arc<dyn Mailer>, MailError>;
}

/// Writes each dispatch to the log instead of delivering it.
#[derive(Debug, Default)]
pub struct LogMailer {
    sent: AtomicU64,
}

impl LogMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> u64 {
        self.sent.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send_mail(&self, details: &EmailDetails) -> Result<MailReceipt, MailError> {
        if details.to.is_empty() {
            return Err(MailError::InvalidDetails("no recipients".to_string()));
        }
        if details.text.is_none() && details.html.is_none() {
            return Err(MailError::InvalidDetails("empty body".to_string()));
        }

        let n = self.sent.fetch_add(1, Ordering::Relaxed) + 1;
        let message_id = format!("log-{n}");
        info!(
            message_id = %message_id,
            to = ?details.to,
            subject = %details.subject,
            "mail dispatched"
        );

        Ok(MailReceipt {
            message_id,
            accepted: details.to.clone(),
        })
    }
}

#[derive(Clone, Default)]
pub struct LogMailerProvider {
    mailer: Arc<LogMailer>,
}

impl LogMailerProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mailer(&self) -> Arc<LogMailer> {
        self.mailer.clone()
    }
}

#[async_trait]
impl MailerProvider for LogMailerProvider {
    async fn get_mailer(&self) -> Result<Arc<dyn Mailer>, MailError> {
        Ok(self.mailer.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_mailer_returns_receipt() {
        let mailer = LogMailer::new();
        let details = EmailDetails::new("ada@example.com", "Hi").text("hello");

        let receipt = mailer.send_mail(&details).await.unwrap();
        assert_eq!(receipt.message_id, "log-1");
        assert_eq!(receipt.accepted, vec!["ada@example.com"]);
        assert_eq!(mailer.sent(), 1);
    }

    #[tokio::test]
    async fn test_log_mailer_rejects_incomplete_details() {
        let mailer = LogMailer::new();

        let no_body = EmailDetails::new("ada@example.com", "Hi");
        assert!(matches!(
            mailer.send_mail(&no_body).await,
            Err(MailError::InvalidDetails(_))
        ));

        let no_recipients = EmailDetails::to_many(Vec::<String>::new(), "Hi").text("x");
        assert!(matches!(
            mailer.send_mail(&no_recipients).await,
            Err(MailError::InvalidDetails(_))
        ));
        assert_eq!(mailer.sent(), 0);
    }
}
