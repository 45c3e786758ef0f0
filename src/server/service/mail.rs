//! Outbound email.
//!
//! Services depend on the `Mailer` trait rather than on SMTP directly. Production uses
//! `SmtpMailer` when an SMTP relay is configured and `LogMailer` otherwise, which only
//! writes the message to the log.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::server::{config::SmtpConfig, error::mail::MailError, model::event::Event};

/// Mailer shared through the application state.
pub type SharedMailer = Arc<dyn Mailer>;

/// A plain-text email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl Mail {
    /// One-time password for a password reset.
    pub fn otp(to: &str, code: &str, ttl_minutes: i64) -> Self {
        Self {
            to: to.to_string(),
            subject: "Your password reset code".to_string(),
            body: format!(
                "Your one-time password is {}.\n\nIt expires in {} minutes. If you did not request a password reset, you can ignore this email.",
                code, ttl_minutes
            ),
        }
    }

    /// Notice sent after a password was changed through the reset flow.
    pub fn password_changed(to: &str) -> Self {
        Self {
            to: to.to_string(),
            subject: "Your password was changed".to_string(),
            body: "The password of your account was just reset. If this was not you, contact an administrator immediately.".to_string(),
        }
    }

    /// Reminder for an office participating in an upcoming event.
    pub fn reminder(to: &str, office: &str, event: &Event) -> Self {
        Self {
            to: to.to_string(),
            subject: format!("Reminder: {} starts soon", event.program),
            body: format!(
                "Hello {},\n\nThis is a reminder that you are a participant of the following event.\n\nProgram: {}\nStart: {}\nEnd: {}\nPurpose: {}\nParticipants: {}\n",
                office,
                event.program,
                format_local(event.start_at),
                format_local(event.end_at),
                event.purpose,
                event.participants.join(", ")
            ),
        }
    }

    pub fn test(to: &str) -> Self {
        Self {
            to: to.to_string(),
            subject: "Test email".to_string(),
            body: "Mail delivery is configured correctly.".to_string(),
        }
    }
}

fn format_local(at: NaiveDateTime) -> String {
    at.format("%B %-d, %Y %-I:%M %p").to_string()
}

/// Delivers mail.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: Mail) -> Result<(), MailError>;
}

/// Sends mail through an authenticated SMTP relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Builds the relay transport from configuration.
    ///
    /// # Returns
    /// - `Ok(SmtpMailer)` - Transport ready, no connection is opened yet
    /// - `Err(MailError::Address)` - Sender address does not parse
    /// - `Err(MailError::Transport)` - Relay host is invalid
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let from = parse_mailbox(&config.from)?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: Mail) -> Result<(), MailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(parse_mailbox(&mail.to)?)
            .subject(mail.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(mail.body)?;

        self.transport.send(message).await?;

        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .trim()
        .parse::<Mailbox>()
        .map_err(|source| MailError::Address {
            address: address.to_string(),
            source,
        })
}

/// Writes mail to the log instead of sending it. Used when no SMTP relay is configured.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: Mail) -> Result<(), MailError> {
        tracing::info!(
            to = %mail.to,
            subject = %mail.subject,
            "SMTP not configured, email not sent"
        );

        Ok(())
    }
}

/// Captures mail in memory so tests can inspect what would have been sent.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingMailer {
    sent: std::sync::Mutex<Vec<Mail>>,
    fail: std::sync::atomic::AtomicBool,
}

#[cfg(test)]
impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following `send` fail.
    pub fn fail_deliveries(&self) {
        self.fail.store(true, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<Mail> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: Mail) -> Result<(), MailError> {
        if self.fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(MailError::Delivery(format!("refused mail to {}", mail.to)));
        }

        if let Ok(mut sent) = self.sent.lock() {
            sent.push(mail);
        }

        Ok(())
    }
}
