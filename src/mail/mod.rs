//! Delivery Collaborator (SMTP)
//!
//! Email delivery sits behind the [`SmtpSender`] trait so tests can
//! substitute a recording mock and the deliverer never touches the network
//! directly. [`SmtpMailer`] is the production implementation, an async
//! lettre transport over STARTTLS with credential authentication.

use crate::types::Result;
use async_trait::async_trait;

/// Trait for SMTP sending.
#[async_trait]
pub trait SmtpSender: Send + Sync {
    /// Send a plain-text email; returns the transport response code on
    /// success and a human-readable description on failure.
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<String>;
}

/// SMTP connection settings for the mailer.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// SMTP relay hostname.
    pub smtp_host: String,
    /// SMTP relay port (STARTTLS).
    pub smtp_port: u16,
    /// SMTP username.
    pub username: String,
    /// SMTP password or app-specific token.
    pub password: String,
    /// Address reports are sent from.
    pub from_address: String,
}

/// Real SMTP sender using lettre.
pub struct SmtpMailer {
    config: MailConfig,
}

impl SmtpMailer {
    /// Create a mailer from connection settings. Credentials arrive as
    /// explicit configuration; nothing is read from the process
    /// environment here.
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SmtpSender for SmtpMailer {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<String> {
        use crate::types::AppError;

        let email = lettre::Message::builder()
            .from(
                self.config
                    .from_address
                    .parse()
                    .map_err(|e| AppError::Configuration(format!("Invalid from address: {e}")))?,
            )
            .to(to
                .parse()
                .map_err(|e| AppError::Configuration(format!("Invalid to address: {e}")))?)
            .subject(subject)
            .body(body.to_string())
            .map_err(|e| AppError::Configuration(format!("Failed to build email: {e}")))?;

        let creds = lettre::transport::smtp::authentication::Credentials::new(
            self.config.username.clone(),
            self.config.password.clone(),
        );

        let mailer =
            lettre::AsyncSmtpTransport::<lettre::Tokio1Executor>::starttls_relay(&self.config.smtp_host)
                .map_err(|e| AppError::Configuration(format!("SMTP relay error: {e}")))?
                .port(self.config.smtp_port)
                .credentials(creds)
                .build();

        use lettre::AsyncTransport;
        let response = mailer
            .send(email)
            .await
            .map_err(|e| AppError::Mail(format!("SMTP send error: {e}")))?;

        Ok(format!("{}", response.code()))
    }
}
