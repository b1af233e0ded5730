//! SMTP implementation of the EmailSender trait using lettre.

use async_trait::async_trait;
use lettre::message::{header, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::instrument;

use ea_core::errors::DomainError;
use ea_core::services::{EmailMessage, EmailSender};
use ea_shared::config::EmailConfig;
use ea_shared::utils::mask_email;

use crate::InfrastructureError;

/// Sends plain-text code emails through an SMTP relay
pub struct SmtpEmailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpEmailSender {
    /// Builds the transport once; connections are opened per message
    pub fn new(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        let from: Mailbox = config.from_address.parse().map_err(|e| {
            InfrastructureError::Config(format!("Invalid SMTP_FROM address: {}", e))
        })?;

        let builder = if config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host).map_err(|e| {
                InfrastructureError::Email(format!("Failed to create SMTP relay: {}", e))
            })?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
        };

        let builder = builder.port(config.smtp_port);
        let builder = match config.credentials() {
            Some((user, pass)) => {
                builder.credentials(Credentials::new(user.to_string(), pass.to_string()))
            }
            None => builder,
        };

        tracing::info!(
            host = %config.smtp_host,
            port = config.smtp_port,
            tls = config.use_tls,
            "SMTP transport configured"
        );

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    /// Assembles the lettre message for a rendered email
    pub(crate) fn build_message(
        from: &Mailbox,
        message: &EmailMessage,
    ) -> Result<Message, InfrastructureError> {
        let to: Mailbox = message
            .to
            .parse()
            .map_err(|e| InfrastructureError::Email(format!("Invalid recipient: {}", e)))?;

        Message::builder()
            .from(from.clone())
            .to(to)
            .subject(message.subject.clone())
            .header(header::ContentType::TEXT_PLAIN)
            .body(message.body.clone())
            .map_err(|e| InfrastructureError::Email(format!("Failed to build email: {}", e)))
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    #[instrument(skip(self, message), fields(to = %mask_email(&message.to)))]
    async fn send(&self, message: EmailMessage) -> Result<(), DomainError> {
        let email = Self::build_message(&self.from, &message)?;

        self.transport.send(email).await.map_err(|e| {
            tracing::error!(error = %e, "SMTP delivery failed");
            InfrastructureError::Email(format!("Failed to send email: {}", e))
        })?;

        tracing::debug!("Email handed to SMTP relay");
        Ok(())
    }
}
