//! SMTP email delivery using lettre's tokio transport.

use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use rc_shared::utils::email::mask_email;
use uuid::Uuid;

use super::email_service::{EmailMessage, EmailService};
use crate::config::EmailConfig;
use crate::InfrastructureError;

pub struct SmtpEmailService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpEmailService {
    /// Build the transport; no connection is opened until the first send
    pub fn new(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        let from = config.from_address.parse::<Mailbox>().map_err(|e| {
            InfrastructureError::Config(format!("Invalid SMTP_FROM address: {}", e))
        })?;

        let builder = if config.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
        }
        .map_err(|e| InfrastructureError::Config(format!("Invalid SMTP relay: {}", e)))?
        .port(config.smtp_port);

        let builder = match (&config.smtp_username, &config.smtp_password) {
            (Some(user), Some(password)) => {
                builder.credentials(Credentials::new(user.clone(), password.clone()))
            }
            _ => builder,
        };

        tracing::info!(
            host = %config.smtp_host,
            port = config.smtp_port,
            starttls = config.starttls,
            "SMTP email service initialized"
        );

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    fn build_message(
        &self,
        message: &EmailMessage,
        message_id: &str,
    ) -> Result<Message, InfrastructureError> {
        let to = message.to.parse::<Mailbox>().map_err(|e| {
            InfrastructureError::Email(format!(
                "Invalid recipient {}: {}",
                mask_email(&message.to),
                e
            ))
        })?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject.clone())
            .message_id(Some(message_id.to_string()))
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())
            .map_err(|e| InfrastructureError::Email(format!("Failed to build email: {}", e)))
    }
}

#[async_trait]
impl EmailService for SmtpEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        let domain = self.from.email.domain().to_string();
        let message_id = format!("<{}@{}>", Uuid::new_v4(), domain);
        let email = self.build_message(message, &message_id)?;

        self.transport.send(email).await.map_err(|e| {
            tracing::error!(to = %mask_email(&message.to), error = %e, "SMTP send failed");
            InfrastructureError::Email(format!("SMTP send failed: {}", e))
        })?;

        tracing::info!(
            to = %mask_email(&message.to),
            message_id = %message_id,
            "Email sent via SMTP"
        );
        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "SMTP"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_builds_message_with_headers() {
        let service = SmtpEmailService::new(&EmailConfig::default()).unwrap();
        let email = service
            .build_message(
                &EmailMessage {
                    to: "a@b.com".to_string(),
                    subject: "Your code".to_string(),
                    body: "751204".to_string(),
                },
                "<id@realtychance.com>",
            )
            .unwrap();

        let raw = String::from_utf8(email.formatted()).unwrap();
        assert!(raw.contains("To: a@b.com"));
        assert!(raw.contains("Subject: Your code"));
        assert!(raw.contains("Message-ID: <id@realtychance.com>"));
    }

    #[tokio::test]
    async fn test_invalid_sender_is_config_error() {
        let config = EmailConfig {
            from_address: "not a mailbox".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            SmtpEmailService::new(&config),
            Err(InfrastructureError::Config(_))
        ));
    }
}
