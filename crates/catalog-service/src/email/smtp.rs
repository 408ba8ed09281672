//! SMTP delivery through lettre

use async_trait::async_trait;
use catalog_common::SmtpConfig;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{
    message::header::ContentType, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use super::sender::EmailSender;

/// Hands a built message to the wire
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, email: Message) -> Result<(), String>;
}

#[async_trait]
impl MailTransport for AsyncSmtpTransport<Tokio1Executor> {
    async fn send(&self, email: Message) -> Result<(), String> {
        AsyncTransport::send(self, email)
            .await
            .map(|_resp| ())
            .map_err(|e| e.to_string())
    }
}

/// [`EmailSender`] backed by an SMTP relay
pub struct SmtpEmailSender {
    transport: Box<dyn MailTransport>,
    from_email: String,
}

impl SmtpEmailSender {
    pub fn new_with_transport(transport: Box<dyn MailTransport>, from_email: &str) -> Self {
        Self {
            transport,
            from_email: from_email.to_string(),
        }
    }

    /// Authenticated relay over TLS
    ///
    /// # Errors
    /// Returns an error if the relay host cannot be used for TLS
    pub fn new(
        host: &str,
        port: u16,
        username: &str,
        password: &str,
        from_email: &str,
    ) -> Result<Self, String> {
        let creds = Credentials::new(username.to_string(), password.to_string());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(host)
            .map_err(|e| e.to_string())?
            .port(port)
            .credentials(creds)
            .build();

        Ok(Self::new_with_transport(Box::new(transport), from_email))
    }

    /// Plain, unauthenticated connection (Mailpit, MailHog, etc.)
    pub fn new_local(host: &str, port: u16, from_email: &str) -> Self {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .build();

        Self::new_with_transport(Box::new(transport), from_email)
    }

    /// Pick the authenticated or local transport from configuration
    ///
    /// # Errors
    /// Returns an error if the relay host cannot be used for TLS
    pub fn from_config(config: &SmtpConfig, from_email: &str) -> Result<Self, String> {
        match (&config.username, &config.password) {
            (Some(username), Some(password)) => {
                Self::new(&config.host, config.port, username, password, from_email)
            }
            _ => Ok(Self::new_local(&config.host, config.port, from_email)),
        }
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), String> {
        let email = Message::builder()
            .from(self.from_email.parse().map_err(|e| format!("{e:?}"))?)
            .to(to.parse().map_err(|e| format!("{e:?}"))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| e.to_string())?;

        self.transport.send(email).await
    }
}
