//! Transactional messages: account activation and password reset

use std::fmt;
use std::sync::Arc;

use catalog_common::{AppError, EmailConfig};
use tracing::{error, info, instrument};

use super::sender::{EmailSender, LogEmailSender};
use super::smtp::SmtpEmailSender;

pub const ACTIVATION_SUBJECT: &str = "Activate Your Account";
pub const PASSWORD_RESET_SUBJECT: &str = "Reset Your Password";

/// Composes catalog emails and hands them to an [`EmailSender`]
#[derive(Clone)]
pub struct Mailer {
    sender: Arc<dyn EmailSender>,
    frontend_url: String,
}

impl fmt::Debug for Mailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mailer")
            .field("sender", &"<dyn EmailSender>")
            .field("frontend_url", &self.frontend_url)
            .finish()
    }
}

impl Mailer {
    pub fn new(sender: Arc<dyn EmailSender>, frontend_url: impl Into<String>) -> Self {
        Self {
            sender,
            frontend_url: frontend_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// SMTP when a relay is configured, otherwise mail is only logged
    ///
    /// # Errors
    /// Returns `AppError::Config` if the relay cannot be set up
    pub fn from_config(config: &EmailConfig) -> Result<Self, AppError> {
        let sender: Arc<dyn EmailSender> = match &config.smtp {
            Some(smtp) => Arc::new(
                SmtpEmailSender::from_config(smtp, &config.sender_email)
                    .map_err(AppError::Config)?,
            ),
            None => Arc::new(LogEmailSender),
        };
        Ok(Self::new(sender, config.frontend_url.clone()))
    }

    pub fn activation_link(&self, token: &str) -> String {
        format!("{}/login?activation_token={token}", self.frontend_url)
    }

    pub fn password_reset_link(&self, token: &str) -> String {
        format!("{}/reset-password?token={token}", self.frontend_url)
    }

    /// Send the account activation link
    ///
    /// # Errors
    /// Returns `AppError::EmailDelivery` if the sender fails
    #[instrument(skip(self, token))]
    pub async fn send_activation(
        &self,
        to: &str,
        username: &str,
        token: &str,
    ) -> Result<(), AppError> {
        let body = format!(
            "Hello, {username}!\n\n\
             Thank you for signing up. Please click the link below to activate your account:\n\n\
             {}\n\n\
             If you did not sign up for this account, please ignore this email.\n",
            self.activation_link(token)
        );
        self.deliver(to, ACTIVATION_SUBJECT, &body).await
    }

    /// Send the password reset link
    ///
    /// # Errors
    /// Returns `AppError::EmailDelivery` if the sender fails
    #[instrument(skip(self, token))]
    pub async fn send_password_reset(
        &self,
        to: &str,
        username: &str,
        token: &str,
    ) -> Result<(), AppError> {
        let body = format!(
            "Hello, {username}!\n\n\
             We received a request to reset your password. Click the link below to choose a new one:\n\n\
             {}\n\n\
             If you did not ask for this, please ignore this email.\n",
            self.password_reset_link(token)
        );
        self.deliver(to, PASSWORD_RESET_SUBJECT, &body).await
    }

    async fn deliver(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError> {
        match self.sender.send_email(to, subject, body).await {
            Ok(()) => {
                info!(subject = %subject, "Email sent");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, subject = %subject, "Email delivery failed");
                Err(AppError::EmailDelivery(e))
            }
        }
    }
}
