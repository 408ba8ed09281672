//! Outbound email
//!
//! [`EmailSender`] is the transport seam. [`Mailer`] composes the
//! activation and password reset messages on top of whichever sender the
//! application was started with.

pub mod mailer;
pub mod sender;
pub mod smtp;

pub use mailer::Mailer;
pub use sender::{EmailSender, LogEmailSender, RecordingEmailSender, SentEmail};
pub use smtp::{MailTransport, SmtpEmailSender};
