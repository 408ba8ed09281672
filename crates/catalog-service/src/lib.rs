//! # catalog-service
//!
//! Application layer containing business logic, services, DTOs and the
//! outbound email collaborator.

pub mod dto;
pub mod email;
pub mod services;

#[cfg(test)]
mod test_support;

pub use email::{EmailSender, LogEmailSender, Mailer, RecordingEmailSender, SmtpEmailSender};
pub use services::{
    AuthService, ReactionService, ReviewService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, TitleService, UserService,
};
