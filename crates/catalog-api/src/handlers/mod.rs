//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod auth;
pub mod health;
pub mod reactions;
pub mod reviews;
pub mod titles;
pub mod users;
