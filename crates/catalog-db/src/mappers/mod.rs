//! Model to entity mappers
//!
//! Rows whose enum columns hold unknown text fail with a `DomainError`
//! rather than being silently coerced.

mod reaction;
mod review;
mod title;
mod user;
