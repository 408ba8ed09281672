//! Authentication utilities

mod jwt;
mod password;

pub use jwt::{Claims, JwtService, TokenPurpose};
pub use password::{hash_password, verify_password, PasswordService};
