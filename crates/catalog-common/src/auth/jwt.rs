//! JWT utilities for authentication
//!
//! Provides token encoding, decoding, and validation using the `jsonwebtoken` crate.
//! Every token carries a `type` claim naming its purpose, so a token minted
//! for one flow is rejected by the others.

use catalog_core::Role;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// What a token may be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    /// Bearer session token
    Login,
    /// Single-use account activation link
    #[serde(rename = "user_activation")]
    AccountActivation,
    /// Password reset link
    PasswordReset,
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub id: i64,
    /// Role, present on session tokens only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(rename = "type")]
    pub purpose: TokenPurpose,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Check if the token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// JWT service for encoding and decoding tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_token_expiry: i64,
    activation_token_expiry: i64,
    reset_token_expiry: i64,
}

impl JwtService {
    /// Create a new JWT service with the given secret and expiry times (seconds)
    #[must_use]
    pub fn new(
        secret: &str,
        session_token_expiry: i64,
        activation_token_expiry: i64,
        reset_token_expiry: i64,
    ) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            session_token_expiry,
            activation_token_expiry,
            reset_token_expiry,
        }
    }

    /// Session token lifetime in seconds
    #[must_use]
    pub fn session_token_expiry(&self) -> i64 {
        self.session_token_expiry
    }

    /// Issue a login session token carrying the user's role
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_session_token(&self, user_id: i64, role: Role) -> Result<String, AppError> {
        self.issue_token(
            user_id,
            TokenPurpose::Login,
            Some(role),
            self.session_token_expiry,
        )
    }

    /// Issue an account activation token
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_activation_token(&self, user_id: i64) -> Result<String, AppError> {
        self.issue_token(
            user_id,
            TokenPurpose::AccountActivation,
            None,
            self.activation_token_expiry,
        )
    }

    /// Issue a password reset token
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_password_reset_token(&self, user_id: i64) -> Result<String, AppError> {
        self.issue_token(
            user_id,
            TokenPurpose::PasswordReset,
            None,
            self.reset_token_expiry,
        )
    }

    /// Encode a JWT token
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_token(
        &self,
        user_id: i64,
        purpose: TokenPurpose,
        role: Option<Role>,
        ttl_seconds: i64,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            id: user_id,
            role,
            purpose,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode JWT")))
    }

    /// Decode and validate a JWT token
    ///
    /// # Errors
    /// Returns `TokenExpired` past `exp`, `InvalidToken` for anything else
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            }
        })?;

        Ok(token_data.claims)
    }

    /// Decode a token and require a specific purpose
    ///
    /// # Errors
    /// Returns `WrongTokenPurpose` when the token was minted for another flow
    pub fn validate_token(&self, token: &str, expected: TokenPurpose) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;

        if claims.purpose != expected {
            return Err(AppError::WrongTokenPurpose);
        }

        Ok(claims)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("session_token_expiry", &self.session_token_expiry)
            .field("activation_token_expiry", &self.activation_token_expiry)
            .field("reset_token_expiry", &self.reset_token_expiry)
            .finish_non_exhaustive()
    }
}
