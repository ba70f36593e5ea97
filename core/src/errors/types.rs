//! Error types for token verification and account operations

use ak_shared::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

use super::DomainError;

/// Account and credential-check errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Email already registered")]
    UserAlreadyExists,

    #[error("Invalid old password")]
    InvalidOldPassword,
}

/// Token verification errors
///
/// Every variant is terminal for the request that produced it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// The token could not be parsed
    #[error("Malformed token")]
    Malformed,

    /// The token was signed with another secret or was tampered with
    #[error("Token signature verification failed")]
    InvalidSignature,

    /// Signature is valid but the embedded expiry has passed
    #[error("Token expired")]
    Expired,

    /// No active record backs the token
    #[error("Token revoked")]
    Revoked,

    /// No usable token was presented
    #[error("Authentication required")]
    Unauthenticated,
}

impl TokenError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::Malformed => error_codes::TOKEN_MALFORMED,
            TokenError::InvalidSignature => error_codes::TOKEN_INVALID_SIGNATURE,
            TokenError::Expired => error_codes::TOKEN_EXPIRED,
            TokenError::Revoked => error_codes::TOKEN_REVOKED,
            TokenError::Unauthenticated => error_codes::UNAUTHENTICATED,
        }
    }
}

impl AuthError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => error_codes::INVALID_CREDENTIALS,
            AuthError::UserNotFound => error_codes::USER_NOT_FOUND,
            AuthError::UserAlreadyExists => error_codes::USER_ALREADY_EXISTS,
            AuthError::InvalidOldPassword => error_codes::INVALID_OLD_PASSWORD,
        }
    }
}

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            DomainError::Token(err) => ErrorResponse::new(err.code(), err.to_string()),
            DomainError::Auth(err) => ErrorResponse::new(err.code(), err.to_string()),
            DomainError::Validation { message } => {
                ErrorResponse::new(error_codes::VALIDATION_ERROR, message.clone())
            }
            // Persistence and internal details stay in the logs
            DomainError::Credential { .. } => ErrorResponse::new(
                error_codes::CREDENTIAL_ERROR,
                "Credential store unavailable",
            ),
            DomainError::Internal { .. } => {
                ErrorResponse::new(error_codes::INTERNAL_ERROR, "An internal error occurred")
            }
        }
    }
}
