use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use ak_core::errors::{DomainError, TokenError};
use ak_shared::{error_codes, ErrorResponse, IntoErrorResponse};
use std::fmt;
use validator::ValidationErrors;

/// HTTP status for a domain error
///
/// Missing or expired credentials are 401; credentials that were presented
/// but cannot be trusted are 403.
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Token(TokenError::Unauthenticated | TokenError::Expired) => {
            StatusCode::UNAUTHORIZED
        }
        DomainError::Token(
            TokenError::Malformed | TokenError::InvalidSignature | TokenError::Revoked,
        ) => StatusCode::FORBIDDEN,
        DomainError::Auth(_) | DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::Credential { .. } | DomainError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let status = status_for(error);

    if status.is_server_error() {
        log::error!("Domain Error: {}", error);
    } else {
        log::warn!("Request rejected: {}", error);
    }

    HttpResponse::build(status).json(error.to_error_response())
}

/// 400 response listing the failing fields
pub fn validation_error(errors: &ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Request validation failed");

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        response = response.add_detail(field, messages);
    }

    HttpResponse::BadRequest().json(response)
}

/// Domain error usable as an actix error, for middleware and extractors
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        status_for(&self.0)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.0.to_error_response())
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        ApiError(error)
    }
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        ApiError(error.into())
    }
}
