//! Mapping of domain failures onto HTTP responses
//!
//! Every failure is rendered as the standard envelope with `content: null`
//! and the failure's machine code in `error`.

use std::fmt;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use sg_core::errors::{DomainError, TokenError};
use sg_shared::types::ApiResponse;

/// Error returned by handlers and the bearer middleware
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    /// Map a domain failure for an unguarded endpoint
    pub fn from_domain(error: &DomainError) -> Self {
        match error {
            DomainError::Token(kind) => Self::new(token_status(*kind), kind.code(), kind.to_string()),
            DomainError::Validation { message } => {
                Self::new(StatusCode::BAD_REQUEST, error.code(), message.clone())
            }
            DomainError::Configuration { .. } | DomainError::Internal { .. } => {
                log::error!("Domain Error: {}", error);
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error.code(),
                    "Internal server error".to_string(),
                )
            }
        }
    }

    /// Map a domain failure raised while guarding a protected endpoint
    ///
    /// Every credential failure becomes 401.
    pub fn unauthorized(error: &DomainError) -> Self {
        match error.token_error() {
            Some(kind) => Self::new(StatusCode::UNAUTHORIZED, kind.code(), kind.to_string()),
            None => Self::from_domain(error),
        }
    }

    /// 404 for unrouted paths
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", "not found".to_string())
    }

    /// HTTP status this error renders with
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable code
    pub fn code(&self) -> &'static str {
        self.code
    }

    fn new(status: StatusCode, code: &'static str, message: String) -> Self {
        Self {
            status,
            code,
            message,
        }
    }
}

fn token_status(kind: TokenError) -> StatusCode {
    match kind {
        TokenError::Expired => StatusCode::UNAUTHORIZED,
        TokenError::MissingCredential
        | TokenError::MalformedCredential
        | TokenError::AlreadyRefreshed
        | TokenError::RefreshWindowExpired => StatusCode::BAD_REQUEST,
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(ApiResponse::<()>::error(self.code, self.message.clone()))
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self::from_domain(&error)
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    ApiError::from_domain(&error).error_response()
}
