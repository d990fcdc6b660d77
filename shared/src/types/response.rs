//! API response types and wrappers

use serde::{Deserialize, Serialize};

/// Envelope returned by every endpoint
///
/// Successful responses carry `content`; failures carry `content: null` plus a
/// stable machine-readable `error` code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Human-readable message
    pub message: String,

    /// Response payload
    pub content: Option<T>,

    /// Machine-readable error code (present on failure)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response with a payload
    pub fn success(message: impl Into<String>, content: T) -> Self {
        Self {
            message: message.into(),
            content: Some(content),
            error: None,
        }
    }

    /// Check if the response is an error
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

impl ApiResponse<()> {
    /// Create a successful response without a payload
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            content: None,
            error: None,
        }
    }

    /// Create an error response
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            content: None,
            error: Some(code.into()),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall health status
    pub status: String,

    /// Service name
    pub service: String,

    /// Server version
    pub version: String,

    /// Active revocation backend
    pub revocation_backend: String,

    /// Revocation records currently retained
    pub tracked_revocations: usize,

    /// Server timestamp (RFC 3339)
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_only_serializes_null_content() {
        let body = serde_json::to_value(ApiResponse::message_only("Public Data Received")).unwrap();
        assert_eq!(body["message"], "Public Data Received");
        assert!(body["content"].is_null());
        assert!(body.get("error").is_none());
    }

    #[test]
    fn test_error_carries_code() {
        let response = ApiResponse::error("ALREADY_REFRESHED", "Token has already been refreshed");
        assert!(response.is_error());

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["error"], "ALREADY_REFRESHED");
        assert!(body["content"].is_null());
    }
}
