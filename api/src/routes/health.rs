//! Health check and fallback handlers

use actix_web::{web, HttpResponse, ResponseError};
use log::error;
use sg_core::repositories::RevocationStore;
use sg_shared::types::HealthResponse;

use crate::app::AppState;
use crate::handlers::ApiError;

/// Health check endpoint handler
///
/// Reports `degraded` with 503 when the revocation store cannot be reached.
pub async fn health_check<S>(state: web::Data<AppState<S>>) -> HttpResponse
where
    S: RevocationStore + 'static,
{
    let (status, tracked) = match state.token_service.tracked_revocations().await {
        Ok(count) => ("healthy", count),
        Err(e) => {
            error!("Health check could not reach revocation store: {}", e);
            ("degraded", 0)
        }
    };

    let body = HealthResponse {
        status: status.to_string(),
        service: "sessiongate".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        revocation_backend: state.revocation_backend.to_string(),
        tracked_revocations: tracked,
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    if status == "healthy" {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

/// Default 404 handler
pub async fn not_found() -> HttpResponse {
    ApiError::not_found().error_response()
}
