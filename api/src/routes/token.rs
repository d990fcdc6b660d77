//! Credential issue and refresh endpoints

use actix_web::{web, HttpRequest, HttpResponse};
use log::info;
use sg_core::repositories::RevocationStore;
use sg_shared::types::ApiResponse;

use crate::app::AppState;
use crate::dto::{LoginQuery, TokenContent};
use crate::handlers::ApiError;
use crate::middleware::extract_bearer_token;

const TOKEN_RECEIVED: &str = "Token Received";

/// Handler for `/api/login?login=<subject>`
///
/// The caller is trusted to have authenticated `login` already; this only
/// mints the credential.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Token Received",
///     "content": { "token": "eyJ...", "expires": 5, "refresh": 10 }
/// }
/// ```
///
/// ## Errors
/// - 400 `VALIDATION_ERROR`: `login` missing or empty
pub async fn login<S>(
    state: web::Data<AppState<S>>,
    query: web::Query<LoginQuery>,
) -> Result<HttpResponse, ApiError>
where
    S: RevocationStore + 'static,
{
    let subject = query.login.as_deref().unwrap_or_default();
    let issued = state.token_service.issue(subject)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TOKEN_RECEIVED,
        TokenContent::from(issued),
    )))
}

/// Handler for `/api/refresh`
///
/// Exchanges the bearer credential, usually already expired, for a new one.
/// Each credential can be exchanged once.
///
/// ## Errors
/// - 400 `MISSING_CREDENTIAL`: no bearer token
/// - 400 `MALFORMED_CREDENTIAL`: bad signature or payload
/// - 400 `ALREADY_REFRESHED`: the credential was exchanged before
/// - 400 `REFRESH_WINDOW_EXPIRED`: past expiry plus grace
/// - 500 `INTERNAL_ERROR`: revocation store unavailable
pub async fn refresh<S>(
    state: web::Data<AppState<S>>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError>
where
    S: RevocationStore + 'static,
{
    let issued = state
        .token_service
        .refresh(extract_bearer_token(req.headers()))
        .await?;

    info!("Refreshed credential for {}", issued.credential.subject);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TOKEN_RECEIVED,
        TokenContent::from(issued),
    )))
}
