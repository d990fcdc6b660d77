//! Public and protected data endpoints

use actix_web::HttpResponse;
use log::debug;
use sg_shared::types::ApiResponse;

use crate::middleware::AuthContext;

/// Handler for `/api/secret`, mounted behind `BearerAuth`
pub async fn secret(auth: AuthContext) -> HttpResponse {
    debug!("Serving secret data to {}", auth.subject);
    HttpResponse::Ok().json(ApiResponse::message_only("Secret Data Received"))
}

/// Handler for `/api/public`
pub async fn public() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::message_only("Public Data Received"))
}
