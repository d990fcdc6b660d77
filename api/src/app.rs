//! Application state and factory
//!
//! This module holds the shared application state and builds the Actix-web
//! application used by both the binary and the integration tests.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error,
};
use sg_core::repositories::RevocationStore;
use sg_core::services::TokenService;
use sg_shared::config::RevocationBackend;

use crate::middleware::{BearerAuth, CredentialVerifier};
use crate::routes::{
    data::{public, secret},
    health::{health_check, not_found},
    token::{login, refresh},
};

/// State shared by every worker
pub struct AppState<S: RevocationStore> {
    /// The token service; sole owner of the revocation store
    pub token_service: Arc<TokenService<S>>,
    /// Backend reported by the health endpoint
    pub revocation_backend: RevocationBackend,
}

impl<S: RevocationStore> AppState<S> {
    pub fn new(token_service: Arc<TokenService<S>>, revocation_backend: RevocationBackend) -> Self {
        Self {
            token_service,
            revocation_backend,
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<S>(
    app_state: web::Data<AppState<S>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    S: RevocationStore + 'static,
{
    let verifier: Arc<dyn CredentialVerifier> = app_state.token_service.clone();

    App::new()
        // Add application state
        .app_data(app_state)
        .app_data(web::Data::from(verifier))
        .wrap(Logger::default())
        // Health check endpoint
        .route("/health", web::get().to(health_check::<S>))
        .service(
            web::scope("/api")
                .route("/login", web::route().to(login::<S>))
                .route("/refresh", web::route().to(refresh::<S>))
                .service(
                    web::resource("/secret")
                        .wrap(BearerAuth::new())
                        .route(web::route().to(secret)),
                )
                .route("/public", web::route().to(public)),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}
