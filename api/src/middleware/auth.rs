//! Bearer credential middleware for protecting API endpoints.
//!
//! Extracts the token from the `Authorization: Bearer <token>` header,
//! verifies it through the [`CredentialVerifier`] registered in app data and
//! injects an [`AuthContext`] into the request. Any verification failure
//! short-circuits with a 401 envelope.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderMap, AUTHORIZATION},
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use sg_core::{
    errors::{DomainError, TokenError},
    repositories::RevocationStore,
    services::TokenService,
};
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use crate::handlers::ApiError;

/// Authenticated caller injected into requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// Subject asserted by the verified credential
    pub subject: String,
}

/// Object-safe view of the token service used by the middleware
pub trait CredentialVerifier: Send + Sync {
    /// Verify a bearer token and return its subject
    fn verify_bearer(&self, token: Option<&str>) -> Result<String, DomainError>;
}

impl<S: RevocationStore> CredentialVerifier for TokenService<S> {
    fn verify_bearer(&self, token: Option<&str>) -> Result<String, DomainError> {
        self.verify(token)
    }
}

/// Bearer authentication middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct BearerAuth;

impl BearerAuth {
    /// Creates a new bearer authentication middleware
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Bearer authentication middleware service
pub struct BearerAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let verified = match req.app_data::<web::Data<dyn CredentialVerifier>>() {
                Some(verifier) => verifier
                    .verify_bearer(extract_bearer_token(req.headers()))
                    .map_err(|e| ApiError::unauthorized(&e)),
                None => {
                    log::error!("Bearer middleware mounted without a credential verifier");
                    Err(ApiError::from_domain(&DomainError::Internal {
                        message: "credential verifier not configured".to_string(),
                    }))
                }
            };

            let subject = match verified {
                Ok(subject) => subject,
                Err(error) => {
                    log::debug!("Rejected request to {}: {}", req.path(), error);
                    let response = error.error_response();
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            req.extensions_mut().insert(AuthContext { subject });

            service.call(req).await.map(|res| res.map_into_left_body())
        })
    }
}

/// Extracts the bearer token from the Authorization header
///
/// Returns `None` when the header is absent, not valid UTF-8, or not of the
/// `Bearer <token>` form.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| {
                ApiError::unauthorized(&DomainError::Token(TokenError::MissingCredential)).into()
            });

        ready(result)
    }
}
