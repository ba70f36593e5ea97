//! Credential authentication middleware for protecting API endpoints.
//!
//! The middleware extracts the access token through the configured
//! [`TokenTransport`], resolves it with the [`Authenticator`] registered in
//! app data and injects an [`AuthContext`] into the request.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use ak_core::{
    errors::{DomainError, TokenError},
    repositories::CredentialStore,
    services::token::TokenLifecycle,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use crate::handlers::error::ApiError;
use crate::transport::TokenTransport;

/// Authentication context injected into requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    /// Subject id taken from the signed token payload
    pub subject_id: i64,
}

/// Trait for wrapping the token lifecycle to allow dynamic dispatch
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, token: &str) -> Result<i64, DomainError>;
}

#[async_trait]
impl<S: CredentialStore + 'static> Authenticator for TokenLifecycle<S> {
    async fn authenticate(&self, token: &str) -> Result<i64, DomainError> {
        TokenLifecycle::authenticate(self, token).await
    }
}

/// Credential authentication middleware factory
#[derive(Clone)]
pub struct CredentialAuth {
    transport: TokenTransport,
}

impl CredentialAuth {
    pub fn new(transport: TokenTransport) -> Self {
        Self { transport }
    }
}

impl<S, B> Transform<S, ServiceRequest> for CredentialAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = CredentialAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CredentialAuthMiddleware {
            service: Rc::new(service),
            transport: self.transport.clone(),
        }))
    }
}

/// Credential authentication middleware service
pub struct CredentialAuthMiddleware<S> {
    service: Rc<S>,
    transport: TokenTransport,
}

impl<S, B> Service<ServiceRequest> for CredentialAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let token = self.transport.extract(req.request());
        let authenticator = req
            .app_data::<web::Data<Arc<dyn Authenticator>>>()
            .cloned();

        Box::pin(async move {
            let token = match token {
                Some(token) => token,
                None => return Err(ApiError::from(TokenError::Unauthenticated).into()),
            };

            let authenticator = match authenticator {
                Some(authenticator) => authenticator,
                None => {
                    log::error!("No authenticator registered in app data");
                    return Err(ApiError::from(DomainError::Internal {
                        message: "Authentication not configured".to_string(),
                    })
                    .into());
                }
            };

            let subject_id = authenticator
                .authenticate(&token)
                .await
                .map_err(ApiError::from)?;

            req.extensions_mut().insert(AuthContext { subject_id });

            service.call(req).await
        })
    }
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .copied()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}
