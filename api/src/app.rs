//! Application state and factory
//!
//! This module holds the shared state and provides the factory for creating
//! the Actix-web application.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::{error::InternalError, middleware::Logger, web, App, HttpResponse};
use ak_core::repositories::{CredentialStore, UserRepository};
use ak_core::services::{AccountService, TokenLifecycle};
use ak_shared::{error_codes, ErrorResponse};

use crate::middleware::auth::{Authenticator, CredentialAuth};
use crate::routes::auth::{change_password, login, logout, register};
use crate::routes::health::{health_check, not_found};
use crate::routes::users::list_users;
use crate::transport::TokenTransport;

/// Application state that holds shared services
pub struct AppState<S: CredentialStore, U: UserRepository> {
    pub lifecycle: Arc<TokenLifecycle<S>>,
    pub accounts: Arc<AccountService<U>>,
    pub transport: TokenTransport,
}

impl<S: CredentialStore, U: UserRepository> AppState<S, U> {
    pub fn new(
        lifecycle: TokenLifecycle<S>,
        accounts: AccountService<U>,
        transport: TokenTransport,
    ) -> Self {
        Self {
            lifecycle: Arc::new(lifecycle),
            accounts: Arc::new(accounts),
            transport,
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<S, U>(
    app_state: web::Data<AppState<S, U>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    S: CredentialStore + 'static,
    U: UserRepository + 'static,
{
    let authenticator: Arc<dyn Authenticator> = app_state.lifecycle.clone();
    let auth = CredentialAuth::new(app_state.transport.clone());

    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest()
            .json(ErrorResponse::new(error_codes::BAD_REQUEST, err.to_string()));
        InternalError::from_response(err, response).into()
    });

    App::new()
        .app_data(app_state)
        .app_data(web::Data::new(authenticator))
        .app_data(json_config)
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check))
        .route("/register", web::post().to(register::<S, U>))
        .route("/login", web::post().to(login::<S, U>))
        .route("/getusers", web::get().to(list_users::<S, U>).wrap(auth))
        .route("/change-password", web::post().to(change_password::<S, U>))
        .route("/logout", web::post().to(logout::<S, U>))
        .default_service(web::route().to(not_found))
}
