use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::{MessageResponse, RegisterRequest};
use crate::handlers::{handle_domain_error, validation_error};

use ak_core::repositories::{CredentialStore, UserRepository};

/// Handler for POST /register
///
/// # Request Body
///
/// ```json
/// {
///     "username": "anshi",
///     "email": "anshi@example.com",
///     "password": "secret"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Invalid fields or email already registered
pub async fn register<S, U>(
    state: web::Data<AppState<S, U>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    S: CredentialStore + 'static,
    U: UserRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error(&errors);
    }

    match state
        .accounts
        .register(&request.username, &request.email, &request.password)
        .await
    {
        Ok(user) => {
            log::info!("Registered user {}", user.id);
            HttpResponse::Ok().json(MessageResponse::new("User created successfully"))
        }
        Err(error) => handle_domain_error(&error),
    }
}
