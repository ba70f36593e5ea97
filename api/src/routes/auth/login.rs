use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::LoginRequest;
use crate::handlers::{handle_domain_error, validation_error};

use ak_core::repositories::{CredentialStore, UserRepository};

/// Handler for POST /login
///
/// Checks the credentials and issues a token pair. The pair is always in the
/// response body; under the cookie transport it is also set as cookies.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ...",
///     "token_type": "Bearer",
///     "expires_in": 1800,
///     "refresh_expires_in": 2592000
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Invalid credentials
/// - 500 Internal Server Error: Token record could not be stored
pub async fn login<S, U>(
    state: web::Data<AppState<S, U>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    S: CredentialStore + 'static,
    U: UserRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error(&errors);
    }

    let subject_id = match state
        .accounts
        .check_credentials(&request.email, &request.password)
        .await
    {
        Ok(subject_id) => subject_id,
        Err(error) => return handle_domain_error(&error),
    };

    match state.lifecycle.login(subject_id).await {
        Ok(pair) => state.transport.deliver(&pair),
        Err(error) => handle_domain_error(&error),
    }
}
