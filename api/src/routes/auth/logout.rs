use actix_web::{web, HttpRequest, HttpResponse};

use crate::app::AppState;
use crate::dto::MessageResponse;
use crate::handlers::handle_domain_error;

use ak_core::errors::TokenError;
use ak_core::repositories::{CredentialStore, UserRepository};

/// Handler for POST /logout
///
/// Revokes the presented access token's pair and sweeps stale token records.
/// Not behind the authentication middleware: a token that no longer
/// authenticates can still be logged out. Under the cookie transport both
/// cookies are cleared.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Logout Successfully"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing or undecodable access token
/// - 500 Internal Server Error: Token revocation failure
pub async fn logout<S, U>(req: HttpRequest, state: web::Data<AppState<S, U>>) -> HttpResponse
where
    S: CredentialStore + 'static,
    U: UserRepository + 'static,
{
    let token = match state.transport.extract(&req) {
        Some(token) => token,
        None => return handle_domain_error(&TokenError::Unauthenticated.into()),
    };

    match state.lifecycle.logout(&token).await {
        Ok(outcome) => {
            log::info!(
                "Subject {} logged out (revoked: {}, swept: {})",
                outcome.subject_id,
                outcome.revoked,
                outcome.swept
            );

            let mut response = HttpResponse::Ok();
            state.transport.clear(&mut response);
            response.json(MessageResponse::new("Logout Successfully"))
        }
        Err(error) => handle_domain_error(&error),
    }
}
