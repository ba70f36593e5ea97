use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::UserResponse;
use crate::handlers::handle_domain_error;
use crate::middleware::auth::AuthContext;

use ak_core::repositories::{CredentialStore, UserRepository};

/// Handler for GET /getusers
///
/// Requires authentication; the auth middleware has already resolved the caller.
pub async fn list_users<S, U>(state: web::Data<AppState<S, U>>, auth: AuthContext) -> HttpResponse
where
    S: CredentialStore + 'static,
    U: UserRepository + 'static,
{
    log::debug!("Listing users for subject {}", auth.subject_id);

    match state.accounts.list_users().await {
        Ok(users) => {
            let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
            HttpResponse::Ok().json(users)
        }
        Err(error) => handle_domain_error(&error),
    }
}
