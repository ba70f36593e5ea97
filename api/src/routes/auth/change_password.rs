use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::{ChangePasswordRequest, MessageResponse};
use crate::handlers::{handle_domain_error, validation_error};

use ak_core::repositories::{CredentialStore, UserRepository};

/// Handler for POST /change-password
///
/// Outstanding tokens of the user stay valid.
pub async fn change_password<S, U>(
    state: web::Data<AppState<S, U>>,
    request: web::Json<ChangePasswordRequest>,
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
        .change_password(&request.email, &request.old_password, &request.new_password)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Password changed successfully")),
        Err(error) => handle_domain_error(&error),
    }
}
