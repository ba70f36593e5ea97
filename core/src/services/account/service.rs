//! Account service implementation

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::user::{NewUser, User};
use crate::errors::{AuthError, DomainResult};
use crate::repositories::UserRepository;

use super::password::{BcryptHasher, PasswordHasher};

/// Registration, login checks and password changes over the user directory
///
/// Changing a password leaves outstanding tokens untouched.
pub struct AccountService<U: UserRepository, H: PasswordHasher = BcryptHasher> {
    users: Arc<U>,
    hasher: H,
}

impl<U: UserRepository, H: PasswordHasher> AccountService<U, H> {
    pub fn new(users: Arc<U>, hasher: H) -> Self {
        Self { users, hasher }
    }

    pub fn users(&self) -> &Arc<U> {
        &self.users
    }

    /// Registers a new user
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The stored user
    /// * `Err(AuthError::UserAlreadyExists)` - Email taken; nothing is written
    pub async fn register(&self, username: &str, email: &str, password: &str) -> DomainResult<User> {
        if self.users.exists_by_email(email).await? {
            warn!("Registration rejected, email already registered");
            return Err(AuthError::UserAlreadyExists.into());
        }

        let password_hash = self.hasher.hash(password)?;
        let user = self
            .users
            .create(NewUser::new(username, email, password_hash))
            .await?;

        info!("Registered user {}", user.id);
        Ok(user)
    }

    /// Checks an email/password pair and returns the user id
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn check_credentials(&self, email: &str, password: &str) -> DomainResult<i64> {
        let user = match self.users.find_by_email(email).await? {
            Some(user) => user,
            None => {
                warn!("Login attempt for unknown email");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !self.hasher.verify(password, &user.password_hash)? {
            warn!("Wrong password for user {}", user.id);
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(user.id)
    }

    /// Replaces a user's password after checking the old one
    pub async fn change_password(
        &self,
        email: &str,
        old_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !self.hasher.verify(old_password, &user.password_hash)? {
            warn!("Password change for user {} rejected", user.id);
            return Err(AuthError::InvalidOldPassword.into());
        }

        let password_hash = self.hasher.hash(new_password)?;
        if !self.users.update_password(user.id, &password_hash).await? {
            return Err(AuthError::UserNotFound.into());
        }

        info!("Password changed for user {}", user.id);
        Ok(())
    }

    /// All registered users
    pub async fn list_users(&self) -> DomainResult<Vec<User>> {
        self.users.list().await
    }
}
