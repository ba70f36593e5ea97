//! User repository trait: the user directory the token lifecycle consults.
//!
//! The lifecycle itself only needs subject identifiers; account operations
//! (registration, credential checks, password changes) go through this trait.

use async_trait::async_trait;

use crate::domain::entities::user::{NewUser, User};
use crate::errors::DomainError;

/// Repository trait for User persistence operations
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use ak_core::repositories::UserRepository;
/// use ak_core::domain::entities::user::{NewUser, User};
/// use ak_core::errors::DomainError;
///
/// struct StaticDirectory;
///
/// #[async_trait]
/// impl UserRepository for StaticDirectory {
///     async fn find_by_email(&self, _email: &str) -> Result<Option<User>, DomainError> {
///         Ok(None)
///     }
///     async fn find_by_id(&self, _id: i64) -> Result<Option<User>, DomainError> {
///         Ok(None)
///     }
///     async fn create(&self, user: NewUser) -> Result<User, DomainError> {
///         Ok(user.into_user(1))
///     }
///     async fn update_password(&self, _id: i64, _hash: &str) -> Result<bool, DomainError> {
///         Ok(false)
///     }
///     async fn list(&self) -> Result<Vec<User>, DomainError> {
///         Ok(Vec::new())
///     }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by login email
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by identifier
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;

    /// Insert a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The stored user with its assigned id
    /// * `Err(DomainError::Auth(AuthError::UserAlreadyExists))` - Email taken
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Replace a user's password hash
    ///
    /// # Returns
    /// * `Ok(true)` - Password updated
    /// * `Ok(false)` - No user with that id
    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool, DomainError>;

    /// All users ordered by id
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Check whether an email is already registered
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}
