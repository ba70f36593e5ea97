pub mod credential;
pub mod user;

pub use credential::{CredentialStore, CredentialTransaction};
pub use user::UserRepository;

#[cfg(test)]
pub use credential::MockCredentialStore;
#[cfg(test)]
pub use user::MockUserRepository;
