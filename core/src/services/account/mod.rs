//! Account service module: registration, credential checks and password changes

mod password;
mod service;


pub use password::{BcryptHasher, PasswordHasher};
pub use service::AccountService;
