//! Authentication route handlers
//!
//! This module contains the account and token endpoints:
//! - Registration and password change
//! - Login (token issuance)
//! - Logout (token revocation)

pub mod change_password;
pub mod login;
pub mod logout;
pub mod register;

pub use change_password::change_password;
pub use login::login;
pub use logout::logout;
pub use register::register;
