pub mod error;

pub use error::{handle_domain_error, status_for, validation_error, ApiError};
