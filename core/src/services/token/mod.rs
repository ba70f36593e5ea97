//! Token service module for credential management
//!
//! This module handles all token-related operations including:
//! - Signing and verifying access and refresh credentials
//! - Recording issued pairs in the credential store
//! - Revocation on logout and the retention sweep that runs with it

mod codec;
mod config;
mod lifecycle;


pub use codec::CredentialCodec;
pub use config::TokenServiceConfig;
pub use lifecycle::{LogoutOutcome, TokenLifecycle};
