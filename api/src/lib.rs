//! HTTP surface of the Authkeeper token service
//!
//! Library exports for the binary and the integration tests.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod transport;

pub use app::{create_app, AppState};
pub use transport::TokenTransport;
