//! # tally-api
//!
//! HTTP transport for Tally built on Axum.
//!
//! Maps requests and the `jwt` cookie onto the session authenticator and
//! renders every outcome in the `{code, status, data}` envelope.

pub mod app;
pub mod cookie;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use state::AppState;
