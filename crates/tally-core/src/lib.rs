//! # tally-core
//!
//! Core crate for Tally. Contains the capability traits the authentication
//! core calls into, configuration schemas, shared value types, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other Tally crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
