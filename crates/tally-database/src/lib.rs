//! # tally-database
//!
//! Credential storage backends for Tally: a PostgreSQL pool with the bundled
//! migrations and a `users` repository, plus an in-memory store for
//! development and tests. Both implement
//! [`tally_core::traits::CredentialStore`] and
//! [`tally_core::traits::AccountStore`].

pub mod connection;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{MemoryCredentialStore, UserRepository};
