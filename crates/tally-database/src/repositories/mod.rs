//! Credential store implementations.

pub mod memory;
pub mod user;

pub use memory::MemoryCredentialStore;
pub use user::UserRepository;
