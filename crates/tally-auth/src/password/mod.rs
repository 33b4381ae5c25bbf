//! Password hashing and the login password policy.

pub mod hasher;
pub mod validator;

pub use hasher::PasswordHasher;
pub use validator::PasswordValidator;
