//! Session token encoding, decoding, and claims.

pub mod claims;
pub mod codec;
pub mod error;

pub use claims::{Claims, SessionClaims, SessionToken};
pub use codec::TokenCodec;
pub use error::TokenError;
