//! # Error Handling
//!
//! Error types for sigil-core. Every failure is surfaced as a distinct,
//! inspectable variant — nothing is swallowed or collapsed into a generic
//! error:
//!
//! - `BadPrefix` / `BadLength` / `Base64` — key text that doesn't decode
//! - `BadFormat` — a signed JSON document that can't be taken apart
//! - `SignatureMismatch` — the cryptographic check itself failed
//! - `InvalidKey` — key bytes the primitive refuses to use

use thiserror::Error;

/// Result type alias for sigil-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for sigil-core
#[derive(Error, Debug)]
pub enum Error {
    /// Key text does not start with the expected prefix
    #[error("bad prefix: key text must start with {expected:?}")]
    BadPrefix { expected: &'static str },

    /// Decoded byte count differs from the fixed key or signature size
    #[error("length mismatch: got {got} bytes, wanted {expected}")]
    BadLength { got: usize, expected: usize },

    /// Key or signature text is not valid standard base64
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// A signed JSON document (or a document about to be signed) is
    /// structurally malformed
    #[error("bad format: {0}")]
    BadFormat(String),

    /// Cryptographic verification failed.
    ///
    /// For JSON verification this carries the candidate payload so callers
    /// can inspect what failed — the payload must not be trusted.
    #[error("signature mismatch")]
    SignatureMismatch { payload: Vec<u8> },

    /// Key bytes do not form a usable key for the signature primitive
    #[error("invalid key: {0}")]
    InvalidKey(String),
}
