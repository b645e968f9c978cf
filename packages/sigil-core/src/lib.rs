//! # Sigil Core
//!
//! NaCl-style message signing: armored key encoding, Ed25519 combined and
//! detached signatures, and a byte-exact convention for embedding a
//! detached signature inside a serialized JSON document.
//!
//! ## Module Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        SIGIL CORE MODULES                       │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  ┌─────────────┐   ┌──────────────┐   ┌──────────────────────┐  │
//! │  │    keys     │   │   signing    │   │        json          │  │
//! │  │             │   │              │   │                      │  │
//! │  │ - KeyPair   │──►│ - sign/open  │──►│ - sign_json          │  │
//! │  │ - text codec│   │ - detached   │   │ - verify_json        │  │
//! │  │ - zeroize   │   │   sign/verify│   │   (byte-exact)       │  │
//! │  └─────────────┘   └──────────────┘   └──────────────────────┘  │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use sigil_core::{open, sign, sign_json, verify_json, KeyPair};
//!
//! let pair = KeyPair::generate();
//!
//! // Combined form: signature ‖ message
//! let signed = sign(&pair.private, b"hello").unwrap();
//! assert_eq!(open(&pair.public, &signed).unwrap(), b"hello".to_vec());
//!
//! // JSON form: detached signature embedded as a trailing "naclSig" key
//! let signed = sign_json(&pair.private, br#"{"msg":"hello"}"#).unwrap();
//! let payload = verify_json(&pair.public, &signed).unwrap();
//! assert_eq!(payload, br#"{"msg":"hello"}"#.to_vec());
//! ```
//!
//! All operations are pure, synchronous functions over in-memory byte
//! buffers; input buffers are never mutated.

pub mod error;
mod json;
mod keys;
mod signing;

pub use error::{Error, Result};
pub use json::{sign_json, verify_json, JSON_OVERHEAD, SIG_MARKER};
pub use keys::{
    KeyPair, PrivateKey, PublicKey, PRIVATE_KEY_PREFIX, PRIVATE_KEY_SIZE, PUBLIC_KEY_PREFIX,
    PUBLIC_KEY_SIZE,
};
pub use signing::{open, sign, sign_detached, verify_detached, Signature, SIGNATURE_SIZE};
