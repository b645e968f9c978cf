//! # Key Management
//!
//! Key types and their armored text encoding.
//!
//! ## Text Encoding
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Public key (32 bytes)                                          │
//! │                                                                 │
//! │  nacl5F2bYLs…Qk8=                                               │
//! │  └──┘└──────────┘                                               │
//! │  prefix  base64 (standard alphabet, padded, 44 chars)           │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  Private key (64 bytes = 32-byte seed ‖ 32-byte public key)     │
//! │                                                                 │
//! │  NACL-SECRET-KEY-mW3xKop…9dA==                                  │
//! │  └──────────────┘└───────────┘                                  │
//! │  prefix            base64 (88 chars)                            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no separator between prefix and payload. Decoding validates the
//! prefix and the decoded byte count only — never the cryptographic quality
//! of the key.
//!
//! ## Security
//!
//! - Private key material is zeroized when dropped
//! - Keys are immutable once generated or parsed

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};

/// Size of a public (verification) key in bytes
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Size of a private (signing) key in bytes: the 32-byte seed followed by
/// the 32-byte public key, the ed25519 keypair layout
pub const PRIVATE_KEY_SIZE: usize = 64;

/// Text prefix for encoded public keys
pub const PUBLIC_KEY_PREFIX: &str = "nacl";

/// Text prefix for encoded private keys
pub const PRIVATE_KEY_PREFIX: &str = "NACL-SECRET-KEY-";

/// A 32-byte Ed25519 verification key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(pub(crate) [u8; PUBLIC_KEY_SIZE]);

impl PublicKey {
    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the raw key bytes
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.0
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_key(PUBLIC_KEY_PREFIX, &self.0))
    }
}

impl FromStr for PublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut bytes = [0u8; PUBLIC_KEY_SIZE];
        decode_key(s.trim(), PUBLIC_KEY_PREFIX, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A 64-byte Ed25519 signing key (seed ‖ public key)
///
/// ## Security
///
/// The key bytes are zeroized when this struct is dropped. The `Debug`
/// impl never prints key material.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey(pub(crate) [u8; PRIVATE_KEY_SIZE]);

impl PrivateKey {
    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; PRIVATE_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the secret key bytes (for backup/storage)
    ///
    /// ## Security Warning
    ///
    /// Only use this for secure storage. Never log or transmit these bytes.
    pub fn secret_bytes(&self) -> [u8; PRIVATE_KEY_SIZE] {
        self.0
    }

    /// Extract the verification key embedded in the keypair layout
    pub fn public_key(&self) -> PublicKey {
        let mut bytes = [0u8; PUBLIC_KEY_SIZE];
        bytes.copy_from_slice(&self.0[PUBLIC_KEY_SIZE..]);
        PublicKey(bytes)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey").finish_non_exhaustive()
    }
}

impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_key(PRIVATE_KEY_PREFIX, &self.0))
    }
}

impl FromStr for PrivateKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut bytes = [0u8; PRIVATE_KEY_SIZE];
        decode_key(s.trim(), PRIVATE_KEY_PREFIX, &mut bytes)?;
        Ok(Self(bytes))
    }
}

/// A freshly generated signing/verification key pair
pub struct KeyPair {
    /// Verification key, safe to share
    pub public: PublicKey,
    /// Signing key, keep secret
    pub private: PrivateKey,
}

impl KeyPair {
    /// Generate a new random key pair
    ///
    /// Uses the operating system's secure random number generator.
    pub fn generate() -> Self {
        let signing = SigningKey::generate(&mut OsRng);
        Self {
            public: PublicKey(signing.verifying_key().to_bytes()),
            private: PrivateKey(signing.to_keypair_bytes()),
        }
    }
}

fn encode_key(prefix: &str, key: &[u8]) -> String {
    let mut out = String::with_capacity(prefix.len() + key.len().div_ceil(3) * 4);
    out.push_str(prefix);
    BASE64.encode_string(key, &mut out);
    out
}

fn decode_key(text: &str, prefix: &'static str, dst: &mut [u8]) -> Result<()> {
    let rest = text
        .strip_prefix(prefix)
        .ok_or(Error::BadPrefix { expected: prefix })?;
    let mut bytes = BASE64.decode(rest)?;
    if bytes.len() != dst.len() {
        bytes.zeroize();
        return Err(Error::BadLength {
            got: bytes.len(),
            expected: dst.len(),
        });
    }
    dst.copy_from_slice(&bytes);
    bytes.zeroize();
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
