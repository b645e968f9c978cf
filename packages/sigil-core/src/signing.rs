//! # Digital Signatures
//!
//! Thin adapter over the Ed25519 primitive: detached sign/verify plus the
//! NaCl combined form, where the 64-byte signature is prepended to the
//! message (`signature ‖ message`).
//!
//! Verification never panics on malformed input — truncated or corrupt
//! combined messages simply fail to verify.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use ed25519_dalek::{Signature as Ed25519Signature, Signer, SigningKey, Verifier, VerifyingKey};

use crate::error::{Error, Result};
use crate::keys::{PrivateKey, PublicKey};

/// Size of an Ed25519 signature in bytes; also the fixed overhead of the
/// combined signed-message form
pub const SIGNATURE_SIZE: usize = 64;

/// A detached Ed25519 signature
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature(pub(crate) [u8; SIGNATURE_SIZE]);

impl Signature {
    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; SIGNATURE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from a slice (must be exactly 64 bytes)
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let bytes: [u8; SIGNATURE_SIZE] =
            slice.try_into().map_err(|_| Error::BadLength {
                got: slice.len(),
                expected: SIGNATURE_SIZE,
            })?;
        Ok(Self(bytes))
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_SIZE] {
        &self.0
    }

    /// Armor as standard base64 (padded)
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.0)
    }

    /// Decode from standard base64
    pub fn from_base64(text: &str) -> Result<Self> {
        let bytes = BASE64.decode(text)?;
        Self::from_slice(&bytes)
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Sign a message, producing a detached 64-byte signature
///
/// Fails only if the private key bytes do not form a consistent keypair
/// (the embedded public half must match the seed).
pub fn sign_detached(private: &PrivateKey, message: &[u8]) -> Result<Signature> {
    let key = signing_key(private)?;
    Ok(Signature(key.sign(message).to_bytes()))
}

/// Verify a detached signature over a message
///
/// Returns `false` on any mismatch, including public key bytes that are
/// not a valid curve point.
pub fn verify_detached(public: &PublicKey, message: &[u8], signature: &Signature) -> bool {
    let Ok(key) = VerifyingKey::from_bytes(public.as_bytes()) else {
        return false;
    };
    let sig = Ed25519Signature::from_bytes(signature.as_bytes());
    key.verify(message, &sig).is_ok()
}

/// Sign a message in the combined form: `signature(64) ‖ message`
pub fn sign(private: &PrivateKey, message: &[u8]) -> Result<Vec<u8>> {
    let signature = sign_detached(private, message)?;
    let mut out = Vec::with_capacity(SIGNATURE_SIZE + message.len());
    out.extend_from_slice(signature.as_bytes());
    out.extend_from_slice(message);
    Ok(out)
}

/// Open a combined signed message, returning the embedded message
///
/// Any mismatch, truncation, or corruption yields
/// [`Error::SignatureMismatch`] — the message bytes it carries are the
/// unverified remainder and must not be trusted.
pub fn open(public: &PublicKey, signed_message: &[u8]) -> Result<Vec<u8>> {
    if signed_message.len() < SIGNATURE_SIZE {
        return Err(Error::SignatureMismatch { payload: Vec::new() });
    }
    let (sig, message) = signed_message.split_at(SIGNATURE_SIZE);
    let signature = Signature::from_slice(sig)?;
    if verify_detached(public, message, &signature) {
        Ok(message.to_vec())
    } else {
        Err(Error::SignatureMismatch {
            payload: message.to_vec(),
        })
    }
}

fn signing_key(private: &PrivateKey) -> Result<SigningKey> {
    SigningKey::from_keypair_bytes(&private.secret_bytes())
        .map_err(|e| Error::InvalidKey(format!("unusable private key: {e}")))
}

// ============================================================================
// TESTS
// ============================================================================
