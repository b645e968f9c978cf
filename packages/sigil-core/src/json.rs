//! # JSON Document Signing
//!
//! Embeds a detached signature inside a serialized JSON object WITHOUT
//! re-serializing or reformatting the document, and verifies it by exact
//! byte-slicing rather than semantic JSON comparison.
//!
//! ## Wire Format
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        SIGNED DOCUMENT LAYOUT                       │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │                                                                     │
//! │  original document  {"user":"alice","n":42}                         │
//! │                                                                     │
//! │  signed document    {"user":"alice","n":42,"naclSig":"mJf…cQ=="}\n  │
//! │                     └────────────────────┘└──────────┘└─────┘       │
//! │                       T (signed bytes)      marker     base64 sig   │
//! │                                                                     │
//! │  T = document, trailing whitespace trimmed, final '}' stripped      │
//! │  marker = ,"naclSig":"  (12 bytes)                                  │
//! │  sig = base64std(ed25519_detached_sign(T))  (88 chars)              │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The signature covers `T` — the original serialization minus its closing
//! brace — NOT the full signed document and NOT any semantically-equivalent
//! re-serialization. Verification therefore requires the byte-exact
//! original: reformatting the payload, even without changing its meaning,
//! invalidates the signature.
//!
//! ## Verification
//!
//! Verification searches for the LAST occurrence of the marker. The payload
//! may legitimately contain `,"naclSig":"` somewhere inside (a nested
//! object, a string value), but the signer appended its field last, so the
//! final occurrence is the real one. Precondition: the payload text must
//! not itself END with an identical trailing fragment.
//!
//! The suffix is parsed by copying it and rewriting its leading `,` to `{`,
//! turning it into a standalone one-key object. The caller's buffer is
//! never mutated.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::keys::{PrivateKey, PublicKey};
use crate::signing::{sign_detached, verify_detached, Signature};

/// Byte sequence separating the payload from the armored signature
pub const SIG_MARKER: &str = r#","naclSig":""#;

/// Growth of a whitespace-trimmed document after signing: the 12-byte
/// marker, 88 base64 characters, the closing `"}`, and a trailing newline,
/// minus the original `}` the output reuses
pub const JSON_OVERHEAD: usize = 102;

/// The signature fragment, parsed after rewriting its first byte to `{`
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SigFragment {
    #[serde(rename = "naclSig")]
    nacl_sig: String,
}

/// Sign a serialized JSON object, embedding the signature as a trailing
/// `naclSig` key
///
/// The input must be a JSON object serialization: after trimming trailing
/// whitespace it has to end with `}`, otherwise [`Error::BadFormat`] is
/// returned. The document is not parsed or re-encoded — all original bytes
/// are preserved verbatim.
///
/// ## Example
///
/// ```
/// use sigil_core::{sign_json, verify_json, KeyPair};
///
/// let pair = KeyPair::generate();
/// let signed = sign_json(&pair.private, br#"{"a":1}"#).unwrap();
/// assert_eq!(verify_json(&pair.public, &signed).unwrap(), br#"{"a":1}"#.to_vec());
/// ```
pub fn sign_json(private: &PrivateKey, document: &[u8]) -> Result<Vec<u8>> {
    let trimmed = document.trim_ascii_end();
    let payload = trimmed
        .strip_suffix(b"}")
        .ok_or_else(|| Error::BadFormat("document does not end with '}'".into()))?;

    let signature = sign_detached(private, payload)?;

    let mut out = Vec::with_capacity(trimmed.len() + JSON_OVERHEAD);
    out.extend_from_slice(payload);
    out.extend_from_slice(SIG_MARKER.as_bytes());
    out.extend_from_slice(signature.to_base64().as_bytes());
    out.extend_from_slice(b"\"}\n");
    Ok(out)
}

/// Verify a signed JSON document and return the payload with its closing
/// brace restored
///
/// Errors:
/// - [`Error::BadFormat`] — no marker, unparsable signature fragment, or an
///   empty signature value
/// - [`Error::SignatureMismatch`] — the signature does not cover the
///   payload; the candidate payload travels inside the error so callers can
///   inspect (but must not trust) what failed
pub fn verify_json(public: &PublicKey, document: &[u8]) -> Result<Vec<u8>> {
    let marker = SIG_MARKER.as_bytes();
    let at = find_last(document, marker)
        .ok_or_else(|| Error::BadFormat(format!("no {SIG_MARKER:?} marker")))?;

    let (payload, suffix) = document.split_at(at);

    // Private copy of the suffix with ',' rewritten to '{' so it parses as
    // a standalone one-key object. The input buffer stays untouched.
    let mut fragment = suffix.to_vec();
    fragment[0] = b'{';
    let their: SigFragment = serde_json::from_slice(&fragment)
        .map_err(|e| Error::BadFormat(format!("signature fragment: {e}")))?;

    let sig_bytes = BASE64.decode(their.nacl_sig.as_bytes())?;
    if sig_bytes.is_empty() {
        return Err(Error::BadFormat("empty signature".into()));
    }
    let signature = Signature::from_slice(&sig_bytes)?;

    let mut out = Vec::with_capacity(payload.len() + 1);
    out.extend_from_slice(payload);
    out.push(b'}');

    if verify_detached(public, payload, &signature) {
        tracing::trace!(payload_len = payload.len(), "signed document verified");
        Ok(out)
    } else {
        Err(Error::SignatureMismatch { payload: out })
    }
}

fn find_last(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).rposition(|w| w == needle)
}

// ============================================================================
// TESTS
// ============================================================================
