//! File and stream plumbing around the sigil-core operations.
//!
//! The core works on in-memory byte buffers and parsed keys; everything
//! here is about getting bytes in and out: resolving key material from a
//! literal value, a file, or the environment, reading messages from files
//! or stdin, and writing results with sensible file modes.

use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use color_eyre::eyre::{Result, WrapErr};
use sigil_core::{open, sign, sign_json, verify_json, KeyPair, PrivateKey, PublicKey};

/// Default environment variable holding the armored private key
pub const DEFAULT_PRIVATE_KEY_ENV: &str = "NACL_PRIVATE_KEY";

/// Default environment variable holding the armored public key
pub const DEFAULT_PUBLIC_KEY_ENV: &str = "NACL_PUBLIC_KEY";

/// Where key text comes from, in precedence order: an explicit literal
/// value, then a key file, then an environment variable.
#[derive(Debug)]
pub struct KeySource {
    pub literal: Option<String>,
    pub file: Option<PathBuf>,
    pub env: String,
}

impl KeySource {
    fn resolve(&self) -> Result<String> {
        if let Some(text) = &self.literal {
            return Ok(text.clone());
        }
        if let Some(path) = &self.file {
            return fs::read_to_string(path)
                .wrap_err_with(|| format!("read key from {}", path.display()));
        }
        env::var(&self.env).wrap_err_with(|| format!("no key in ${}", self.env))
    }
}

/// Generate a key pair and write both armored keys.
///
/// The public key file is world-readable (0444); the secret key file is
/// readable by the owner only (0400). A path of `-` or `""` prints to
/// stdout instead.
pub fn generate_key_files(pub_path: &str, priv_path: &str) -> Result<()> {
    let pair = KeyPair::generate();
    write_key(pub_path, &pair.public.to_string(), 0o444)?;
    write_key(priv_path, &pair.private.to_string(), 0o400)?;
    tracing::info!(public = %pair.public, "generated key pair");
    Ok(())
}

/// Sign the message from `message_file` and write the result to `output`.
pub fn sign_file(key: &KeySource, message_file: &str, output: &str, json: bool) -> Result<()> {
    let private: PrivateKey = key.resolve()?.parse()?;
    let message = read_input(message_file)
        .wrap_err_with(|| format!("read message from {message_file:?}"))?;

    let signed = if json {
        sign_json(&private, &message)?
    } else {
        sign(&private, &message)?
    };
    tracing::debug!(bytes = message.len(), json, "message signed");

    write_output(output, &signed)
        .wrap_err_with(|| format!("write signed message to {output:?}"))
}

/// Verify the signed input and write the recovered payload to `output`.
pub fn verify_file(key: &KeySource, input: &str, output: &str, json: bool) -> Result<()> {
    let public: PublicKey = key.resolve()?.parse()?;
    let signed = read_input(input)
        .wrap_err_with(|| format!("read signed message from {input:?}"))?;

    let payload = if json {
        verify_json(&public, &signed)?
    } else {
        open(&public, &signed)?
    };
    tracing::debug!(bytes = payload.len(), json, "signature verified");

    write_output(output, &payload).wrap_err_with(|| format!("write payload to {output:?}"))
}

fn is_stdio(path: &str) -> bool {
    path.is_empty() || path == "-"
}

fn write_key(path: &str, encoded: &str, mode: u32) -> Result<()> {
    if is_stdio(path) {
        println!("{encoded}");
        return Ok(());
    }
    fs::write(path, encoded).wrap_err_with(|| format!("write key to {path:?}"))?;
    set_mode(path, mode)
}

fn read_input(path: &str) -> io::Result<Vec<u8>> {
    if is_stdio(path) {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        fs::read(path)
    }
}

fn write_output(path: &str, bytes: &[u8]) -> Result<()> {
    if is_stdio(path) {
        io::stdout().write_all(bytes)?;
        Ok(())
    } else {
        fs::write(path, bytes)?;
        set_mode(path, 0o640)
    }
}

#[cfg(unix)]
fn set_mode(path: &str, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .wrap_err_with(|| format!("set permissions on {path:?}"))
}

#[cfg(not(unix))]
fn set_mode(_path: &str, _mode: u32) -> Result<()> {
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
