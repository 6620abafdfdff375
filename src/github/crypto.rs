//! Sealed-box secret encryption
//!
//! GitHub secret endpoints only accept values encrypted against the target
//! repository's public key with an anonymous NaCl sealed box. The key is
//! fetched fresh before every write (it can rotate) and is never persisted;
//! decryption is never performed on this side.

use anyhow::{anyhow, bail, Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use crypto_box::aead::OsRng;
use crypto_box::PublicKey;
use zeroize::Zeroizing;

/// Length of a raw X25519 public key.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Bytes of overhead a sealed box adds to the plaintext
/// (ephemeral public key + authentication tag).
pub const SEAL_OVERHEAD: usize = 48;

/// Seal a plaintext under a base64-encoded repository public key.
pub fn seal_plaintext(plaintext: &str, public_key_b64: &str) -> Result<Vec<u8>> {
    let key_bytes = Zeroizing::new(
        BASE64
            .decode(public_key_b64)
            .context("Repository public key is not valid base64")?,
    );
    if key_bytes.len() != PUBLIC_KEY_LENGTH {
        bail!(
            "Repository public key must be {} bytes, got {}",
            PUBLIC_KEY_LENGTH,
            key_bytes.len()
        );
    }

    let mut raw_key = [0u8; PUBLIC_KEY_LENGTH];
    raw_key.copy_from_slice(&key_bytes);
    let public_key = PublicKey::from(raw_key);

    public_key
        .seal(&mut OsRng, plaintext.as_bytes())
        .map_err(|_| anyhow!("Sealed-box encryption failed"))
}

/// Seal a plaintext and base64-encode the ciphertext for transport.
pub fn seal_and_encode(plaintext: &str, public_key_b64: &str) -> Result<String> {
    Ok(BASE64.encode(seal_plaintext(plaintext, public_key_b64)?))
}

/// Check that a value is valid standard base64.
pub fn validate_base64(value: &str) -> Result<()> {
    BASE64
        .decode(value)
        .map(|_| ())
        .context("Value is not valid base64")
}
