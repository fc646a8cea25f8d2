//! Password key schedule.
//!
//! One password yields two unrelated 16-byte values:
//!
//! - the **verifier** `SHA-256(SHA-256(password))[..16]`, stored in clear text in the
//!   key record and only ever compared against;
//! - the **cipher key** `SHA-256(password)[..16]`, used for AES-128 on the private key
//!   and never written anywhere.

use crate::CryptoError;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Shortest password accepted by the key schedule (in characters).
pub const MIN_PASSWORD_LEN: usize = 6;

/// Length of both derived values.
pub const DERIVED_KEY_LEN: usize = 16;

/// Password-strength gate shared by every derivation.
pub fn password_valid(password: &str) -> bool {
    if password.is_empty() {
        log::warn!("Password is empty");
        return false;
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        log::warn!("Password is too short");
        return false;
    }
    true
}

/// Derive the clear-text password verifier (double SHA-256, first 16 bytes).
pub fn derive_verifier(password: &str) -> Result<[u8; DERIVED_KEY_LEN], CryptoError> {
    if !password_valid(password) {
        return Err(CryptoError::InvalidPassword);
    }
    let mut first = Sha256::digest(password.as_bytes());
    let second = Sha256::digest(&first);
    first.as_mut_slice().fill(0);

    let mut verifier = [0u8; DERIVED_KEY_LEN];
    verifier.copy_from_slice(&second[..DERIVED_KEY_LEN]);
    Ok(verifier)
}

/// Derive the AES-128 key protecting the private key (single SHA-256, first 16 bytes).
pub fn derive_cipher_key(
    password: &str,
) -> Result<Zeroizing<[u8; DERIVED_KEY_LEN]>, CryptoError> {
    if !password_valid(password) {
        return Err(CryptoError::InvalidPassword);
    }
    let mut digest = Sha256::digest(password.as_bytes());

    let mut key = Zeroizing::new([0u8; DERIVED_KEY_LEN]);
    key.copy_from_slice(&digest[..DERIVED_KEY_LEN]);
    digest.as_mut_slice().fill(0);
    Ok(key)
}
