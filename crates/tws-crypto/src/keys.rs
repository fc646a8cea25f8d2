// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// KEYPAIR
//
// A KeyPair always carries the 65-byte uncompressed public key. The 32-byte
// secret scalar is optional: without it the pair is watch-only and can only
// derive an address.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use crate::address::Address;
use crate::CryptoError;
use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use std::fmt;
use zeroize::Zeroizing;

/// Uncompressed SEC1 point: 0x04 || X || Y
pub const PUBLIC_KEY_LEN: usize = 65;
pub const PRIVATE_KEY_LEN: usize = 32;
/// r || s || recovery id
pub const SIGNATURE_LEN: usize = 65;

#[derive(Clone)]
pub struct KeyPair {
    public_key: [u8; PUBLIC_KEY_LEN],
    secret_key: Option<Zeroizing<[u8; PRIVATE_KEY_LEN]>>,
}

impl KeyPair {
    /// Generate a fresh keypair from the OS RNG.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut OsRng);
        Self::from_signing_key(&signing_key)
    }

    /// Import from a raw 32-byte big-endian scalar.
    pub fn from_private_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != PRIVATE_KEY_LEN {
            return Err(CryptoError::InvalidPrivateKey);
        }
        let signing_key =
            SigningKey::from_slice(bytes).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self::from_signing_key(&signing_key))
    }

    /// Import from a 64-character hex scalar.
    pub fn from_private_hex(private_key: &str) -> Result<Self, CryptoError> {
        let bytes = Zeroizing::new(
            hex::decode(private_key.trim()).map_err(|_| CryptoError::InvalidPrivateKey)?,
        );
        Self::from_private_bytes(&bytes)
    }

    /// Watch-only keypair from a SEC1 public key (compressed or uncompressed).
    pub fn from_public_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let verifying_key =
            VerifyingKey::from_sec1_bytes(bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(KeyPair {
            public_key: uncompressed(&verifying_key),
            secret_key: None,
        })
    }

    fn from_signing_key(signing_key: &SigningKey) -> Self {
        let mut secret = Zeroizing::new([0u8; PRIVATE_KEY_LEN]);
        secret.copy_from_slice(&signing_key.to_bytes());
        KeyPair {
            public_key: uncompressed(signing_key.verifying_key()),
            secret_key: Some(secret),
        }
    }

    pub fn public_key(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.public_key
    }

    pub fn has_private_key(&self) -> bool {
        self.secret_key.is_some()
    }

    pub fn is_watch_only(&self) -> bool {
        self.secret_key.is_none()
    }

    /// Raw secret, for the key record codec only.
    pub(crate) fn private_key_bytes(&self) -> Option<&[u8; PRIVATE_KEY_LEN]> {
        self.secret_key.as_deref()
    }

    /// Drop the secret, keeping only the public half.
    pub fn to_watch_only(&self) -> KeyPair {
        KeyPair {
            public_key: self.public_key,
            secret_key: None,
        }
    }

    pub fn address(&self) -> Address {
        Address::from_public_key(&self.public_key)
    }

    /// Recoverable ECDSA over a precomputed 32-byte digest.
    pub fn sign_prehash(&self, digest: &[u8; 32]) -> Result<[u8; SIGNATURE_LEN], CryptoError> {
        let secret = self.secret_key.as_ref().ok_or(CryptoError::NoPrivateKey)?;
        let signing_key =
            SigningKey::from_slice(&secret[..]).map_err(|_| CryptoError::InvalidPrivateKey)?;

        let (signature, recovery_id) = signing_key
            .sign_prehash_recoverable(digest)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;

        let mut out = [0u8; SIGNATURE_LEN];
        out[..64].copy_from_slice(&signature.to_bytes());
        out[64] = recovery_id.to_byte();
        Ok(out)
    }
}

impl PartialEq for KeyPair {
    fn eq(&self, other: &Self) -> bool {
        self.public_key == other.public_key
            && self.private_key_bytes() == other.private_key_bytes()
    }
}

impl Eq for KeyPair {}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &hex::encode(self.public_key))
            .field("watch_only", &self.is_watch_only())
            .finish()
    }
}

fn uncompressed(verifying_key: &VerifyingKey) -> [u8; PUBLIC_KEY_LEN] {
    let point = verifying_key.to_encoded_point(false);
    let mut out = [0u8; PUBLIC_KEY_LEN];
    out.copy_from_slice(point.as_bytes());
    out
}

/// Verify a signature produced by [`KeyPair::sign_prehash`].
pub fn verify_prehash(public_key: &[u8], digest: &[u8; 32], signature: &[u8]) -> bool {
    if signature.len() != SIGNATURE_LEN {
        return false;
    }
    let verifying_key = match VerifyingKey::from_sec1_bytes(public_key) {
        Ok(k) => k,
        Err(_) => return false,
    };
    let sig = match Signature::from_slice(&signature[..64]) {
        Ok(s) => s,
        Err(_) => return false,
    };
    verifying_key.verify_prehash(digest, &sig).is_ok()
}

/// Shape check for a hex private key as typed by a user.
pub fn private_key_valid(private_key: &str) -> bool {
    if private_key.is_empty() {
        log::warn!("PrivateKey is empty");
        return false;
    }
    if private_key.len() != PRIVATE_KEY_LEN * 2 {
        log::warn!(
            "PrivateKey length need {} but {}",
            PRIVATE_KEY_LEN * 2,
            private_key.len()
        );
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_ONE: &str = "0000000000000000000000000000000000000000000000000000000000000001";

    #[test]
    fn test_generated_keypair_has_uncompressed_public_key() {
        let kp = KeyPair::generate();
        assert_eq!(kp.public_key()[0], 0x04);
        assert!(kp.has_private_key());
        assert!(!kp.is_watch_only());
    }

    #[test]
    fn test_import_matches_generator_point() {
        let kp = KeyPair::from_private_hex(KEY_ONE).unwrap();
        assert_eq!(
            hex::encode(&kp.public_key()[1..33]),
            "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
    }

    #[test]
    fn test_import_rejects_bad_input() {
        assert_eq!(
            KeyPair::from_private_hex("not hex"),
            Err(CryptoError::InvalidPrivateKey)
        );
        assert_eq!(
            KeyPair::from_private_hex("abcd"),
            Err(CryptoError::InvalidPrivateKey)
        );
        // zero is not a valid scalar
        assert_eq!(
            KeyPair::from_private_hex(&"00".repeat(32)),
            Err(CryptoError::InvalidPrivateKey)
        );
        // curve order n is out of range
        assert_eq!(
            KeyPair::from_private_hex(
                "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141"
            ),
            Err(CryptoError::InvalidPrivateKey)
        );
    }

    #[test]
    fn test_watch_only_round_trip_through_public_bytes() {
        let kp = KeyPair::generate();
        let watch = KeyPair::from_public_bytes(kp.public_key()).unwrap();
        assert!(watch.is_watch_only());
        assert_eq!(watch.public_key(), kp.public_key());
        assert_eq!(watch.address(), kp.address());
        assert_eq!(watch, kp.to_watch_only());
    }

    #[test]
    fn test_public_bytes_rejects_garbage() {
        assert_eq!(
            KeyPair::from_public_bytes(&[0x04; 65]),
            Err(CryptoError::InvalidPublicKey)
        );
        assert_eq!(
            KeyPair::from_public_bytes(&[]),
            Err(CryptoError::InvalidPublicKey)
        );
    }

    #[test]
    fn test_sign_and_verify() {
        let kp = KeyPair::generate();
        let digest = [7u8; 32];
        let sig = kp.sign_prehash(&digest).unwrap();
        assert!(sig[64] <= 3);
        assert!(verify_prehash(kp.public_key(), &digest, &sig));
        assert!(!verify_prehash(kp.public_key(), &[8u8; 32], &sig));
    }

    #[test]
    fn test_watch_only_cannot_sign() {
        let kp = KeyPair::generate().to_watch_only();
        assert_eq!(kp.sign_prehash(&[1u8; 32]), Err(CryptoError::NoPrivateKey));
    }

    #[test]
    fn test_debug_hides_secret() {
        let kp = KeyPair::from_private_hex(KEY_ONE).unwrap();
        let shown = format!("{:?}", kp);
        assert!(!shown.contains(KEY_ONE));
        assert!(shown.contains("watch_only: false"));
    }

    #[test]
    fn test_private_key_valid_shape() {
        assert!(private_key_valid(KEY_ONE));
        assert!(!private_key_valid(""));
        assert!(!private_key_valid("01"));
    }
}
