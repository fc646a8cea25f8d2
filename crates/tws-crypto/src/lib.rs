// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TWS WALLET - CRYPTOGRAPHY MODULE
//
// secp256k1 identity primitives for the single-key wallet.
// - Key generation, import (hex scalar) and watch-only reconstruction
// - Recoverable ECDSA signing over a 32-byte transaction digest
// - Address derivation (Keccak-256, 20 bytes)
// - Password key schedule (verifier + cipher key) and the 226-char key record
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub mod address;
pub mod derivation;
pub mod keys;
pub mod record;

pub use address::{address_valid, Address, ADDRESS_LEN};
pub use derivation::{
    derive_cipher_key, derive_verifier, password_valid, DERIVED_KEY_LEN, MIN_PASSWORD_LEN,
};
pub use keys::{
    private_key_valid, verify_prehash, KeyPair, PRIVATE_KEY_LEN, PUBLIC_KEY_LEN, SIGNATURE_LEN,
};
pub use record::{decode, decode_public_only, encode, stored_verifier, EncryptedKeyRecord, RECORD_LEN};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Invalid password: must be at least 6 characters")]
    InvalidPassword,
    #[error("Wrong password")]
    WrongPassword,
    #[error("Key record is missing or corrupt")]
    CorruptRecord,
    #[error("Keypair has no private key")]
    NoPrivateKey,
    #[error("Invalid private key")]
    InvalidPrivateKey,
    #[error("Invalid public key")]
    InvalidPublicKey,
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    #[error("Signing failed: {0}")]
    SigningFailed(String),
}
