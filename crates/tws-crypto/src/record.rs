// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ENCRYPTED KEY RECORD
//
// Fixed 226-character ASCII record, no delimiters:
//
//   offset   len  field
//   0        32   hex(verifier)            16 bytes, double SHA-256 of password
//   32       130  hex(public key)          65 bytes, uncompressed SEC1
//   162      64   hex(AES-128-ECB(secret)) 32 bytes, cipher key = SHA-256 of password
//
// The cipher runs block-by-block with no IV and no padding, so the same key and
// password always produce the same record. Legacy format; kept bit-exact.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use crate::derivation::{derive_cipher_key, derive_verifier, DERIVED_KEY_LEN};
use crate::keys::{KeyPair, PRIVATE_KEY_LEN, PUBLIC_KEY_LEN};
use crate::CryptoError;
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes128;
use std::fmt;
use std::ops::Range;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// Exact length of a persisted record.
pub const RECORD_LEN: usize = 226;

const VERIFIER_FIELD: Range<usize> = 0..32;
const PUBLIC_KEY_FIELD: Range<usize> = 32..162;
const PRIVATE_KEY_FIELD: Range<usize> = 162..RECORD_LEN;

const AES_BLOCK_LEN: usize = 16;

#[derive(Clone, PartialEq, Eq)]
pub struct EncryptedKeyRecord {
    verifier: [u8; DERIVED_KEY_LEN],
    public_key: [u8; PUBLIC_KEY_LEN],
    encrypted_private_key: [u8; PRIVATE_KEY_LEN],
}

impl EncryptedKeyRecord {
    /// Encrypt a full keypair under `password`.
    pub fn encode(keypair: &KeyPair, password: &str) -> Result<Self, CryptoError> {
        let secret = keypair
            .private_key_bytes()
            .ok_or(CryptoError::NoPrivateKey)?;

        let verifier = derive_verifier(password)?;
        let cipher_key = derive_cipher_key(password)?;

        let mut encrypted_private_key = *secret;
        let cipher = Aes128::new(GenericArray::from_slice(&cipher_key[..]));
        for block in encrypted_private_key.chunks_exact_mut(AES_BLOCK_LEN) {
            cipher.encrypt_block(GenericArray::from_mut_slice(block));
        }

        Ok(EncryptedKeyRecord {
            verifier,
            public_key: *keypair.public_key(),
            encrypted_private_key,
        })
    }

    /// Check the password, decrypt the secret and rebuild the keypair.
    ///
    /// The public key derived from the decrypted secret must equal the stored
    /// public-key field; a mismatch means the record was altered.
    pub fn decode(&self, password: &str) -> Result<KeyPair, CryptoError> {
        let verifier = derive_verifier(password)?;
        if !bool::from(verifier[..].ct_eq(&self.verifier[..])) {
            return Err(CryptoError::WrongPassword);
        }
        let cipher_key = derive_cipher_key(password)?;

        let mut secret = Zeroizing::new(self.encrypted_private_key);
        let cipher = Aes128::new(GenericArray::from_slice(&cipher_key[..]));
        for block in secret.chunks_exact_mut(AES_BLOCK_LEN) {
            cipher.decrypt_block(GenericArray::from_mut_slice(block));
        }

        let keypair =
            KeyPair::from_private_bytes(&secret[..]).map_err(|_| CryptoError::CorruptRecord)?;
        if keypair.public_key() != &self.public_key {
            log::warn!("Stored public key does not match decrypted private key");
            return Err(CryptoError::CorruptRecord);
        }
        Ok(keypair)
    }

    /// Parse the persisted form. Anything other than exactly 226 hex characters
    /// laid out as above is rejected as a whole.
    pub fn parse(record: &[u8]) -> Result<Self, CryptoError> {
        check_len(record)?;

        let mut verifier = [0u8; DERIVED_KEY_LEN];
        let mut public_key = [0u8; PUBLIC_KEY_LEN];
        let mut encrypted_private_key = [0u8; PRIVATE_KEY_LEN];
        decode_field(record, VERIFIER_FIELD, &mut verifier)?;
        decode_field(record, PUBLIC_KEY_FIELD, &mut public_key)?;
        decode_field(record, PRIVATE_KEY_FIELD, &mut encrypted_private_key)?;

        Ok(EncryptedKeyRecord {
            verifier,
            public_key,
            encrypted_private_key,
        })
    }

    /// Serialize to the 226-character persisted form.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    pub fn verifier(&self) -> &[u8; DERIVED_KEY_LEN] {
        &self.verifier
    }

    pub fn public_key(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.public_key
    }
}

impl fmt::Display for EncryptedKeyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.verifier))?;
        f.write_str(&hex::encode(self.public_key))?;
        f.write_str(&hex::encode(self.encrypted_private_key))
    }
}

impl fmt::Debug for EncryptedKeyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptedKeyRecord")
            .field("public_key", &hex::encode(self.public_key))
            .finish_non_exhaustive()
    }
}

fn check_len(record: &[u8]) -> Result<(), CryptoError> {
    if record.len() != RECORD_LEN {
        log::warn!(
            "Key record length need {} but {}",
            RECORD_LEN,
            record.len()
        );
        return Err(CryptoError::CorruptRecord);
    }
    Ok(())
}

fn decode_field(record: &[u8], field: Range<usize>, out: &mut [u8]) -> Result<(), CryptoError> {
    hex::decode_to_slice(&record[field], out).map_err(|_| CryptoError::CorruptRecord)
}

/// Encode `keypair` into the persisted text form.
pub fn encode(keypair: &KeyPair, password: &str) -> Result<Vec<u8>, CryptoError> {
    Ok(EncryptedKeyRecord::encode(keypair, password)?.to_bytes())
}

/// Full decode of a persisted record.
pub fn decode(record: &[u8], password: &str) -> Result<KeyPair, CryptoError> {
    EncryptedKeyRecord::parse(record)?.decode(password)
}

/// Watch-only decode: reads the public-key field only, no password.
pub fn decode_public_only(record: &[u8]) -> Result<KeyPair, CryptoError> {
    check_len(record)?;
    let mut public_key = [0u8; PUBLIC_KEY_LEN];
    decode_field(record, PUBLIC_KEY_FIELD, &mut public_key)?;
    KeyPair::from_public_bytes(&public_key).map_err(|_| CryptoError::CorruptRecord)
}

/// The clear-text verifier field, as stored.
pub fn stored_verifier(record: &[u8]) -> Result<&str, CryptoError> {
    check_len(record)?;
    std::str::from_utf8(&record[VERIFIER_FIELD]).map_err(|_| CryptoError::CorruptRecord)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PASSWORD: &str = "hunter2-hunter2";

    #[test]
    fn test_record_layout_offsets() {
        let kp = KeyPair::generate();
        let record = encode(&kp, PASSWORD).unwrap();
        assert_eq!(record.len(), RECORD_LEN);

        let text = std::str::from_utf8(&record).unwrap();
        assert_eq!(
            &text[0..32],
            hex::encode(derive_verifier(PASSWORD).unwrap())
        );
        assert_eq!(&text[32..162], hex::encode(kp.public_key()));
        assert!(text[32..].starts_with("04"));
        assert_eq!(text[162..].len(), 64);
        assert_ne!(
            &text[162..],
            hex::encode(kp.private_key_bytes().unwrap())
        );
    }

    #[test]
    fn test_round_trip() {
        let kp = KeyPair::generate();
        let record = encode(&kp, PASSWORD).unwrap();
        assert_eq!(decode(&record, PASSWORD).unwrap(), kp);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let kp = KeyPair::generate();
        assert_eq!(encode(&kp, PASSWORD).unwrap(), encode(&kp, PASSWORD).unwrap());
    }

    #[test]
    fn test_known_ciphertext() {
        // AES-128-ECB, key = SHA-256("123456")[..16], each block encrypted alone
        let kp = KeyPair::from_private_hex(&"11".repeat(32)).unwrap();
        let record = EncryptedKeyRecord::encode(&kp, "123456").unwrap();

        let cipher_key = derive_cipher_key("123456").unwrap();
        let cipher = Aes128::new(GenericArray::from_slice(&cipher_key[..]));
        let mut block = GenericArray::clone_from_slice(&[0x11u8; 16]);
        cipher.encrypt_block(&mut block);

        assert_eq!(&record.encrypted_private_key[..16], block.as_slice());
        assert_eq!(&record.encrypted_private_key[16..], block.as_slice());
    }

    #[test]
    fn test_wrong_password() {
        let kp = KeyPair::generate();
        let record = encode(&kp, PASSWORD).unwrap();
        assert_eq!(
            decode(&record, "another-password"),
            Err(CryptoError::WrongPassword)
        );
    }

    #[test]
    fn test_invalid_password_on_decode() {
        let kp = KeyPair::generate();
        let record = encode(&kp, PASSWORD).unwrap();
        assert_eq!(decode(&record, "abc"), Err(CryptoError::InvalidPassword));
    }

    #[test]
    fn test_encode_watch_only_fails() {
        let kp = KeyPair::generate().to_watch_only();
        assert_eq!(
            EncryptedKeyRecord::encode(&kp, PASSWORD),
            Err(CryptoError::NoPrivateKey)
        );
    }

    #[test]
    fn test_wrong_length_is_corrupt() {
        let kp = KeyPair::generate();
        let record = encode(&kp, PASSWORD).unwrap();

        assert_eq!(decode(&[], PASSWORD), Err(CryptoError::CorruptRecord));
        assert_eq!(
            decode(&record[..225], PASSWORD),
            Err(CryptoError::CorruptRecord)
        );
        let mut longer = record.clone();
        longer.push(b'\n');
        assert_eq!(decode(&longer, PASSWORD), Err(CryptoError::CorruptRecord));
        assert_eq!(decode_public_only(&longer), Err(CryptoError::CorruptRecord));
        assert_eq!(stored_verifier(&longer), Err(CryptoError::CorruptRecord));
    }

    #[test]
    fn test_non_hex_field_is_corrupt() {
        let kp = KeyPair::generate();
        let mut record = encode(&kp, PASSWORD).unwrap();
        record[200] = b'z';
        assert_eq!(decode(&record, PASSWORD), Err(CryptoError::CorruptRecord));
        // public-only decode never looks at the private field
        assert!(decode_public_only(&record).is_ok());
    }

    #[test]
    fn test_tampered_public_key_is_corrupt() {
        let kp = KeyPair::generate();
        let other = KeyPair::generate();
        let mut record = encode(&kp, PASSWORD).unwrap();
        record[PUBLIC_KEY_FIELD].copy_from_slice(hex::encode(other.public_key()).as_bytes());
        assert_eq!(decode(&record, PASSWORD), Err(CryptoError::CorruptRecord));
    }

    #[test]
    fn test_public_only_decode() {
        let kp = KeyPair::generate();
        let record = encode(&kp, PASSWORD).unwrap();
        let watch = decode_public_only(&record).unwrap();
        assert!(watch.is_watch_only());
        assert_eq!(watch.address(), kp.address());
    }

    #[test]
    fn test_stored_verifier_field() {
        let kp = KeyPair::generate();
        let record = encode(&kp, PASSWORD).unwrap();
        assert_eq!(
            stored_verifier(&record).unwrap(),
            hex::encode(derive_verifier(PASSWORD).unwrap())
        );
    }

    #[test]
    fn test_parse_then_display_is_identity() {
        let kp = KeyPair::generate();
        let record = encode(&kp, PASSWORD).unwrap();
        let parsed = EncryptedKeyRecord::parse(&record).unwrap();
        assert_eq!(parsed.to_bytes(), record);
        assert_eq!(parsed.public_key(), kp.public_key());
        assert_eq!(parsed.verifier(), &derive_verifier(PASSWORD).unwrap());
    }
}
