// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ADDRESS DERIVATION
//
// Address = last 20 bytes of Keccak-256 over the 64-byte uncompressed point
// (format byte 0x04 stripped). Displayed as 40 lower-case hex characters.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use crate::keys::PUBLIC_KEY_LEN;
use crate::CryptoError;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use std::fmt;
use std::str::FromStr;

/// Raw address length in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Length of the hex form accepted on input.
const ADDRESS_HEX_LEN: usize = ADDRESS_LEN * 2;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// Derive the address of an uncompressed SEC1 public key.
    pub fn from_public_key(public_key: &[u8; PUBLIC_KEY_LEN]) -> Self {
        let hash = Keccak256::digest(&public_key[1..]);
        let mut out = [0u8; ADDRESS_LEN];
        out.copy_from_slice(&hash[hash.len() - ADDRESS_LEN..]);
        Address(out)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let raw: [u8; ADDRESS_LEN] = bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidAddress(format!("{} bytes", bytes.len())))?;
        Ok(Address(raw))
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl FromStr for Address {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !address_valid(s) {
            return Err(CryptoError::InvalidAddress(s.to_string()));
        }
        let mut out = [0u8; ADDRESS_LEN];
        hex::decode_to_slice(s, &mut out).map_err(|_| CryptoError::InvalidAddress(s.to_string()))?;
        Ok(Address(out))
    }
}

/// Validate the textual form of an address (length only; hex is checked on parse).
pub fn address_valid(address: &str) -> bool {
    if address.is_empty() {
        log::warn!("Address is empty");
        return false;
    }
    if address.len() != ADDRESS_HEX_LEN {
        log::warn!(
            "Address length need {} but {}",
            ADDRESS_HEX_LEN,
            address.len()
        );
        return false;
    }
    true
}
