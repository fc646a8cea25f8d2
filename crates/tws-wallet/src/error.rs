use thiserror::Error;
use tws_crypto::CryptoError;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error(transparent)]
    Crypto(#[from] CryptoError),
    #[error("No keypair loaded")]
    NoKeypair,
    #[error("Ledger service unavailable: {0}")]
    RemoteUnavailable(String),
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl WalletError {
    /// True when the failure came from a missing signing capability.
    pub fn is_no_private_key(&self) -> bool {
        matches!(self, WalletError::Crypto(CryptoError::NoPrivateKey))
    }
}
