// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// IDENTITY STORE
//
// Owns the one keypair of this wallet (full or watch-only), the login
// session, and the storage backend holding the encrypted key record.
// Login state is tracked but NOT checked by sign(): signing only requires
// a private key.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use crate::storage::KeyStorage;
use crate::WalletError;
use subtle::ConstantTimeEq;
use tws_core::Transaction;
use tws_crypto::{derive_verifier, stored_verifier, Address, CryptoError, KeyPair};

/// In-memory login flag; reset on restart, never persisted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub logged_in: bool,
}

pub struct IdentityStore<S> {
    keypair: Option<KeyPair>,
    session: Session,
    storage: S,
}

impl<S: KeyStorage> IdentityStore<S> {
    /// No keypair held yet (balance lookups load one lazily).
    pub fn empty(storage: S) -> Self {
        Self {
            keypair: None,
            session: Session::default(),
            storage,
        }
    }

    /// Fresh random keypair.
    pub fn generate(storage: S) -> Self {
        Self::with_keypair(storage, KeyPair::generate())
    }

    /// Import a hex-encoded private key.
    pub fn from_private_hex(storage: S, private_key: &str) -> Result<Self, WalletError> {
        let keypair = KeyPair::from_private_hex(private_key)?;
        Ok(Self::with_keypair(storage, keypair))
    }

    /// Wrap a keypair the caller already holds.
    pub fn with_keypair(storage: S, keypair: KeyPair) -> Self {
        Self {
            keypair: Some(keypair),
            session: Session::default(),
            storage,
        }
    }

    /// Read and fully decrypt the persisted record.
    pub fn load_full(storage: S, password: &str) -> Result<Self, WalletError> {
        let record = storage.read()?.ok_or(CryptoError::CorruptRecord)?;
        let keypair = tws_crypto::decode(&record, password)?;
        Ok(Self::with_keypair(storage, keypair))
    }

    /// Read only the public key; no password, cannot sign.
    pub fn load_watch_only(storage: S) -> Result<Self, WalletError> {
        let mut identity = Self::empty(storage);
        identity.load_public_key()?;
        Ok(identity)
    }

    /// Hex address of the persisted public key, if a valid record exists.
    pub fn address_from_storage(storage: &S) -> Option<String> {
        let record = storage.read().ok()??;
        tws_crypto::decode_public_only(&record)
            .ok()
            .map(|kp| kp.address().to_hex())
    }

    /// Replace the held keypair with the watch-only one from storage.
    pub fn load_public_key(&mut self) -> Result<(), WalletError> {
        let record = self.storage.read()?.ok_or(CryptoError::CorruptRecord)?;
        self.keypair = Some(tws_crypto::decode_public_only(&record)?);
        Ok(())
    }

    /// Check `password` against the stored verifier. Never fails: any
    /// problem (weak password, no record, corrupt record) is a `false`.
    pub fn login(&mut self, password: &str) -> bool {
        self.session.logged_in = self.check_password(password);
        self.session.logged_in
    }

    fn check_password(&self, password: &str) -> bool {
        // weak passwords never reach storage
        let verifier = match derive_verifier(password) {
            Ok(v) => hex::encode(v),
            Err(_) => return false,
        };
        let record = match self.storage.read() {
            Ok(Some(record)) => record,
            Ok(None) => {
                log::warn!("Login failed, no wallet stored");
                return false;
            }
            Err(e) => {
                log::warn!("Login failed, cannot read wallet: {}", e);
                return false;
            }
        };
        match stored_verifier(&record) {
            Ok(stored) => bool::from(stored.as_bytes().ct_eq(verifier.as_bytes())),
            Err(_) => false,
        }
    }

    pub fn logout(&mut self) {
        self.session.logged_in = false;
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.logged_in
    }

    pub fn session(&self) -> Session {
        self.session
    }

    /// Encrypt and persist the held keypair. A watch-only or empty identity is
    /// skipped with a warning and nothing is written.
    pub fn store(&self, password: &str) -> Result<(), WalletError> {
        let keypair = match &self.keypair {
            Some(kp) if kp.has_private_key() => kp,
            _ => {
                log::warn!("Store wallet failed, private key is missing");
                return Ok(());
            }
        };
        let record = tws_crypto::encode(keypair, password)?;
        self.storage.write(&record)?;
        log::info!("Stored wallet {}", keypair.address());
        Ok(())
    }

    pub fn keypair(&self) -> Option<&KeyPair> {
        self.keypair.as_ref()
    }

    pub fn has_private_key(&self) -> bool {
        self.keypair.as_ref().is_some_and(KeyPair::has_private_key)
    }

    pub fn address(&self) -> Result<Address, WalletError> {
        self.keypair
            .as_ref()
            .map(KeyPair::address)
            .ok_or(WalletError::NoKeypair)
    }

    /// Sign `transaction` with the held private key.
    pub fn sign(&self, mut transaction: Transaction) -> Result<Transaction, WalletError> {
        let keypair = self.keypair.as_ref().ok_or(WalletError::NoKeypair)?;
        if keypair.is_watch_only() {
            log::warn!("Can't sign, there is no private key");
            return Err(CryptoError::NoPrivateKey.into());
        }
        let signature = keypair.sign_prehash(&transaction.signing_hash())?;
        transaction.add_signature(&signature);
        Ok(transaction)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
