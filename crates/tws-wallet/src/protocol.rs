// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// SIGNING PROTOCOL
//
// Every action runs the same three steps, aborting at the first failure:
//   1. construct: ledger builds an unsigned transaction for the payload
//   2. sign: IdentityStore signs it locally
//   3. broadcast: ledger submits the signed transaction
// Nothing is broadcast unless step 2 produced a signature.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use crate::identity::IdentityStore;
use crate::ledger::LedgerService;
use crate::storage::KeyStorage;
use crate::WalletError;
use std::sync::{Mutex, MutexGuard};
use tws_core::{
    account_create_contract, transfer_contract, vote_witness_contract, witness_create_contract,
    AccountType, AssetIssueContract, Contract,
};
use tws_crypto::Address;

/// One identity plus the ledger it talks to.
///
/// The identity lock is only taken around synchronous identity operations and
/// is never held across a ledger call.
pub struct Wallet<L, S> {
    identity: Mutex<IdentityStore<S>>,
    ledger: L,
}

impl<L: LedgerService, S: KeyStorage> Wallet<L, S> {
    pub fn new(identity: IdentityStore<S>, ledger: L) -> Self {
        Self {
            identity: Mutex::new(identity),
            ledger,
        }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    fn identity(&self) -> MutexGuard<'_, IdentityStore<S>> {
        self.identity.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Run `f` with exclusive access to the identity.
    pub fn with_identity<R>(&self, f: impl FnOnce(&mut IdentityStore<S>) -> R) -> R {
        f(&mut self.identity())
    }

    pub fn login(&self, password: &str) -> bool {
        self.identity().login(password)
    }

    pub fn logout(&self) {
        self.identity().logout()
    }

    pub fn is_logged_in(&self) -> bool {
        self.identity().is_logged_in()
    }

    pub fn store(&self, password: &str) -> Result<(), WalletError> {
        self.identity().store(password)
    }

    pub fn address(&self) -> Result<Address, WalletError> {
        self.identity().address()
    }

    /// Balance of this wallet's address. With no keypair in memory the public
    /// key is read from storage first; if there is none the balance is 0.
    pub async fn get_balance(&self) -> Result<i64, WalletError> {
        let address = {
            let mut identity = self.identity();
            if identity.keypair().is_none() && identity.load_public_key().is_err() {
                log::warn!("GetBalance failed, no wallet address");
                return Ok(0);
            }
            identity.address()?
        };
        self.ledger.get_balance(&address).await
    }

    pub async fn transfer(&self, to: &Address, amount: i64) -> Result<bool, WalletError> {
        let owner = self.address()?;
        self.process(transfer_contract(&owner, to, amount).into())
            .await
    }

    pub async fn create_account(
        &self,
        account_type: AccountType,
        account_name: &[u8],
        address: &Address,
    ) -> Result<bool, WalletError> {
        self.process(account_create_contract(account_type, account_name, address).into())
            .await
    }

    pub async fn create_witness(&self, url: &[u8]) -> Result<bool, WalletError> {
        let owner = self.address()?;
        self.process(witness_create_contract(&owner, url).into())
            .await
    }

    pub async fn vote_witness(&self, witness: &Address, count: i32) -> Result<bool, WalletError> {
        let owner = self.address()?;
        self.process(vote_witness_contract(&owner, witness, count).into())
            .await
    }

    /// Asset-issue payloads are built by the caller.
    pub async fn create_asset_issue(
        &self,
        contract: AssetIssueContract,
    ) -> Result<bool, WalletError> {
        self.process(contract.into()).await
    }

    async fn process(&self, contract: Contract) -> Result<bool, WalletError> {
        let kind = contract.contract_type().name();

        log::debug!("Constructing {}", kind);
        let unsigned = self
            .ledger
            .create_transaction(&contract)
            .await?
            .ok_or_else(|| {
                log::warn!("Ledger returned no transaction for {}", kind);
                WalletError::RemoteUnavailable(format!("no transaction built for {}", kind))
            })?;

        log::debug!("Signing {}", kind);
        let signed = self.identity().sign(unsigned)?;

        log::debug!("Broadcasting {}", kind);
        let accepted = self.ledger.broadcast_transaction(&signed).await?;
        if accepted {
            log::info!("{} broadcast accepted", kind);
        } else {
            log::warn!("{} broadcast rejected", kind);
        }
        Ok(accepted)
    }
}
