// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TWS WALLET - IDENTITY & SIGNING
//
// Custodies exactly one keypair and mediates every state-changing action
// through construct (remote) → sign (local) → broadcast (remote).
// The private key never leaves IdentityStore::sign.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub mod config;
pub mod error;
pub mod identity;
pub mod ledger;
pub mod protocol;
pub mod storage;

pub use config::WalletConfig;
pub use error::WalletError;
pub use identity::{IdentityStore, Session};
pub use ledger::{HttpLedgerClient, LedgerService};
pub use protocol::Wallet;
pub use storage::{FileStorage, KeyStorage, MemoryStorage};
