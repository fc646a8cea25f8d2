// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TWS WALLET - CORE MODULE
//
// Ledger message types shared by the wallet and its transports:
// - Contract payloads (transfer, account-create, witness-create,
//   vote-witness, asset-issue) and their builders
// - Transaction skeleton, canonical signing hash and signature list
// All messages are protobuf-encoded with prost.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub mod contract;
pub mod transaction;

pub use contract::{
    account_create_contract, transfer_contract, vote_witness_contract, witness_create_contract,
    AccountCreateContract, AccountType, AssetIssueContract, Contract, ContractType,
    TransferContract, VoteWitnessContract, WitnessCreateContract,
};
pub use transaction::{Transaction, TransactionRaw};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("Invalid protobuf: {0}")]
    Decode(#[from] prost::DecodeError),
    #[error("Unknown contract type {0}")]
    UnknownContractType(i32),
}
