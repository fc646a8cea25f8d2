//! Contract payloads and their builders.
//!
//! Builders are total: they copy caller-validated fields into a message and
//! never fail. Asset-issue payloads are assembled by the caller directly.

use crate::CoreError;
use prost::Message;
use std::str::FromStr;
use tws_crypto::Address;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum AccountType {
    Normal = 0,
    AssetIssue = 1,
    Contract = 2,
}

impl FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(AccountType::Normal),
            "assetissue" | "asset-issue" => Ok(AccountType::AssetIssue),
            "contract" => Ok(AccountType::Contract),
            other => Err(format!("unknown account type '{}'", other)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum ContractType {
    AccountCreateContract = 0,
    TransferContract = 1,
    VoteWitnessContract = 4,
    WitnessCreateContract = 5,
    AssetIssueContract = 6,
}

impl ContractType {
    pub fn name(&self) -> &'static str {
        match self {
            ContractType::AccountCreateContract => "AccountCreateContract",
            ContractType::TransferContract => "TransferContract",
            ContractType::VoteWitnessContract => "VoteWitnessContract",
            ContractType::WitnessCreateContract => "WitnessCreateContract",
            ContractType::AssetIssueContract => "AssetIssueContract",
        }
    }
}

#[derive(Clone, PartialEq, Message)]
pub struct TransferContract {
    #[prost(bytes = "vec", tag = "1")]
    pub owner_address: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub to_address: Vec<u8>,
    #[prost(int64, tag = "3")]
    pub amount: i64,
}

#[derive(Clone, PartialEq, Message)]
pub struct AccountCreateContract {
    #[prost(enumeration = "AccountType", tag = "1")]
    pub r#type: i32,
    #[prost(bytes = "vec", tag = "2")]
    pub account_name: Vec<u8>,
    #[prost(bytes = "vec", tag = "3")]
    pub owner_address: Vec<u8>,
}

#[derive(Clone, PartialEq, Message)]
pub struct WitnessCreateContract {
    #[prost(bytes = "vec", tag = "1")]
    pub owner_address: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub url: Vec<u8>,
}

#[derive(Clone, PartialEq, Message)]
pub struct VoteWitnessContract {
    #[prost(bytes = "vec", tag = "1")]
    pub owner_address: Vec<u8>,
    #[prost(bytes = "vec", repeated, tag = "2")]
    pub vote_address: Vec<Vec<u8>>,
    #[prost(int32, tag = "3")]
    pub count: i32,
}

#[derive(Clone, PartialEq, Message)]
pub struct AssetIssueContract {
    #[prost(bytes = "vec", tag = "1")]
    pub owner_address: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub name: Vec<u8>,
    #[prost(int64, tag = "4")]
    pub total_supply: i64,
    #[prost(int32, tag = "6")]
    pub trx_num: i32,
    #[prost(int32, tag = "8")]
    pub num: i32,
    #[prost(int64, tag = "9")]
    pub start_time: i64,
    #[prost(int64, tag = "10")]
    pub end_time: i64,
    #[prost(int32, tag = "15")]
    pub decay_ratio: i32,
    #[prost(int32, tag = "16")]
    pub vote_score: i32,
    #[prost(bytes = "vec", tag = "20")]
    pub description: Vec<u8>,
    #[prost(bytes = "vec", tag = "21")]
    pub url: Vec<u8>,
}

/// A payload tagged with the kind of transaction it requests.
#[derive(Clone, Debug, PartialEq)]
pub enum Contract {
    Transfer(TransferContract),
    AccountCreate(AccountCreateContract),
    WitnessCreate(WitnessCreateContract),
    VoteWitness(VoteWitnessContract),
    AssetIssue(AssetIssueContract),
}

impl Contract {
    pub fn contract_type(&self) -> ContractType {
        match self {
            Contract::Transfer(_) => ContractType::TransferContract,
            Contract::AccountCreate(_) => ContractType::AccountCreateContract,
            Contract::WitnessCreate(_) => ContractType::WitnessCreateContract,
            Contract::VoteWitness(_) => ContractType::VoteWitnessContract,
            Contract::AssetIssue(_) => ContractType::AssetIssueContract,
        }
    }

    pub fn owner_address(&self) -> &[u8] {
        match self {
            Contract::Transfer(c) => &c.owner_address,
            Contract::AccountCreate(c) => &c.owner_address,
            Contract::WitnessCreate(c) => &c.owner_address,
            Contract::VoteWitness(c) => &c.owner_address,
            Contract::AssetIssue(c) => &c.owner_address,
        }
    }

    /// Protobuf bytes of the inner payload.
    pub fn encode_payload(&self) -> Vec<u8> {
        match self {
            Contract::Transfer(c) => c.encode_to_vec(),
            Contract::AccountCreate(c) => c.encode_to_vec(),
            Contract::WitnessCreate(c) => c.encode_to_vec(),
            Contract::VoteWitness(c) => c.encode_to_vec(),
            Contract::AssetIssue(c) => c.encode_to_vec(),
        }
    }

    pub fn decode_payload(contract_type: ContractType, bytes: &[u8]) -> Result<Self, CoreError> {
        Ok(match contract_type {
            ContractType::TransferContract => Contract::Transfer(TransferContract::decode(bytes)?),
            ContractType::AccountCreateContract => {
                Contract::AccountCreate(AccountCreateContract::decode(bytes)?)
            }
            ContractType::WitnessCreateContract => {
                Contract::WitnessCreate(WitnessCreateContract::decode(bytes)?)
            }
            ContractType::VoteWitnessContract => {
                Contract::VoteWitness(VoteWitnessContract::decode(bytes)?)
            }
            ContractType::AssetIssueContract => {
                Contract::AssetIssue(AssetIssueContract::decode(bytes)?)
            }
        })
    }
}

impl From<TransferContract> for Contract {
    fn from(c: TransferContract) -> Self {
        Contract::Transfer(c)
    }
}

impl From<AccountCreateContract> for Contract {
    fn from(c: AccountCreateContract) -> Self {
        Contract::AccountCreate(c)
    }
}

impl From<WitnessCreateContract> for Contract {
    fn from(c: WitnessCreateContract) -> Self {
        Contract::WitnessCreate(c)
    }
}

impl From<VoteWitnessContract> for Contract {
    fn from(c: VoteWitnessContract) -> Self {
        Contract::VoteWitness(c)
    }
}

impl From<AssetIssueContract> for Contract {
    fn from(c: AssetIssueContract) -> Self {
        Contract::AssetIssue(c)
    }
}

pub fn transfer_contract(owner: &Address, to: &Address, amount: i64) -> TransferContract {
    TransferContract {
        owner_address: owner.as_ref().to_vec(),
        to_address: to.as_ref().to_vec(),
        amount,
    }
}

pub fn account_create_contract(
    account_type: AccountType,
    account_name: &[u8],
    owner: &Address,
) -> AccountCreateContract {
    AccountCreateContract {
        r#type: account_type as i32,
        account_name: account_name.to_vec(),
        owner_address: owner.as_ref().to_vec(),
    }
}

pub fn witness_create_contract(owner: &Address, url: &[u8]) -> WitnessCreateContract {
    WitnessCreateContract {
        owner_address: owner.as_ref().to_vec(),
        url: url.to_vec(),
    }
}

/// A single-candidate vote; `vote_address` holds exactly one entry.
pub fn vote_witness_contract(
    owner: &Address,
    vote_address: &Address,
    count: i32,
) -> VoteWitnessContract {
    VoteWitnessContract {
        owner_address: owner.as_ref().to_vec(),
        vote_address: vec![vote_address.as_ref().to_vec()],
        count,
    }
}
