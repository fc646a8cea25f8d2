//! Transaction skeleton as returned by the ledger service.
//!
//! The canonical digest is SHA-256 over the protobuf encoding of `raw_data`;
//! signatures are appended to `signature` and never cover each other.

use crate::contract::{Contract, ContractType};
use crate::CoreError;
use prost::Message;
use sha2::{Digest, Sha256};

#[derive(Clone, PartialEq, Message)]
pub struct TransactionRaw {
    #[prost(enumeration = "ContractType", tag = "1")]
    pub contract_type: i32,
    #[prost(bytes = "vec", tag = "2")]
    pub parameter: Vec<u8>,
    #[prost(bytes = "vec", tag = "3")]
    pub ref_block_bytes: Vec<u8>,
    #[prost(bytes = "vec", tag = "4")]
    pub ref_block_hash: Vec<u8>,
    #[prost(int64, tag = "8")]
    pub expiration: i64,
    #[prost(int64, tag = "14")]
    pub timestamp: i64,
}

#[derive(Clone, PartialEq, Message)]
pub struct Transaction {
    #[prost(message, optional, tag = "1")]
    pub raw_data: Option<TransactionRaw>,
    #[prost(bytes = "vec", repeated, tag = "2")]
    pub signature: Vec<Vec<u8>>,
}

impl Transaction {
    /// Unsigned skeleton carrying `contract`. Ledger services normally build
    /// these; the wallet only needs it for local tooling and tests.
    pub fn unsigned(contract: &Contract, timestamp: i64) -> Self {
        Transaction {
            raw_data: Some(TransactionRaw {
                contract_type: contract.contract_type() as i32,
                parameter: contract.encode_payload(),
                timestamp,
                ..Default::default()
            }),
            signature: Vec::new(),
        }
    }

    /// SHA-256 of the encoded raw data.
    pub fn signing_hash(&self) -> [u8; 32] {
        let raw = self.raw_data.clone().unwrap_or_default().encode_to_vec();
        Sha256::digest(&raw).into()
    }

    pub fn is_signed(&self) -> bool {
        !self.signature.is_empty()
    }

    pub fn add_signature(&mut self, signature: &[u8]) {
        self.signature.push(signature.to_vec());
    }

    pub fn contract_type(&self) -> Option<ContractType> {
        let raw = self.raw_data.as_ref()?;
        ContractType::try_from(raw.contract_type).ok()
    }

    /// Decode the embedded payload.
    pub fn contract(&self) -> Result<Contract, CoreError> {
        let raw = self.raw_data.as_ref().cloned().unwrap_or_default();
        let contract_type = ContractType::try_from(raw.contract_type)
            .map_err(|_| CoreError::UnknownContractType(raw.contract_type))?;
        Contract::decode_payload(contract_type, &raw.parameter)
    }

    /// True when every signature verifies against `public_key`.
    pub fn verify_signatures(&self, public_key: &[u8]) -> bool {
        let digest = self.signing_hash();
        self.is_signed()
            && self
                .signature
                .iter()
                .all(|sig| tws_crypto::verify_prehash(public_key, &digest, sig))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.encode_to_vec())
    }

    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let bytes = hex::decode(s)?;
        Ok(Transaction::decode(bytes.as_slice())?)
    }
}
