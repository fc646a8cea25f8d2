//! Remote ledger service.
//!
//! The service builds unsigned transactions and accepts signed ones; it never
//! sees key material. `HttpLedgerClient` is the JSON-over-HTTP adapter used by
//! the CLI:
//!
//! | call | request | response |
//! |---|---|---|
//! | balance | `GET /wallet/getbalance/{address}` | `{"balance": i64}` |
//! | construct | `POST /wallet/createtransaction` `{"kind", "contract"}` | `{"transaction": hex \| null}` |
//! | broadcast | `POST /wallet/broadcasttransaction` `{"transaction"}` | `{"result": bool}` |

use crate::WalletError;
use async_trait::async_trait;
use serde_json::{json, Value};
use tws_core::{Contract, Transaction};
use tws_crypto::Address;

#[async_trait]
pub trait LedgerService: Send + Sync {
    async fn get_balance(&self, address: &Address) -> Result<i64, WalletError>;

    /// Build an unsigned transaction for `contract`. `Ok(None)` means the
    /// service declined to build one.
    async fn create_transaction(
        &self,
        contract: &Contract,
    ) -> Result<Option<Transaction>, WalletError>;

    async fn broadcast_transaction(&self, transaction: &Transaction) -> Result<bool, WalletError>;
}

pub struct HttpLedgerClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpLedgerClient {
    pub fn new(base_url: &str) -> Self {
        // One client for every call (connection pool + keep-alive)
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(4)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, WalletError> {
        let resp = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .map_err(remote)?;
        read_json(resp).await
    }
}

#[async_trait]
impl LedgerService for HttpLedgerClient {
    async fn get_balance(&self, address: &Address) -> Result<i64, WalletError> {
        let url = self.url(&format!("/wallet/getbalance/{}", address));
        let resp = self.client.get(&url).send().await.map_err(remote)?;
        parse_balance(&read_json(resp).await?)
    }

    async fn create_transaction(
        &self,
        contract: &Contract,
    ) -> Result<Option<Transaction>, WalletError> {
        let body = json!({
            "kind": contract.contract_type().name(),
            "contract": hex::encode(contract.encode_payload()),
        });
        parse_transaction(&self.post("/wallet/createtransaction", body).await?)
    }

    async fn broadcast_transaction(&self, transaction: &Transaction) -> Result<bool, WalletError> {
        let body = json!({ "transaction": transaction.to_hex() });
        Ok(parse_broadcast(
            &self.post("/wallet/broadcasttransaction", body).await?,
        ))
    }
}

fn remote(e: reqwest::Error) -> WalletError {
    WalletError::RemoteUnavailable(e.to_string())
}

async fn read_json(resp: reqwest::Response) -> Result<Value, WalletError> {
    if !resp.status().is_success() {
        return Err(WalletError::RemoteUnavailable(format!(
            "HTTP {}",
            resp.status()
        )));
    }
    resp.json().await.map_err(remote)
}

fn parse_balance(data: &Value) -> Result<i64, WalletError> {
    // some nodes send the balance as a decimal string
    data["balance"]
        .as_i64()
        .or_else(|| data["balance"].as_str().and_then(|s| s.parse().ok()))
        .ok_or_else(|| WalletError::RemoteUnavailable("response missing 'balance'".to_string()))
}

fn parse_transaction(data: &Value) -> Result<Option<Transaction>, WalletError> {
    match &data["transaction"] {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => Transaction::from_hex(s)
            .map(Some)
            .map_err(|e| WalletError::RemoteUnavailable(format!("bad transaction: {}", e))),
        other => Err(WalletError::RemoteUnavailable(format!(
            "unexpected transaction field: {}",
            other
        ))),
    }
}

fn parse_broadcast(data: &Value) -> bool {
    data["result"].as_bool().unwrap_or(false)
}
