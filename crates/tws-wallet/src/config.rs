use crate::WalletError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:50051";
pub const DEFAULT_WALLET_FILE: &str = "Wallet";

/// Where the wallet keeps its record and which ledger node it talks to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConfig {
    pub rpc_url: String,
    pub wallet_file: PathBuf,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            wallet_file: PathBuf::from(DEFAULT_WALLET_FILE),
        }
    }
}

impl WalletConfig {
    /// Load from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, WalletError> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| WalletError::Config(e.to_string()))
    }

    /// Defaults overridden by `TWS_RPC_URL` / `TWS_WALLET_FILE`
    pub fn load_from_env() -> Self {
        let defaults = Self::default();
        Self {
            rpc_url: std::env::var("TWS_RPC_URL").unwrap_or(defaults.rpc_url),
            wallet_file: std::env::var("TWS_WALLET_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.wallet_file),
        }
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), WalletError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| WalletError::Config(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Resolve a relative wallet file against `base_dir`.
    pub fn wallet_path(&self, base_dir: &Path) -> PathBuf {
        if self.wallet_file.is_absolute() {
            self.wallet_file.clone()
        } else {
            base_dir.join(&self.wallet_file)
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.rpc_url.is_empty() {
            return Err("rpc_url cannot be empty".to_string());
        }
        if !self.rpc_url.starts_with("http://") && !self.rpc_url.starts_with("https://") {
            return Err(format!("rpc_url must be http(s): {}", self.rpc_url));
        }
        if self.wallet_file.as_os_str().is_empty() {
            return Err("wallet_file cannot be empty".to_string());
        }
        Ok(())
    }
}
