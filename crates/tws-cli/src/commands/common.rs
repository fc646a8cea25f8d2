use crate::{print_error, print_success};
use std::error::Error;
use std::path::PathBuf;
use tws_wallet::{FileStorage, HttpLedgerClient, IdentityStore, Wallet, WalletConfig, WalletError};

pub const CONFIG_FILE: &str = "config.toml";

pub type CliWallet = Wallet<HttpLedgerClient, FileStorage>;

/// Resolved settings shared by every command.
pub struct Context {
    pub config: WalletConfig,
    pub config_dir: PathBuf,
}

impl Context {
    /// `config.toml` in the config directory replaces the TWS_* environment
    /// defaults; `--rpc` (or TWS_RPC_URL) overrides the ledger URL of either.
    pub fn load(config_dir: PathBuf, rpc: Option<&str>) -> Result<Self, Box<dyn Error>> {
        let file = config_dir.join(CONFIG_FILE);
        let mut config = if file.exists() {
            log::debug!("Loading config from {}", file.display());
            WalletConfig::load_from_file(&file)?
        } else {
            WalletConfig::load_from_env()
        };
        if let Some(rpc) = rpc {
            config.rpc_url = rpc.to_string();
        }
        config.validate()?;
        Ok(Self { config, config_dir })
    }

    pub fn wallet_path(&self) -> PathBuf {
        self.config.wallet_path(&self.config_dir)
    }

    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.wallet_path())
    }

    pub fn ledger(&self) -> HttpLedgerClient {
        HttpLedgerClient::new(&self.config.rpc_url)
    }

    /// Wallet without a decrypted key; enough for balance and login.
    pub fn watch_only_wallet(&self) -> CliWallet {
        Wallet::new(IdentityStore::empty(self.storage()), self.ledger())
    }

    /// Prompts for the password and decrypts the stored key.
    pub fn signing_wallet(&self) -> Result<CliWallet, Box<dyn Error>> {
        let path = self.wallet_path();
        if !path.exists() {
            return Err(format!(
                "No wallet at {}. Create one with: tws-cli wallet new",
                path.display()
            )
            .into());
        }
        let password = read_password("Enter wallet password: ")?;
        let identity = IdentityStore::load_full(self.storage(), &password)
            .map_err(|e| format!("Cannot unlock wallet: {}", e))?;
        Ok(Wallet::new(identity, self.ledger()))
    }
}

/// Password from TWS_WALLET_PASSWORD (for scripting) or an interactive prompt.
pub fn read_password(prompt: &str) -> Result<String, Box<dyn Error>> {
    match std::env::var("TWS_WALLET_PASSWORD") {
        Ok(p) if !p.is_empty() => Ok(p),
        _ => Ok(rpassword::prompt_password(prompt)?),
    }
}

/// Like `read_password`, but an interactive prompt asks twice.
/// `None` when the two entries differ.
pub fn read_new_password() -> Result<Option<String>, Box<dyn Error>> {
    if let Ok(p) = std::env::var("TWS_WALLET_PASSWORD") {
        if !p.is_empty() {
            return Ok(Some(p));
        }
    }
    let pw = rpassword::prompt_password("Enter password for encryption: ")?;
    let pw_confirm = rpassword::prompt_password("Confirm password: ")?;
    if pw != pw_confirm {
        print_error("Passwords do not match!");
        return Ok(None);
    }
    Ok(Some(pw))
}

/// Print the outcome of a construct → sign → broadcast run.
pub fn report(action: &str, result: Result<bool, WalletError>) -> Result<(), Box<dyn Error>> {
    match result {
        Ok(true) => print_success(&format!("{} accepted by the ledger", action)),
        Ok(false) => print_error(&format!("{} rejected by the ledger", action)),
        Err(e) if e.is_no_private_key() => {
            print_error(&format!("{} needs a private key; wallet is watch-only", action))
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
