// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TWS CLI - Command Line Interface for the single-identity wallet
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "tws-cli")]
#[command(about = "TWS CLI - Wallet, Transfers & Witness Management", long_about = None)]
#[command(version)]
struct Cli {
    /// Ledger RPC endpoint (reads TWS_RPC_URL env var, then config.toml,
    /// then defaults to http://127.0.0.1:50051)
    #[arg(short, long, env = "TWS_RPC_URL")]
    rpc: Option<String>,

    /// Config directory (default: ~/.tws)
    #[arg(short, long)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Wallet management
    Wallet {
        #[command(subcommand)]
        action: WalletCommands,
    },

    /// Transaction operations
    Tx {
        #[command(subcommand)]
        action: TxCommands,
    },

    /// Account registration
    Account {
        #[command(subcommand)]
        action: AccountCommands,
    },

    /// Witness operations
    Witness {
        #[command(subcommand)]
        action: WitnessCommands,
    },

    /// Asset issuance
    Asset {
        #[command(subcommand)]
        action: AssetCommands,
    },
}

#[derive(Subcommand)]
enum WalletCommands {
    /// Create a new wallet with a random key
    New {
        /// Overwrite an existing wallet file
        #[arg(long)]
        force: bool,
    },

    /// Import a hex-encoded private key
    Import {
        /// 64 hex characters
        #[arg(long)]
        private_key: String,

        /// Overwrite an existing wallet file
        #[arg(long)]
        force: bool,
    },

    /// Show the stored wallet address
    Address,

    /// Show wallet balance
    Balance,

    /// Check the wallet password
    Login,
}

#[derive(Subcommand)]
enum TxCommands {
    /// Send coins to an address
    Send {
        /// Recipient address (40 hex characters)
        #[arg(short, long)]
        to: String,

        /// Amount in base units
        #[arg(short, long)]
        amount: i64,
    },
}

#[derive(Subcommand)]
enum AccountCommands {
    /// Register an account on the ledger
    Create {
        /// Account name
        #[arg(short, long)]
        name: String,

        /// normal | asset-issue | contract
        #[arg(long, default_value = "normal")]
        account_type: String,

        /// Account address (default: this wallet's address)
        #[arg(long)]
        address: Option<String>,
    },
}

#[derive(Subcommand)]
enum WitnessCommands {
    /// Apply to become a witness
    Create {
        /// Witness URL
        #[arg(short, long)]
        url: String,
    },

    /// Vote for a witness
    Vote {
        /// Witness address
        #[arg(short, long)]
        address: String,

        /// Number of votes
        #[arg(short, long)]
        count: i32,
    },
}

#[derive(Subcommand)]
enum AssetCommands {
    /// Issue a new asset
    Issue {
        /// Asset name
        #[arg(long)]
        name: String,

        /// Total supply
        #[arg(long)]
        total_supply: i64,

        /// Base coins per `num` asset units
        #[arg(long)]
        trx_num: i32,

        /// Asset units per `trx_num` base coins
        #[arg(long)]
        num: i32,

        /// Sale start (unix millis)
        #[arg(long)]
        start_time: i64,

        /// Sale end (unix millis)
        #[arg(long)]
        end_time: i64,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, default_value = "")]
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    print_banner();

    let config_dir = cli.config_dir.unwrap_or_else(|| {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".tws")
    });
    std::fs::create_dir_all(&config_dir)?;

    let ctx = commands::common::Context::load(config_dir, cli.rpc.as_deref())?;

    match cli.command {
        Commands::Wallet { action } => commands::wallet::handle(action, &ctx).await?,
        Commands::Tx { action } => commands::tx::handle(action, &ctx).await?,
        Commands::Account { action } => commands::account::handle(action, &ctx).await?,
        Commands::Witness { action } => commands::witness::handle(action, &ctx).await?,
        Commands::Asset { action } => commands::asset::handle(action, &ctx).await?,
    }

    Ok(())
}

fn print_banner() {
    println!(
        "{}",
        "╔═══════════════════════════════════════════════╗".cyan()
    );
    println!(
        "{}",
        "║            TWS WALLET - CLI v0.1.0            ║"
            .cyan()
            .bold()
    );
    println!(
        "{}",
        "╚═══════════════════════════════════════════════╝".cyan()
    );
    println!();
}

fn print_success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}

fn print_info(msg: &str) {
    println!("{} {}", "ℹ".blue().bold(), msg);
}

// ─────────────────────────────────────────────────────────────────
// UNIT TESTS
// ─────────────────────────────────────────────────────────────────
