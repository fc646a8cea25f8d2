use crate::commands::common::{read_new_password, read_password, Context};
use crate::{print_error, print_info, print_success, WalletCommands};
use colored::*;
use std::error::Error;
use tws_crypto::private_key_valid;
use tws_wallet::{FileStorage, IdentityStore};

pub async fn handle(action: WalletCommands, ctx: &Context) -> Result<(), Box<dyn Error>> {
    match action {
        WalletCommands::New { force } => create_new_wallet(ctx, force)?,
        WalletCommands::Import { private_key, force } => {
            import_wallet(ctx, &private_key, force)?
        }
        WalletCommands::Address => show_address(ctx),
        WalletCommands::Balance => show_balance(ctx).await?,
        WalletCommands::Login => login(ctx)?,
    }
    Ok(())
}

fn create_new_wallet(ctx: &Context, force: bool) -> Result<(), Box<dyn Error>> {
    if !may_write(ctx, force) {
        return Ok(());
    }
    println!("{}", "Creating new wallet...".yellow());
    println!();

    let password = match read_new_password()? {
        Some(p) => p,
        None => return Ok(()),
    };

    print_info("Generating secp256k1 keypair...");
    let identity = IdentityStore::generate(ctx.storage());
    save(ctx, &identity, &password)
}

fn import_wallet(ctx: &Context, private_key: &str, force: bool) -> Result<(), Box<dyn Error>> {
    if !private_key_valid(private_key) {
        print_error("Private key must be 64 hex characters.");
        return Ok(());
    }
    if !may_write(ctx, force) {
        return Ok(());
    }

    let identity = IdentityStore::from_private_hex(ctx.storage(), private_key)?;
    let password = match read_new_password()? {
        Some(p) => p,
        None => return Ok(()),
    };
    save(ctx, &identity, &password)
}

fn may_write(ctx: &Context, force: bool) -> bool {
    let path = ctx.wallet_path();
    if path.exists() && !force {
        print_error(&format!(
            "Wallet already exists at {} (use --force to replace it)",
            path.display()
        ));
        return false;
    }
    true
}

fn save(
    ctx: &Context,
    identity: &IdentityStore<FileStorage>,
    password: &str,
) -> Result<(), Box<dyn Error>> {
    identity.store(password)?;
    let address = identity.address()?;

    println!();
    print_success("Wallet saved.");
    println!();
    println!("{} {}", "Address:".bold(), address.to_hex().green());
    println!("{} {}", "Location:".bold(), ctx.wallet_path().display());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Keep your password safe! It cannot be recovered."
            .yellow()
            .bold()
    );
    Ok(())
}

fn show_address(ctx: &Context) {
    match IdentityStore::address_from_storage(&ctx.storage()) {
        Some(address) => println!("{} {}", "Address:".bold(), address.green()),
        None => print_info("No wallet found. Create one with: tws-cli wallet new"),
    }
}

async fn show_balance(ctx: &Context) -> Result<(), Box<dyn Error>> {
    let wallet = ctx.watch_only_wallet();
    let balance = wallet.get_balance().await?;
    match wallet.address() {
        Ok(address) => {
            println!("{} {}", "Address:".bold(), address.to_hex());
            println!("{} {}", "Balance:".bold(), balance.to_string().green());
        }
        Err(_) => print_info("No wallet found. Create one with: tws-cli wallet new"),
    }
    Ok(())
}

fn login(ctx: &Context) -> Result<(), Box<dyn Error>> {
    let wallet = ctx.watch_only_wallet();
    let password = read_password("Enter wallet password: ")?;
    if wallet.login(&password) {
        print_success("Password accepted.");
    } else {
        print_error("Login failed.");
    }
    Ok(())
}
