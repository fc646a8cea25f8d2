use crate::commands::common::{report, Context};
use crate::{print_error, AccountCommands};
use std::error::Error;
use tws_core::AccountType;
use tws_crypto::Address;

pub async fn handle(action: AccountCommands, ctx: &Context) -> Result<(), Box<dyn Error>> {
    match action {
        AccountCommands::Create {
            name,
            account_type,
            address,
        } => create(ctx, &name, &account_type, address.as_deref()).await?,
    }
    Ok(())
}

async fn create(
    ctx: &Context,
    name: &str,
    account_type: &str,
    address: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let account_type: AccountType = match account_type.parse() {
        Ok(t) => t,
        Err(e) => {
            print_error(&e);
            return Ok(());
        }
    };

    let wallet = ctx.signing_wallet()?;
    let address: Address = match address {
        Some(a) => match a.parse() {
            Ok(a) => a,
            Err(_) => {
                print_error("Invalid account address. Must be 40 hex characters.");
                return Ok(());
            }
        },
        None => wallet.address()?,
    };

    report(
        "Account creation",
        wallet
            .create_account(account_type, name.as_bytes(), &address)
            .await,
    )
}
