use crate::commands::common::{report, Context};
use crate::{print_error, print_info, TxCommands};
use std::error::Error;
use tws_crypto::Address;

pub async fn handle(action: TxCommands, ctx: &Context) -> Result<(), Box<dyn Error>> {
    match action {
        TxCommands::Send { to, amount } => send(ctx, &to, amount).await?,
    }
    Ok(())
}

async fn send(ctx: &Context, to: &str, amount: i64) -> Result<(), Box<dyn Error>> {
    let to: Address = match to.parse() {
        Ok(a) => a,
        Err(_) => {
            print_error("Invalid recipient address. Must be 40 hex characters.");
            return Ok(());
        }
    };
    if amount <= 0 {
        print_error("Amount must be positive.");
        return Ok(());
    }

    let wallet = ctx.signing_wallet()?;
    print_info(&format!("Sending {} to {}...", amount, to));
    report("Transfer", wallet.transfer(&to, amount).await)
}
