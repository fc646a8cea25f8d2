use crate::commands::common::{report, Context};
use crate::{print_error, WitnessCommands};
use std::error::Error;
use tws_crypto::Address;

pub async fn handle(action: WitnessCommands, ctx: &Context) -> Result<(), Box<dyn Error>> {
    match action {
        WitnessCommands::Create { url } => {
            let wallet = ctx.signing_wallet()?;
            report(
                "Witness application",
                wallet.create_witness(url.as_bytes()).await,
            )?
        }
        WitnessCommands::Vote { address, count } => {
            let witness: Address = match address.parse() {
                Ok(a) => a,
                Err(_) => {
                    print_error("Invalid witness address. Must be 40 hex characters.");
                    return Ok(());
                }
            };
            if count <= 0 {
                print_error("Vote count must be positive.");
                return Ok(());
            }
            let wallet = ctx.signing_wallet()?;
            report("Vote", wallet.vote_witness(&witness, count).await)?
        }
    }
    Ok(())
}
