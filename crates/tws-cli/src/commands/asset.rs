use crate::commands::common::{report, Context};
use crate::{print_error, AssetCommands};
use std::error::Error;
use tws_core::AssetIssueContract;

pub async fn handle(action: AssetCommands, ctx: &Context) -> Result<(), Box<dyn Error>> {
    match action {
        AssetCommands::Issue {
            name,
            total_supply,
            trx_num,
            num,
            start_time,
            end_time,
            description,
            url,
        } => {
            if total_supply <= 0 || trx_num <= 0 || num <= 0 {
                print_error("Supply and exchange rate must be positive.");
                return Ok(());
            }
            if end_time <= start_time {
                print_error("End time must be after start time.");
                return Ok(());
            }

            let wallet = ctx.signing_wallet()?;
            let contract = AssetIssueContract {
                owner_address: wallet.address()?.as_ref().to_vec(),
                name: name.into_bytes(),
                total_supply,
                trx_num,
                num,
                start_time,
                end_time,
                description: description.into_bytes(),
                url: url.into_bytes(),
                ..Default::default()
            };
            report("Asset issue", wallet.create_asset_issue(contract).await)?
        }
    }
    Ok(())
}
