// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::primitives::Address;
use contract_tools::{utils::color::Color, RecordStore};

use crate::{common_args::StoreArgs, error::CliResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Account whose deployments to list.
    #[arg(long)]
    owner: Address,
    /// Print the records as JSON.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    store: StoreArgs,
}

pub async fn exec(args: Args) -> CliResult {
    let records = args.store.store().list_for(args.owner).await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }
    if records.is_empty() {
        println!("{}", format!("no deployments recorded for {}", args.owner).grey());
        return Ok(());
    }
    for record in &records {
        println!(
            "{:>10}  {}  {}  {}",
            record.chain_id,
            record.contract_address.to_string().mint(),
            record.deployment_timestamp.to_rfc3339(),
            record.block_explorer_url.grey()
        );
    }
    Ok(())
}
