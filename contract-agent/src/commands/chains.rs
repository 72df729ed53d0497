// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use contract_tools::{utils::color::Color, ChainProfile};

use crate::{common_args::RegistryArgs, error::CliResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Print the wallet `addEthereumChain` parameters as JSON.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    registry: RegistryArgs,
}

pub fn exec(args: Args) -> CliResult {
    let registry = args.registry.registry()?;
    if args.json {
        let params: Vec<_> = registry.iter().map(ChainProfile::add_chain_params).collect();
        println!("{}", serde_json::to_string_pretty(&params)?);
        return Ok(());
    }
    for chain in registry.iter() {
        println!(
            "{:>10}  {} ({}) {}",
            chain.chain_id,
            chain.name.mint(),
            chain.currency_symbol,
            chain.rpc_url.grey()
        );
    }
    Ok(())
}
