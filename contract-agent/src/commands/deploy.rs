// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::path::PathBuf;

use contract_tools::{
    core::constructor::{resolve, Resolution},
    ops,
    utils::{color::Color, format_gas_bump},
    DeploymentExecutor, DeploymentRecord, DeploymentRequest, Progress, Wallet,
};

use crate::{
    common_args::{AuthArgs, ChainArgs, CompilerArgs, GasArgs, ProviderArgs, StoreArgs},
    error::CliResult,
    utils::{confirm_add_chain, prompt_arguments},
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Compiled artifact, a JSON file of the form `{"abi": [...], "bytecode": "0x..."}`.
    #[arg(long, required_unless_present = "source", conflicts_with = "source")]
    artifact: Option<PathBuf>,
    /// Solidity source to compile and deploy. The source is archived with the record.
    #[arg(long)]
    source: Option<PathBuf>,
    /// The constructor arguments. Prompted for when the constructor takes inputs and none are
    /// given.
    #[arg(
        long,
        num_args(0..),
        value_name = "ARGS",
        allow_hyphen_values = true,
    )]
    constructor_args: Option<Vec<String>>,
    /// Only perform gas estimation.
    #[arg(long)]
    estimate_gas: bool,
    /// Add the target network to the wallet without asking.
    #[arg(short, long)]
    yes: bool,

    #[command(flatten)]
    auth: AuthArgs,
    #[command(flatten)]
    chain: ChainArgs,
    #[command(flatten)]
    compiler: CompilerArgs,
    #[command(flatten)]
    gas: GasArgs,
    #[command(flatten)]
    provider: ProviderArgs,
    #[command(flatten)]
    store: StoreArgs,
}

pub async fn exec(args: Args) -> CliResult {
    let (_, target) = args.chain.target()?;
    let (artifact, source) = match (&args.artifact, &args.source) {
        (Some(path), _) => (ops::load_artifact(path)?, None),
        (None, Some(path)) => {
            let source = ops::read_source(path)?;
            let compiler = args.compiler.compiler()?;
            let artifact = ops::compile_for_deployment(&compiler, &source).await?;
            (artifact, Some(source))
        }
        (None, None) => return Err(eyre::eyre!("pass --artifact or --source").into()),
    };

    let wallet = args.provider.build_wallet(&args.auth, &target)?;
    let wallet = if args.yes {
        wallet.with_add_chain_prompt(|_| true)
    } else {
        wallet.with_add_chain_prompt(confirm_add_chain)
    };
    let requester = wallet.address().await?;

    let mut request = DeploymentRequest {
        artifact,
        target,
        requester,
        constructor_args: args.constructor_args,
        source,
    };
    let executor = DeploymentExecutor::new(args.store.store(), args.gas.config());

    if args.estimate_gas {
        if request.constructor_args.is_none() {
            if let Resolution::ArgumentsRequired(inputs) = resolve(&request.artifact.abi) {
                match prompt_arguments(&inputs)? {
                    Some(values) => request.constructor_args = Some(values),
                    None => return cancelled(),
                }
            }
        }
        let estimate = executor.estimate(&wallet, &request).await?;
        println!(
            "estimated gas: {}",
            format_gas_bump(estimate.limit, estimate.raw, args.gas.config().gas_bump_percent)
        );
        return Ok(());
    }

    let attempt = executor.begin(&wallet, request)?;
    let finished = match attempt.start().await {
        Progress::Finished(finished) => finished,
        Progress::ArgumentsRequired(pending) => match prompt_arguments(pending.inputs())? {
            Some(values) => pending.provide(values).await,
            None => {
                pending.cancel();
                return cancelled();
            }
        },
    };

    match finished.result {
        Ok(record) => {
            print_record(&record);
            Ok(())
        }
        Err(err) => {
            if let Some(address) = err.deployed_address() {
                let msg = format!(
                    "contract {address} is on-chain but was not recorded in {}",
                    executor.store().root().display()
                );
                eprintln!("{}", msg.yellow());
            }
            Err(err.into())
        }
    }
}

fn cancelled() -> CliResult {
    eprintln!("{}", "deployment cancelled".grey());
    Ok(())
}

fn print_record(record: &DeploymentRecord) {
    println!("deployed code at address: {}", record.contract_address.to_string().mint());
    println!("{}", format!("deploy tx hash: {}", record.transaction_hash).grey());
    println!("{}", format!("explorer: {}", record.block_explorer_url).grey());
    if let Some(source) = &record.source_reference {
        println!("{}", format!("source: {source}").grey());
    }
}
