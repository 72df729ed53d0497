// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use crate::error::CliResult;

mod chains;
mod compile;
mod deploy;
mod records;

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// List the chains contracts can be deployed to
    Chains(chains::Args),
    /// Compile a Solidity contract with the compiler service
    #[clap(visible_alias = "c")]
    Compile(compile::Args),
    /// Deploy a contract and record the deployment
    #[clap(visible_alias = "d")]
    Deploy(deploy::Args),
    /// List recorded deployments
    #[clap(visible_alias = "r")]
    Records(records::Args),
}

pub async fn exec(cmd: Command) -> CliResult {
    match cmd {
        Command::Chains(args) => chains::exec(args),
        Command::Compile(args) => compile::exec(args).await,
        Command::Deploy(args) => deploy::exec(args).await,
        Command::Records(args) => records::exec(args).await,
    }
}
