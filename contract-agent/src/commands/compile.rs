// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::path::PathBuf;

use contract_tools::{ops, utils::color::Color};

use crate::{common_args::CompilerArgs, error::CliResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Solidity source file.
    source: PathBuf,
    /// The output file (defaults to stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    compiler: CompilerArgs,
}

pub async fn exec(args: Args) -> CliResult {
    let source = ops::read_source(&args.source)?;
    let artifact = ops::compile(&args.compiler.compiler()?, &source).await?;
    match &args.output {
        Some(path) => {
            ops::write_artifact(path, &artifact)?;
            eprintln!("{}", format!("wrote artifact to {}", path.display()).mint());
        }
        None => println!("{}", serde_json::to_string_pretty(&artifact)?),
    }
    Ok(())
}
