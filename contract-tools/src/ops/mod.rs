// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

pub use artifact::{load_artifact, write_artifact};
pub use chains::load_chains;
pub use compile::{compile, compile_for_deployment, read_source};

mod artifact;
mod chains;
mod compile;
