// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::path::Path;

use crate::{core::chain::ChainRegistry, error::Result};

/// Built-in chains, extended by the `[[chain]]` tables of `chains_file` if given.
pub fn load_chains(chains_file: Option<&Path>) -> Result<ChainRegistry> {
    let mut registry = ChainRegistry::with_defaults();
    if let Some(path) = chains_file {
        debug!(@grey, "reading chains from {}", path.display());
        registry.extend_from_file(path)?;
    }
    Ok(registry)
}
