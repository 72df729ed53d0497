// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{fs, path::Path};

use crate::{core::artifact::CompiledArtifact, error::Result};

pub fn load_artifact(path: impl AsRef<Path>) -> Result<CompiledArtifact> {
    let path = path.as_ref();
    debug!(@grey, "reading artifact {}", path.display());
    Ok(CompiledArtifact::read(path)?)
}

/// Writes `artifact` as pretty JSON that [`load_artifact`] reads back.
pub fn write_artifact(path: impl AsRef<Path>, artifact: &CompiledArtifact) -> Result<()> {
    let json = serde_json::to_string_pretty(artifact)?;
    fs::write(path, json)?;
    Ok(())
}
