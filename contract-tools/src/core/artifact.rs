// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{fs, path::Path};

use alloy::{
    json_abi::{Constructor, JsonAbi},
    primitives::Bytes,
};
use serde::{Deserialize, Serialize};

use crate::utils::decode0x;

/// Output of a successful compilation: the ABI and creation bytecode of one contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawArtifact")]
pub struct CompiledArtifact {
    pub abi: JsonAbi,
    pub bytecode: Bytes,
}

#[derive(Deserialize)]
struct RawArtifact {
    abi: JsonAbi,
    bytecode: String,
}

impl TryFrom<RawArtifact> for CompiledArtifact {
    type Error = ArtifactError;

    fn try_from(raw: RawArtifact) -> Result<Self, Self::Error> {
        Self::from_hex(raw.abi, &raw.bytecode)
    }
}

impl CompiledArtifact {
    pub fn new(abi: JsonAbi, bytecode: impl Into<Bytes>) -> Self {
        Self {
            abi,
            bytecode: bytecode.into(),
        }
    }

    /// Builds an artifact from hex bytecode, with or without a `0x` prefix.
    pub fn from_hex(abi: JsonAbi, bytecode: &str) -> Result<Self, ArtifactError> {
        let bytecode = decode0x(bytecode)?;
        Ok(Self::new(abi, bytecode))
    }

    /// Reads an artifact from a JSON file of the form `{"abi": [...], "bytecode": "0x..."}`.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Only artifacts with bytecode can be deployed.
    pub fn is_deployable(&self) -> bool {
        !self.bytecode.is_empty()
    }

    pub fn constructor(&self) -> Option<&Constructor> {
        self.abi.constructor.as_ref()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid bytecode: {0}")]
    Hex(#[from] hex::FromHexError),
}
