// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Tools for compiling, deploying and tracking EVM contracts.
//!
//! The heart of this crate is the deployment orchestrator in [`core::deployment`], which drives
//! a single deployment attempt through network reconciliation, constructor argument resolution,
//! gas estimation, submission, confirmation and persistence.

#[macro_use]
mod macros;

pub mod core;
pub(crate) mod error;
pub mod ops;
pub mod utils;

pub use crate::core::{
    artifact::CompiledArtifact,
    chain::{ChainProfile, ChainRegistry},
    compiler::{Compiler, RemoteCompiler},
    deployment::{
        retry_persistence, Attempt, DeploymentConfig, DeploymentError, DeploymentExecutor,
        DeploymentRequest, DeploymentState, ErrorKind, Finished, PendingArguments, Progress,
    },
    store::{DeploymentRecord, JsonFileStore, MemoryStore, RecordStore},
    wallet::{RpcWallet, Wallet, WalletError},
};
pub use error::{Error, Result};
