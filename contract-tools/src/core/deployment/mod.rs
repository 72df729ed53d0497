// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Deployment orchestration.
//!
//! A [`DeploymentExecutor`] hands out one [`Attempt`] per deployment request. The attempt is a
//! single-shot state machine:
//!
//! ```text
//! Idle -> Reconciling -> ResolvingArguments -> Estimating -> Submitting -> Confirming
//!      -> Persisting -> Succeeded
//! ```
//!
//! with `Failed` reachable from every non-terminal state. `ResolvingArguments` may suspend while
//! the caller supplies constructor arguments, and is the only point where an attempt can be
//! cancelled. Nothing is retried automatically.

use std::fmt;

use alloy::primitives::{Address, TxHash};
use typed_builder::TypedBuilder;

use crate::{
    core::{
        artifact::CompiledArtifact,
        chain::ChainProfile,
        compiler::CompileError,
        constructor::ArgumentError,
        store::{DeploymentRecord, RecordStore},
    },
    utils::color::DebugColor,
};

pub use executor::{Attempt, DeploymentExecutor, Finished, PendingArguments, Progress};
pub use gas::{GasEstimate, GasEstimator};
pub use session::{SessionGuard, SessionLocks};
pub use state::DeploymentState;

mod executor;
mod gas;
mod session;
mod state;

/// Default percentage a raw gas estimate is bumped by (1.2x).
pub const DEFAULT_GAS_BUMP_PERCENT: u64 = 20;

#[derive(Clone, Debug)]
pub struct DeploymentConfig {
    pub gas_bump_percent: u64,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            gas_bump_percent: DEFAULT_GAS_BUMP_PERCENT,
        }
    }
}

/// One deployment attempt's inputs. Not reused across attempts.
#[derive(Clone, Debug, TypedBuilder)]
pub struct DeploymentRequest {
    pub artifact: CompiledArtifact,
    pub target: ChainProfile,
    /// Account that deploys and owns the resulting record.
    pub requester: Address,
    /// Constructor arguments, if already known. When absent and the constructor takes inputs,
    /// the attempt suspends until they are provided.
    #[builder(default, setter(strip_option))]
    pub constructor_args: Option<Vec<String>>,
    /// Contract source to archive alongside the record.
    #[builder(default, setter(strip_option, into))]
    pub source: Option<String>,
}

/// Classification of every way a deployment can fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NothingToDeploy,
    WalletUnavailable,
    UserRejected,
    NetworkMismatch,
    ChainAddFailed,
    CompilationError,
    InvalidArgument,
    EstimationFailed,
    InsufficientFunds,
    TransactionReverted,
    PersistenceFailed,
    AttemptInProgress,
    Unknown,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error("nothing to deploy: the contract has no bytecode")]
    NothingToDeploy,
    #[error("wallet unavailable: {0}")]
    WalletUnavailable(String),
    #[error("request rejected by user")]
    UserRejected,
    #[error("wallet is on chain {actual}, expected chain {expected}")]
    NetworkMismatch { expected: u64, actual: u64 },
    #[error("failed to add chain: {0}")]
    ChainAddFailed(String),
    #[error("{0}")]
    CompilationError(String),
    #[error("invalid constructor argument {index}: {reason}")]
    InvalidArgument { index: usize, reason: String },
    #[error("deployment failed during gas estimation: {0}")]
    EstimationFailed(String),
    #[error("not enough funds to deploy: {0}")]
    InsufficientFunds(String),
    #[error("deploy tx reverted {}", .tx_hash.debug_red())]
    TransactionReverted { tx_hash: TxHash },
    #[error("contract deployed at {contract_address} but its record was not saved: {detail}")]
    PersistenceFailed {
        contract_address: Address,
        owner: Address,
        record: Box<DeploymentRecord>,
        detail: String,
    },
    #[error("a deployment is already in progress for {0}")]
    AttemptInProgress(Address),
    #[error("{0}")]
    Unknown(String),
}

impl DeploymentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NothingToDeploy => ErrorKind::NothingToDeploy,
            Self::WalletUnavailable(_) => ErrorKind::WalletUnavailable,
            Self::UserRejected => ErrorKind::UserRejected,
            Self::NetworkMismatch { .. } => ErrorKind::NetworkMismatch,
            Self::ChainAddFailed(_) => ErrorKind::ChainAddFailed,
            Self::CompilationError(_) => ErrorKind::CompilationError,
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::EstimationFailed(_) => ErrorKind::EstimationFailed,
            Self::InsufficientFunds(_) => ErrorKind::InsufficientFunds,
            Self::TransactionReverted { .. } => ErrorKind::TransactionReverted,
            Self::PersistenceFailed { .. } => ErrorKind::PersistenceFailed,
            Self::AttemptInProgress(_) => ErrorKind::AttemptInProgress,
            Self::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// Address of a contract that exists on-chain despite the failure.
    pub fn deployed_address(&self) -> Option<Address> {
        match self {
            Self::PersistenceFailed {
                contract_address, ..
            } => Some(*contract_address),
            _ => None,
        }
    }
}

impl From<CompileError> for DeploymentError {
    fn from(err: CompileError) -> Self {
        Self::CompilationError(err.to_string())
    }
}

impl From<ArgumentError> for DeploymentError {
    fn from(err: ArgumentError) -> Self {
        Self::InvalidArgument {
            index: err.index,
            reason: err.reason,
        }
    }
}

/// Saves the record carried by a [`DeploymentError::PersistenceFailed`] without redeploying.
///
/// Any other error is handed back untouched.
pub async fn retry_persistence(
    store: &impl RecordStore,
    err: DeploymentError,
) -> Result<DeploymentRecord, DeploymentError> {
    let DeploymentError::PersistenceFailed {
        contract_address,
        owner,
        record,
        ..
    } = err
    else {
        return Err(err);
    };
    match store.save(&record, owner).await {
        Ok(()) => {
            info!(@grey, "saved record for {}", contract_address.debug_lavender());
            Ok(*record)
        }
        Err(store_err) => Err(DeploymentError::PersistenceFailed {
            contract_address,
            owner,
            record,
            detail: store_err.to_string(),
        }),
    }
}
