// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::fmt;

use alloy::primitives::Address;

use super::ErrorKind;

/// Where a deployment attempt currently stands. Doubles as its progress indicator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeploymentState {
    Idle,
    Reconciling,
    ResolvingArguments,
    Estimating,
    Submitting,
    Confirming,
    Persisting,
    Succeeded { contract_address: Address },
    Failed { kind: ErrorKind, detail: String },
}

impl DeploymentState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded { .. } | Self::Failed { .. })
    }

    /// Only an attempt waiting on constructor arguments may be cancelled.
    pub fn is_cancellable(&self) -> bool {
        matches!(self, Self::ResolvingArguments)
    }
}

impl fmt::Display for DeploymentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Reconciling => write!(f, "checking wallet network"),
            Self::ResolvingArguments => write!(f, "resolving constructor arguments"),
            Self::Estimating => write!(f, "estimating gas"),
            Self::Submitting => write!(f, "waiting for wallet to send deploy tx"),
            Self::Confirming => write!(f, "waiting for deploy tx confirmation"),
            Self::Persisting => write!(f, "saving deployment record"),
            Self::Succeeded { contract_address } => {
                write!(f, "deployed code at address: {contract_address}")
            }
            Self::Failed { kind, detail } => write!(f, "failed ({kind}): {detail}"),
        }
    }
}
