// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{fmt, process::ExitCode};

use contract_tools::{core::store::StoreError, DeploymentError, ErrorKind, WalletError};

/// Exit code of a deployment that put a contract on-chain but did not record it.
const UNRECORDED_DEPLOYMENT: u8 = 3;

pub type CliResult = Result<(), CliError>;

#[derive(Debug)]
pub struct CliError {
    error: eyre::Error,
    exit_code: ExitCode,
}

impl CliError {
    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.error.fmt(f)
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self {
            error: err.into(),
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            error: err.into(),
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl From<eyre::Error> for CliError {
    fn from(error: eyre::Error) -> Self {
        Self {
            error,
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl From<contract_tools::Error> for CliError {
    fn from(err: contract_tools::Error) -> Self {
        match err {
            contract_tools::Error::Deployment(err) => err.into(),
            err => Self {
                error: err.into(),
                exit_code: ExitCode::FAILURE,
            },
        }
    }
}

impl From<DeploymentError> for CliError {
    fn from(err: DeploymentError) -> Self {
        let exit_code = match err.kind() {
            ErrorKind::PersistenceFailed => ExitCode::from(UNRECORDED_DEPLOYMENT),
            _ => ExitCode::FAILURE,
        };
        Self {
            error: err.into(),
            exit_code,
        }
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        Self {
            error: err.into(),
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl From<WalletError> for CliError {
    fn from(err: WalletError) -> Self {
        Self {
            error: err.into(),
            exit_code: ExitCode::FAILURE,
        }
    }
}
