// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use crate::core::{
    artifact::ArtifactError, chain::ChainRegistryError, compiler::CompileError,
    deployment::{DeploymentError, ErrorKind},
    store::StoreError,
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Artifact(#[from] ArtifactError),
    #[error("{0}")]
    ChainRegistry(#[from] ChainRegistryError),
    #[error("{0}")]
    Compile(#[from] CompileError),
    #[error("{0}")]
    Deployment(#[from] DeploymentError),
    #[error("{0}")]
    Store(#[from] StoreError),
}

impl Error {
    /// Classification of errors that end a deployment attempt.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Deployment(err) => Some(err.kind()),
            Self::Compile(_) => Some(ErrorKind::CompilationError),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_deployment_failures() {
        let err: Error = CompileError::ImportsUnsupported.into();
        assert_eq!(err.kind(), Some(ErrorKind::CompilationError));

        let err: Error = DeploymentError::UserRejected.into();
        assert_eq!(err.kind(), Some(ErrorKind::UserRejected));
        assert_eq!(err.to_string(), "request rejected by user");

        let err: Error = StoreError::Unavailable("disk full".to_string()).into();
        assert_eq!(err.kind(), None);
    }
}
