// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use super::{DeploymentError, DEFAULT_GAS_BUMP_PERCENT};
use crate::{
    core::wallet::{DeploymentTx, Wallet},
    utils::{bump_gas, format_gas_bump},
};

/// Raw and buffered gas for a deployment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GasEstimate {
    pub raw: u64,
    pub limit: u64,
}

/// Turns a node's gas estimate into a gas limit with a safety margin.
///
/// Execution can cost more than a static estimate (e.g. storage slot initialization), so the
/// estimate is bumped by a fixed percentage and rounded up.
#[derive(Clone, Copy, Debug)]
pub struct GasEstimator {
    bump_percent: u64,
}

impl Default for GasEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_GAS_BUMP_PERCENT)
    }
}

impl GasEstimator {
    pub fn new(bump_percent: u64) -> Self {
        Self { bump_percent }
    }

    pub fn buffered(&self, raw: u64) -> u64 {
        bump_gas(raw, self.bump_percent)
    }

    /// Estimates `tx`. Failure is fatal for the attempt and is never retried.
    pub async fn estimate(
        &self,
        wallet: &impl Wallet,
        tx: &DeploymentTx,
    ) -> Result<GasEstimate, DeploymentError> {
        let raw = wallet
            .estimate_gas(tx)
            .await
            .map_err(|err| DeploymentError::EstimationFailed(err.to_string()))?;
        let limit = self.buffered(raw);
        info!(@grey, "deployment gas: {}", format_gas_bump(limit, raw, self.bump_percent));
        Ok(GasEstimate { raw, limit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{deployment::ErrorKind, wallet::WalletError},
        utils::testing::{MockWallet, DEPLOYER},
    };

    #[test]
    fn buffer_is_ceil_of_one_point_two() {
        let estimator = GasEstimator::default();
        for raw in [0u64, 1, 5, 21_000, 21_001, 123_457, 2_999_999] {
            let expected = (raw as f64 * 1.2).ceil() as u64;
            assert_eq!(estimator.buffered(raw), expected, "raw estimate {raw}");
        }
    }

    #[tokio::test]
    async fn buffers_wallet_estimate() {
        let wallet = MockWallet::on_chain(114).with_estimate(Ok(100_001));
        let tx = DeploymentTx::new(DEPLOYER, 114, &[0x60], &[]);
        let estimate = GasEstimator::default().estimate(&wallet, &tx).await.unwrap();
        assert_eq!(
            estimate,
            GasEstimate {
                raw: 100_001,
                limit: 120_002
            }
        );
    }

    #[tokio::test]
    async fn estimation_error_is_fatal() {
        let wallet = MockWallet::on_chain(114)
            .with_estimate(Err(WalletError::Reverted("execution reverted".into())));
        let tx = DeploymentTx::new(DEPLOYER, 114, &[0x60], &[]);
        let err = GasEstimator::default()
            .estimate(&wallet, &tx)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EstimationFailed);
    }
}
