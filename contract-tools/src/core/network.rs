// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Reconciles the wallet's active network with a deployment target.

use crate::core::{
    chain::ChainProfile,
    deployment::DeploymentError,
    wallet::{Wallet, WalletError},
};

/// Makes sure `wallet` operates against `target`, switching or adding the network if needed.
///
/// Calling this when the wallet is already on the target is a no-op and prompts nothing.
pub async fn reconcile(wallet: &impl Wallet, target: &ChainProfile) -> Result<(), DeploymentError> {
    let current = wallet.chain_id().await.map_err(chain_query_error)?;
    if current == target.chain_id {
        debug!(@grey, "wallet already on chain {}", target.chain_id);
        return Ok(());
    }

    info!(@grey, "switching wallet from chain {current} to {} ({})", target.chain_id, target.name);
    match wallet.switch_chain(target.chain_id).await {
        Ok(()) => {}
        Err(WalletError::UnknownChain) => {
            info!(@grey, "wallet does not know {}, adding it", target.name);
            wallet
                .add_chain(&target.add_chain_params())
                .await
                .map_err(add_chain_error)?;
            wallet
                .switch_chain(target.chain_id)
                .await
                .map_err(|err| match err {
                    WalletError::UnknownChain => DeploymentError::ChainAddFailed(format!(
                        "wallet still does not recognize chain {} after adding it",
                        target.chain_id
                    )),
                    err => switch_error(err),
                })?;
        }
        Err(err) => return Err(switch_error(err)),
    }

    let actual = wallet.chain_id().await.map_err(chain_query_error)?;
    if actual != target.chain_id {
        return Err(DeploymentError::NetworkMismatch {
            expected: target.chain_id,
            actual,
        });
    }
    Ok(())
}

fn chain_query_error(err: WalletError) -> DeploymentError {
    match err {
        WalletError::Unavailable(detail) => DeploymentError::WalletUnavailable(detail),
        WalletError::Rejected => DeploymentError::UserRejected,
        err => DeploymentError::Unknown(err.to_string()),
    }
}

fn switch_error(err: WalletError) -> DeploymentError {
    match err {
        WalletError::Rejected => DeploymentError::UserRejected,
        WalletError::Unavailable(detail) => DeploymentError::WalletUnavailable(detail),
        err => DeploymentError::Unknown(err.to_string()),
    }
}

fn add_chain_error(err: WalletError) -> DeploymentError {
    match err {
        WalletError::Rejected => DeploymentError::UserRejected,
        WalletError::Unavailable(detail) => DeploymentError::WalletUnavailable(detail),
        err => DeploymentError::ChainAddFailed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{chain::ChainRegistry, deployment::ErrorKind},
        utils::testing::{MockWallet, Prompt},
    };

    fn coston2() -> ChainProfile {
        ChainRegistry::with_defaults().lookup(114).unwrap().clone()
    }

    #[tokio::test]
    async fn already_on_target_prompts_nothing() {
        let wallet = MockWallet::on_chain(114);
        reconcile(&wallet, &coston2()).await.unwrap();
        reconcile(&wallet, &coston2()).await.unwrap();
        assert!(wallet.prompts().is_empty());
    }

    #[tokio::test]
    async fn switches_to_known_chain() {
        let wallet = MockWallet::on_chain(1).knowing(&[1, 114]);
        reconcile(&wallet, &coston2()).await.unwrap();
        assert_eq!(wallet.prompts(), vec![Prompt::Switch(114)]);

        // reconciled: second call is silent
        reconcile(&wallet, &coston2()).await.unwrap();
        assert_eq!(wallet.prompts().len(), 1);
    }

    #[tokio::test]
    async fn adds_then_switches_unknown_chain() {
        let wallet = MockWallet::on_chain(1);
        reconcile(&wallet, &coston2()).await.unwrap();
        assert_eq!(
            wallet.prompts(),
            vec![Prompt::Switch(114), Prompt::AddChain(114), Prompt::Switch(114)]
        );
        assert_eq!(wallet.chain_id().await.unwrap(), 114);
    }

    #[tokio::test]
    async fn rejected_add_is_user_rejected() {
        let wallet = MockWallet::on_chain(1).rejecting_add();
        let err = reconcile(&wallet, &coston2()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UserRejected);
        assert_eq!(
            wallet.prompts(),
            vec![Prompt::Switch(114), Prompt::AddChain(114)]
        );
    }

    #[tokio::test]
    async fn rejected_switch_is_user_rejected() {
        let wallet = MockWallet::on_chain(1).knowing(&[1, 114]).rejecting_switch();
        let err = reconcile(&wallet, &coston2()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UserRejected);
    }

    #[tokio::test]
    async fn switch_that_does_not_stick_is_mismatch() {
        let wallet = MockWallet::on_chain(1).knowing(&[1, 114]).ignoring_switch();
        let err = reconcile(&wallet, &coston2()).await.unwrap_err();
        assert!(matches!(
            err,
            DeploymentError::NetworkMismatch {
                expected: 114,
                actual: 1
            }
        ));
    }

    #[tokio::test]
    async fn disconnected_wallet_is_unavailable() {
        let wallet = MockWallet::on_chain(114).disconnected();
        let err = reconcile(&wallet, &coston2()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WalletUnavailable);
        assert!(wallet.prompts().is_empty());
    }
}
