// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::{
    json_abi::Param,
    primitives::{Address, TxHash},
};
use chrono::Utc;

use super::{
    DeploymentConfig, DeploymentError, DeploymentRequest, DeploymentState, GasEstimate,
    GasEstimator, SessionGuard, SessionLocks,
};
use crate::{
    core::{
        constructor::{self, ResolvedArguments, Resolution},
        network,
        store::{source_file_name, DeploymentRecord, RecordStore},
        wallet::{DeploymentReceipt, DeploymentTx, Wallet, WalletError},
    },
    utils::{color::DebugColor, format_gas},
};

type Observer<'a> = Box<dyn FnMut(&DeploymentState) + 'a>;

/// Hands out deployment attempts and owns what they share: the record store and the set of
/// sessions with an attempt in flight.
#[derive(Debug)]
pub struct DeploymentExecutor<S> {
    store: S,
    estimator: GasEstimator,
    sessions: SessionLocks,
}

impl<S: RecordStore> DeploymentExecutor<S> {
    pub fn new(store: S, config: DeploymentConfig) -> Self {
        Self {
            store,
            estimator: GasEstimator::new(config.gas_bump_percent),
            sessions: SessionLocks::default(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn sessions(&self) -> &SessionLocks {
        &self.sessions
    }

    /// Opens a fresh attempt in [`DeploymentState::Idle`].
    ///
    /// Fails with [`DeploymentError::AttemptInProgress`] while the requester's session already
    /// has an attempt that has not finished.
    pub fn begin<'a, W: Wallet>(
        &'a self,
        wallet: &'a W,
        request: DeploymentRequest,
    ) -> Result<Attempt<'a, W, S>, DeploymentError> {
        let guard = self.sessions.try_acquire(request.requester)?;
        Ok(Attempt {
            executor: self,
            wallet,
            request,
            state: DeploymentState::Idle,
            history: vec![DeploymentState::Idle],
            guard: Some(guard),
            observer: None,
        })
    }

    /// Reconciles the network and estimates gas without sending anything.
    ///
    /// Constructor arguments must already be on the request.
    pub async fn estimate<W: Wallet>(
        &self,
        wallet: &W,
        request: &DeploymentRequest,
    ) -> Result<GasEstimate, DeploymentError> {
        if !request.artifact.is_deployable() {
            return Err(DeploymentError::NothingToDeploy);
        }
        let _guard = self.sessions.try_acquire(request.requester)?;
        network::reconcile(wallet, &request.target).await?;
        let args = request.constructor_args.as_deref().unwrap_or_default();
        let resolved = constructor::validate(request.artifact.constructor(), args)?;
        let tx = deployment_tx(request, &resolved);
        self.estimator.estimate(wallet, &tx).await
    }
}

/// How far [`Attempt::start`] got.
pub enum Progress<'a, W, S> {
    /// Suspended in [`DeploymentState::ResolvingArguments`].
    ArgumentsRequired(PendingArguments<'a, W, S>),
    Finished(Finished),
}

/// Terminal outcome of an attempt.
#[derive(Debug)]
pub struct Finished {
    pub result: Result<DeploymentRecord, DeploymentError>,
    pub state: DeploymentState,
    /// Every state the attempt went through, ending in `state`.
    pub history: Vec<DeploymentState>,
}

/// An attempt suspended until the caller supplies constructor arguments.
pub struct PendingArguments<'a, W, S> {
    attempt: Attempt<'a, W, S>,
    inputs: Vec<Param>,
}

impl<'a, W: Wallet, S: RecordStore> PendingArguments<'a, W, S> {
    /// Constructor inputs the arguments must match, in order.
    pub fn inputs(&self) -> &[Param] {
        &self.inputs
    }

    pub fn state(&self) -> &DeploymentState {
        &self.attempt.state
    }

    /// Validates `args` and, if they match, runs the attempt to completion.
    pub async fn provide(self, args: Vec<String>) -> Finished {
        let mut attempt = self.attempt;
        let resolved = constructor::validate(attempt.request.artifact.constructor(), &args);
        attempt.continue_with(resolved.map_err(Into::into)).await
    }

    /// Abandons the attempt. Nothing has been sent and nothing is recorded.
    pub fn cancel(self) -> Vec<DeploymentState> {
        let mut attempt = self.attempt;
        info!(@grey, "deployment cancelled");
        attempt.transition(DeploymentState::Idle);
        attempt.guard = None;
        attempt.history
    }
}

/// A single deployment attempt.
pub struct Attempt<'a, W, S> {
    executor: &'a DeploymentExecutor<S>,
    wallet: &'a W,
    request: DeploymentRequest,
    state: DeploymentState,
    history: Vec<DeploymentState>,
    guard: Option<SessionGuard>,
    observer: Option<Observer<'a>>,
}

impl<'a, W: Wallet, S: RecordStore> Attempt<'a, W, S> {
    /// Calls `observer` on every state change.
    pub fn on_transition(mut self, observer: impl FnMut(&DeploymentState) + 'a) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn state(&self) -> &DeploymentState {
        &self.state
    }

    pub fn request(&self) -> &DeploymentRequest {
        &self.request
    }

    /// Drives the attempt until it finishes or needs constructor arguments.
    pub async fn start(mut self) -> Progress<'a, W, S> {
        if !self.request.artifact.is_deployable() {
            return Progress::Finished(self.fail(DeploymentError::NothingToDeploy));
        }

        self.transition(DeploymentState::Reconciling);
        if let Err(err) = network::reconcile(self.wallet, &self.request.target).await {
            return Progress::Finished(self.fail(err));
        }

        self.transition(DeploymentState::ResolvingArguments);
        let artifact = &self.request.artifact;
        let supplied = self
            .request
            .constructor_args
            .as_ref()
            .map(|args| constructor::validate(artifact.constructor(), args));
        let resolved: Result<ResolvedArguments, DeploymentError> = match supplied {
            Some(result) => result.map_err(Into::into),
            None => match constructor::resolve(&self.request.artifact.abi) {
                Resolution::Ready(resolved) => Ok(resolved),
                Resolution::ArgumentsRequired(inputs) => {
                    debug!(@grey, "waiting for {} constructor arguments", inputs.len());
                    return Progress::ArgumentsRequired(PendingArguments {
                        attempt: self,
                        inputs,
                    });
                }
            },
        };
        Progress::Finished(self.continue_with(resolved).await)
    }

    async fn continue_with(
        &mut self,
        resolved: Result<ResolvedArguments, DeploymentError>,
    ) -> Finished {
        let result = match resolved {
            Ok(resolved) => self.deploy(resolved).await,
            Err(err) => Err(err),
        };
        match result {
            Ok(record) => {
                self.transition(DeploymentState::Succeeded {
                    contract_address: record.contract_address,
                });
                self.finish(Ok(record))
            }
            Err(err) => self.fail(err),
        }
    }

    async fn deploy(
        &mut self,
        resolved: ResolvedArguments,
    ) -> Result<DeploymentRecord, DeploymentError> {
        self.transition(DeploymentState::Estimating);
        let tx = deployment_tx(&self.request, &resolved);
        let estimate = self.executor.estimator.estimate(self.wallet, &tx).await?;
        let tx = tx.with_gas_limit(estimate.limit);

        self.transition(DeploymentState::Submitting);
        let tx_hash = self
            .wallet
            .send_transaction(&tx)
            .await
            .map_err(submission_error)?;
        debug!(@grey, "deployment tx hash: {}", tx_hash.debug_lavender());

        self.transition(DeploymentState::Confirming);
        let receipt = self
            .wallet
            .wait_for_receipt(tx_hash)
            .await
            .map_err(|err| confirmation_error(err, tx_hash))?;
        let contract_address = confirmed_address(&receipt)?;
        debug!(@grey, "gas used: {}", format_gas(receipt.gas_used));

        self.transition(DeploymentState::Persisting);
        self.persist(contract_address, &receipt).await
    }

    async fn persist(
        &self,
        contract_address: Address,
        receipt: &DeploymentReceipt,
    ) -> Result<DeploymentRecord, DeploymentError> {
        let target = &self.request.target;
        let owner = self.request.requester;
        let mut record = DeploymentRecord {
            chain_id: target.chain_id,
            contract_address,
            abi: self.request.artifact.abi.clone(),
            bytecode: self.request.artifact.bytecode.clone(),
            block_explorer_url: target.explorer_url(contract_address),
            source_reference: None,
            deployment_timestamp: Utc::now(),
            transaction_hash: receipt.tx_hash,
        };

        let store = &self.executor.store;
        if let Some(source) = &self.request.source {
            let file_name = source_file_name(contract_address);
            match store.archive_source(&file_name, source).await {
                Ok(reference) => record.source_reference = Some(reference),
                Err(err) => {
                    return Err(DeploymentError::PersistenceFailed {
                        contract_address,
                        owner,
                        record: Box::new(record),
                        detail: format!("failed to archive source: {err}"),
                    })
                }
            }
        }

        match store.save(&record, owner).await {
            Ok(()) => Ok(record),
            Err(err) => Err(DeploymentError::PersistenceFailed {
                contract_address,
                owner,
                record: Box::new(record),
                detail: err.to_string(),
            }),
        }
    }

    fn transition(&mut self, next: DeploymentState) {
        match &next {
            DeploymentState::Failed { .. } => warn!(@red, "{}", next),
            _ => info!(@grey, "{}", next),
        }
        if let Some(observer) = &mut self.observer {
            observer(&next);
        }
        self.history.push(next.clone());
        self.state = next;
    }

    fn fail(&mut self, err: DeploymentError) -> Finished {
        self.transition(DeploymentState::Failed {
            kind: err.kind(),
            detail: err.to_string(),
        });
        self.finish(Err(err))
    }

    fn finish(&mut self, result: Result<DeploymentRecord, DeploymentError>) -> Finished {
        self.guard = None;
        Finished {
            result,
            state: self.state.clone(),
            history: std::mem::take(&mut self.history),
        }
    }
}

fn deployment_tx(request: &DeploymentRequest, resolved: &ResolvedArguments) -> DeploymentTx {
    DeploymentTx::new(
        request.requester,
        request.target.chain_id,
        &request.artifact.bytecode,
        resolved.encoded(),
    )
}

fn submission_error(err: WalletError) -> DeploymentError {
    match err {
        WalletError::Rejected => DeploymentError::UserRejected,
        WalletError::InsufficientFunds(detail) => DeploymentError::InsufficientFunds(detail),
        err => DeploymentError::Unknown(err.to_string()),
    }
}

fn confirmation_error(err: WalletError, tx_hash: TxHash) -> DeploymentError {
    match err {
        WalletError::Reverted(_) => DeploymentError::TransactionReverted { tx_hash },
        err => DeploymentError::Unknown(err.to_string()),
    }
}

fn confirmed_address(receipt: &DeploymentReceipt) -> Result<Address, DeploymentError> {
    if !receipt.success {
        return Err(DeploymentError::TransactionReverted {
            tx_hash: receipt.tx_hash,
        });
    }
    receipt.contract_address.ok_or_else(|| {
        DeploymentError::Unknown(format!(
            "missing address: no contract address in receipt for {}",
            receipt.tx_hash
        ))
    })
}
