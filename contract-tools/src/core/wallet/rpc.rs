// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Wallet backed by a local private key and JSON-RPC endpoints.
//!
//! A node cannot switch networks the way a browser wallet does, so this wallet keeps a table of
//! networks it has been told about and reconnects to the matching endpoint on switch.

use std::{collections::HashMap, time::Duration};

use alloy::{
    network::EthereumWallet,
    primitives::{Address, TxHash},
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
};
use parking_lot::Mutex;
use reqwest::Url;

use super::{DeploymentReceipt, DeploymentTx, Wallet, WalletError};
use crate::{
    core::chain::{AddChainParams, ChainRegistry},
    utils::color::DebugColor,
};

/// Default interval between receipt polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

type AddChainPrompt = Box<dyn Fn(&AddChainParams) -> bool + Send + Sync>;

pub struct RpcWallet {
    wallet: EthereumWallet,
    address: Address,
    networks: Mutex<HashMap<u64, Url>>,
    active: Mutex<Option<DynProvider>>,
    add_chain_prompt: Option<AddChainPrompt>,
    poll_interval: Duration,
}

impl RpcWallet {
    pub fn new(signer: PrivateKeySigner) -> Self {
        let address = signer.address();
        Self {
            wallet: EthereumWallet::new(signer),
            address,
            networks: Mutex::new(HashMap::new()),
            active: Mutex::new(None),
            add_chain_prompt: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Teaches the wallet about a network up front.
    pub fn with_network(self, chain_id: u64, url: Url) -> Self {
        self.networks.lock().insert(chain_id, url);
        self
    }

    /// Teaches the wallet about every chain in a registry.
    pub fn with_registry(self, registry: &ChainRegistry) -> Self {
        {
            let mut networks = self.networks.lock();
            for chain in registry.iter() {
                match Url::parse(&chain.rpc_url) {
                    Ok(url) => {
                        networks.insert(chain.chain_id, url);
                    }
                    Err(err) => {
                        warn!(@yellow, "skipping chain {}: bad rpc url: {err}", chain.chain_id)
                    }
                }
            }
        }
        self
    }

    /// Asks `prompt` before adding a network; returning false rejects the request.
    ///
    /// `prompt` is called synchronously from within `add_chain`. A prompt that blocks on user
    /// input should hand the read to `tokio::task::block_in_place`.
    pub fn with_add_chain_prompt(
        mut self,
        prompt: impl Fn(&AddChainParams) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.add_chain_prompt = Some(Box::new(prompt));
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Selects the endpoint the wallet starts out on, whatever chain it serves.
    pub fn connect(self, url: Url) -> Self {
        let provider = self.build_provider(url);
        *self.active.lock() = Some(provider);
        self
    }

    fn build_provider(&self, url: Url) -> DynProvider {
        ProviderBuilder::new()
            .wallet(self.wallet.clone())
            .connect_http(url)
            .erased()
    }

    fn provider(&self) -> Result<DynProvider, WalletError> {
        self.active
            .lock()
            .clone()
            .ok_or_else(|| WalletError::Unavailable("wallet is not connected".to_string()))
    }
}

impl Wallet for RpcWallet {
    async fn address(&self) -> Result<Address, WalletError> {
        Ok(self.address)
    }

    async fn chain_id(&self) -> Result<u64, WalletError> {
        Ok(self.provider()?.get_chain_id().await?)
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), WalletError> {
        let url = self
            .networks
            .lock()
            .get(&chain_id)
            .cloned()
            .ok_or(WalletError::UnknownChain)?;
        debug!(@grey, "switching wallet to chain {chain_id} at {url}");
        let provider = self.build_provider(url);
        let served = provider.get_chain_id().await?;
        if served != chain_id {
            warn!(@yellow, "endpoint for chain {chain_id} serves chain {served}");
        }
        *self.active.lock() = Some(provider);
        Ok(())
    }

    async fn add_chain(&self, params: &AddChainParams) -> Result<(), WalletError> {
        if let Some(prompt) = &self.add_chain_prompt {
            if !prompt(params) {
                return Err(WalletError::Rejected);
            }
        }
        let chain_id = params
            .numeric_chain_id()
            .ok_or_else(|| WalletError::Rpc(format!("invalid chain id {}", params.chain_id)))?;
        let url = params
            .rpc_urls
            .first()
            .ok_or_else(|| WalletError::Rpc("no rpc url provided".to_string()))?;
        let url = Url::parse(url).map_err(|err| WalletError::Rpc(format!("bad rpc url: {err}")))?;
        debug!(@grey, "adding chain {chain_id} ({}) at {url}", params.chain_name);
        self.networks.lock().insert(chain_id, url);
        Ok(())
    }

    async fn estimate_gas(&self, tx: &DeploymentTx) -> Result<u64, WalletError> {
        Ok(self.provider()?.estimate_gas(tx.to_request()).await?)
    }

    async fn send_transaction(&self, tx: &DeploymentTx) -> Result<TxHash, WalletError> {
        let pending = self.provider()?.send_transaction(tx.to_request()).await?;
        let tx_hash = *pending.tx_hash();
        debug!(@grey, "sent deploy tx: {}", tx_hash.debug_lavender());
        Ok(tx_hash)
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<DeploymentReceipt, WalletError> {
        let provider = self.provider()?;
        loop {
            if let Some(receipt) = provider.get_transaction_receipt(tx_hash).await? {
                return Ok(DeploymentReceipt {
                    tx_hash: receipt.transaction_hash,
                    success: receipt.status(),
                    contract_address: receipt.contract_address,
                    gas_used: receipt.gas_used,
                });
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
