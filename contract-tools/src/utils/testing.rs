// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Scripted collaborators for exercising the deployment flow without a chain.

use std::{
    collections::HashSet,
    sync::atomic::{AtomicBool, Ordering},
};

use alloy::{
    json_abi::JsonAbi,
    primitives::{address, b256, Address, TxHash},
};
use parking_lot::Mutex;

use crate::core::{
    artifact::CompiledArtifact,
    chain::AddChainParams,
    store::{DeploymentRecord, MemoryStore, RecordStore, StoreError},
    wallet::{DeploymentReceipt, DeploymentTx, Wallet, WalletError},
};

pub const DEPLOYER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
pub const OTHER_DEPLOYER: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
pub const CONTRACT: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
pub const TX_HASH: TxHash =
    b256!("0xabababababababababababababababababababababababababababababababab");

/// Every request that reached the wallet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Prompt {
    Switch(u64),
    AddChain(u64),
    EstimateGas,
    Send,
    Receipt,
}

pub struct MockWallet {
    address: Address,
    chain: Mutex<Option<u64>>,
    known: Mutex<HashSet<u64>>,
    prompts: Mutex<Vec<Prompt>>,
    sent: Mutex<Vec<DeploymentTx>>,
    reject_switch: bool,
    reject_add: bool,
    ignore_switch: bool,
    estimate: Result<u64, WalletError>,
    send: Result<TxHash, WalletError>,
    receipt: Result<DeploymentReceipt, WalletError>,
}

impl MockWallet {
    /// Connected wallet that only knows the chain it is on.
    pub fn on_chain(chain_id: u64) -> Self {
        Self {
            address: DEPLOYER,
            chain: Mutex::new(Some(chain_id)),
            known: Mutex::new(HashSet::from([chain_id])),
            prompts: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
            reject_switch: false,
            reject_add: false,
            ignore_switch: false,
            estimate: Ok(100_000),
            send: Ok(TX_HASH),
            receipt: Ok(DeploymentReceipt {
                tx_hash: TX_HASH,
                success: true,
                contract_address: Some(CONTRACT),
                gas_used: 95_000,
            }),
        }
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = address;
        self
    }

    pub fn knowing(self, chains: &[u64]) -> Self {
        self.known.lock().extend(chains);
        self
    }

    pub fn disconnected(self) -> Self {
        *self.chain.lock() = None;
        self
    }

    pub fn rejecting_switch(mut self) -> Self {
        self.reject_switch = true;
        self
    }

    pub fn rejecting_add(mut self) -> Self {
        self.reject_add = true;
        self
    }

    /// Accepts switches without actually changing networks.
    pub fn ignoring_switch(mut self) -> Self {
        self.ignore_switch = true;
        self
    }

    pub fn with_estimate(mut self, estimate: Result<u64, WalletError>) -> Self {
        self.estimate = estimate;
        self
    }

    pub fn with_send(mut self, send: Result<TxHash, WalletError>) -> Self {
        self.send = send;
        self
    }

    pub fn with_receipt(mut self, receipt: Result<DeploymentReceipt, WalletError>) -> Self {
        self.receipt = receipt;
        self
    }

    pub fn reverting(self) -> Self {
        self.with_receipt(Ok(DeploymentReceipt {
            tx_hash: TX_HASH,
            success: false,
            contract_address: None,
            gas_used: 100_000,
        }))
    }

    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().clone()
    }

    /// Chain switch and add prompts only.
    pub fn network_prompts(&self) -> Vec<Prompt> {
        self.prompts()
            .into_iter()
            .filter(|p| matches!(p, Prompt::Switch(_) | Prompt::AddChain(_)))
            .collect()
    }

    pub fn sent(&self) -> Vec<DeploymentTx> {
        self.sent.lock().clone()
    }

    fn record(&self, prompt: Prompt) {
        self.prompts.lock().push(prompt);
    }
}

impl Wallet for MockWallet {
    async fn address(&self) -> Result<Address, WalletError> {
        Ok(self.address)
    }

    async fn chain_id(&self) -> Result<u64, WalletError> {
        self.chain
            .lock()
            .ok_or_else(|| WalletError::Unavailable("no wallet connected".to_string()))
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), WalletError> {
        self.record(Prompt::Switch(chain_id));
        if self.reject_switch {
            return Err(WalletError::Rejected);
        }
        if !self.known.lock().contains(&chain_id) {
            return Err(WalletError::UnknownChain);
        }
        if !self.ignore_switch {
            *self.chain.lock() = Some(chain_id);
        }
        Ok(())
    }

    async fn add_chain(&self, params: &AddChainParams) -> Result<(), WalletError> {
        let chain_id = params.numeric_chain_id().unwrap();
        self.record(Prompt::AddChain(chain_id));
        if self.reject_add {
            return Err(WalletError::Rejected);
        }
        self.known.lock().insert(chain_id);
        Ok(())
    }

    async fn estimate_gas(&self, _tx: &DeploymentTx) -> Result<u64, WalletError> {
        self.record(Prompt::EstimateGas);
        self.estimate.clone()
    }

    async fn send_transaction(&self, tx: &DeploymentTx) -> Result<TxHash, WalletError> {
        self.record(Prompt::Send);
        self.sent.lock().push(tx.clone());
        self.send.clone()
    }

    async fn wait_for_receipt(&self, _tx_hash: TxHash) -> Result<DeploymentReceipt, WalletError> {
        self.record(Prompt::Receipt);
        self.receipt.clone()
    }
}

/// Memory store whose saves can be made to fail.
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    failing: AtomicBool,
}

impl FlakyStore {
    pub fn failing() -> Self {
        let store = Self::default();
        store.failing.store(true, Ordering::SeqCst);
        store
    }

    pub fn recover(&self) {
        self.failing.store(false, Ordering::SeqCst);
    }
}

impl RecordStore for FlakyStore {
    async fn save(&self, record: &DeploymentRecord, owner: Address) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("disk full".to_string()));
        }
        self.inner.save(record, owner).await
    }

    async fn list_for(&self, owner: Address) -> Result<Vec<DeploymentRecord>, StoreError> {
        self.inner.list_for(owner).await
    }

    async fn archive_source(&self, file_name: &str, source: &str) -> Result<String, StoreError> {
        self.inner.archive_source(file_name, source).await
    }
}

pub fn abi(json: &str) -> JsonAbi {
    serde_json::from_str(json).unwrap()
}

/// Artifact without a constructor.
pub fn simple_artifact() -> CompiledArtifact {
    CompiledArtifact::from_hex(
        abi(r#"[{"type": "function", "name": "get", "inputs": [], "outputs": [{"name": "", "type": "uint256"}], "stateMutability": "view"}]"#),
        "0x6080604052",
    )
    .unwrap()
}

/// Artifact whose constructor takes `(uint256 supply, address owner)`.
pub fn token_artifact() -> CompiledArtifact {
    CompiledArtifact::from_hex(
        abi(r#"[{
            "type": "constructor",
            "stateMutability": "nonpayable",
            "inputs": [
                {"name": "supply", "type": "uint256"},
                {"name": "owner", "type": "address"}
            ]
        }]"#),
        "0x6080604052",
    )
    .unwrap()
}
