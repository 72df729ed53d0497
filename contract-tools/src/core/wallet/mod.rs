// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! The wallet capability a deployment is driven through.
//!
//! A wallet owns the session (its account and active chain). The orchestrator only reads that
//! session and asks the wallet to change it through explicit switch/add requests.

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, TxHash},
    rpc::types::TransactionRequest,
    transports::{RpcError, TransportErrorKind},
};

use crate::core::chain::AddChainParams;

pub use rpc::{RpcWallet, DEFAULT_POLL_INTERVAL};

mod rpc;

/// EIP-1193 code for a request the user declined.
pub const USER_REJECTED_CODE: i64 = 4001;
/// EIP-3326 code for a switch to a chain the wallet does not know.
pub const UNRECOGNIZED_CHAIN_CODE: i64 = 4902;

#[allow(async_fn_in_trait)]
pub trait Wallet {
    /// Account the wallet signs with.
    async fn address(&self) -> Result<Address, WalletError>;

    /// Chain the wallet is currently operating against.
    async fn chain_id(&self) -> Result<u64, WalletError>;

    /// Asks the wallet to switch networks. Fails with [`WalletError::UnknownChain`] if the
    /// wallet has never been told about `chain_id`.
    async fn switch_chain(&self, chain_id: u64) -> Result<(), WalletError>;

    /// Asks the wallet to learn about a new network.
    async fn add_chain(&self, params: &AddChainParams) -> Result<(), WalletError>;

    async fn estimate_gas(&self, tx: &DeploymentTx) -> Result<u64, WalletError>;

    /// Signs and broadcasts a transaction, returning once it is pending.
    async fn send_transaction(&self, tx: &DeploymentTx) -> Result<TxHash, WalletError>;

    /// Waits for a pending transaction to be included.
    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<DeploymentReceipt, WalletError>;
}

/// Contract creation transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentTx {
    pub from: Address,
    pub chain_id: u64,
    /// Creation bytecode followed by the encoded constructor arguments.
    pub input: Bytes,
    pub gas_limit: Option<u64>,
}

impl DeploymentTx {
    pub fn new(from: Address, chain_id: u64, code: &[u8], encoded_args: &[u8]) -> Self {
        let mut input = Vec::with_capacity(code.len() + encoded_args.len());
        input.extend_from_slice(code);
        input.extend_from_slice(encoded_args);
        Self {
            from,
            chain_id,
            input: input.into(),
            gas_limit: None,
        }
    }

    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    pub fn to_request(&self) -> TransactionRequest {
        let tx = TransactionRequest::default()
            .with_from(self.from)
            .with_chain_id(self.chain_id)
            .with_deploy_code(self.input.clone());
        match self.gas_limit {
            Some(gas) => tx.with_gas_limit(gas),
            None => tx,
        }
    }
}

/// What the orchestrator needs from a mined deployment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentReceipt {
    pub tx_hash: TxHash,
    pub success: bool,
    pub contract_address: Option<Address>,
    pub gas_used: u64,
}

#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("request rejected by user")]
    Rejected,
    #[error("chain is unknown to the wallet")]
    UnknownChain,
    #[error("wallet unavailable: {0}")]
    Unavailable(String),
    #[error("insufficient funds: {0}")]
    InsufficientFunds(String),
    #[error("execution reverted: {0}")]
    Reverted(String),
    #[error("{0}")]
    Rpc(String),
}

impl From<RpcError<TransportErrorKind>> for WalletError {
    fn from(err: RpcError<TransportErrorKind>) -> Self {
        let Some(payload) = err.as_error_resp() else {
            return match err {
                RpcError::Transport(kind) => Self::Unavailable(kind.to_string()),
                other => Self::Rpc(other.to_string()),
            };
        };
        let message = payload.message.to_string();
        classify(payload.code, message)
    }
}

/// Maps a JSON-RPC error code and message onto a wallet error.
pub fn classify(code: i64, message: String) -> WalletError {
    let lower = message.to_lowercase();
    match code {
        USER_REJECTED_CODE => WalletError::Rejected,
        UNRECOGNIZED_CHAIN_CODE => WalletError::UnknownChain,
        _ if lower.contains("insufficient funds") => WalletError::InsufficientFunds(message),
        _ if lower.contains("revert") => WalletError::Reverted(message),
        _ => WalletError::Rpc(message),
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    #[test]
    fn classifies_error_codes() {
        assert_eq!(classify(4001, "User denied".into()), WalletError::Rejected);
        assert_eq!(
            classify(4902, "Unrecognized chain ID".into()),
            WalletError::UnknownChain
        );
        assert!(matches!(
            classify(-32000, "Insufficient funds for gas * price + value".into()),
            WalletError::InsufficientFunds(_)
        ));
        assert!(matches!(
            classify(3, "execution reverted: Ownable: caller".into()),
            WalletError::Reverted(_)
        ));
        assert_eq!(
            classify(-32603, "internal error".into()),
            WalletError::Rpc("internal error".into())
        );
    }

    #[test]
    fn deploy_tx_appends_arguments() {
        let from = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
        let tx = DeploymentTx::new(from, 114, &[0x60, 0x80], &[0x01]).with_gas_limit(50_000);
        assert_eq!(tx.input.as_ref(), &[0x60, 0x80, 0x01]);

        let req = tx.to_request();
        assert_eq!(req.from, Some(from));
        assert_eq!(req.gas, Some(50_000));
        assert_eq!(req.chain_id, Some(114));
    }
}
