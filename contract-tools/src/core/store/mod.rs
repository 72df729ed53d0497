// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Durable records of completed deployments, retrievable by the deploying account.

use alloy::{
    json_abi::JsonAbi,
    primitives::{Address, Bytes, TxHash},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use json::JsonFileStore;
pub use memory::MemoryStore;

mod json;
mod memory;

/// Evidence of a confirmed deployment. Created once, never modified.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    pub chain_id: u64,
    pub contract_address: Address,
    pub abi: JsonAbi,
    pub bytecode: Bytes,
    pub block_explorer_url: String,
    /// Where the contract source was archived, if it was provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_reference: Option<String>,
    pub deployment_timestamp: DateTime<Utc>,
    pub transaction_hash: TxHash,
}

/// File name a contract's source is archived under.
pub fn source_file_name(address: Address) -> String {
    format!("Contract_{}.sol", address.to_checksum(None))
}

#[allow(async_fn_in_trait)]
pub trait RecordStore {
    /// Persists a record under `owner`.
    async fn save(&self, record: &DeploymentRecord, owner: Address) -> Result<(), StoreError>;

    /// Every record saved under `owner`, oldest first.
    async fn list_for(&self, owner: Address) -> Result<Vec<DeploymentRecord>, StoreError>;

    /// Archives contract source, returning a reference to it.
    async fn archive_source(&self, file_name: &str, source: &str) -> Result<String, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("contract {address} on chain {chain_id} is already recorded")]
    Duplicate { chain_id: u64, address: Address },
    #[error("invalid source file name: {0}")]
    InvalidFileName(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

fn is_recorded(records: &[DeploymentRecord], record: &DeploymentRecord) -> bool {
    records.iter().any(|r| {
        r.chain_id == record.chain_id && r.contract_address == record.contract_address
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use alloy::primitives::{address, b256};

    use super::*;

    pub(crate) fn record(chain_id: u64, contract_address: Address) -> DeploymentRecord {
        DeploymentRecord {
            chain_id,
            contract_address,
            abi: JsonAbi::default(),
            bytecode: Bytes::from_static(&[0x60, 0x80]),
            block_explorer_url: format!("https://explorer/address/{contract_address}"),
            source_reference: None,
            deployment_timestamp: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            transaction_hash: b256!(
                "0x1111111111111111111111111111111111111111111111111111111111111111"
            ),
        }
    }

    #[test]
    fn serializes_camel_case() {
        let record = record(114, address!("5FbDB2315678afecb367f032d93F642f64180aa3"));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["chainId"], 114);
        assert!(json["contractAddress"]
            .as_str()
            .unwrap()
            .eq_ignore_ascii_case("0x5fbdb2315678afecb367f032d93f642f64180aa3"));
        assert_eq!(json["deploymentTimestamp"], "2023-11-14T22:13:20Z");
        assert!(json.get("sourceReference").is_none());

        let back: DeploymentRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn source_names_use_checksum() {
        assert_eq!(
            source_file_name(address!("5fbdb2315678afecb367f032d93f642f64180aa3")),
            "Contract_0x5FbDB2315678afecb367f032d93F642f64180aa3.sol"
        );
    }
}
