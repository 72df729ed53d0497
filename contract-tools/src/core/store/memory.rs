// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::collections::HashMap;

use alloy::primitives::Address;
use parking_lot::Mutex;

use super::{is_recorded, DeploymentRecord, RecordStore, StoreError};

/// In-process record store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<Address, Vec<DeploymentRecord>>>,
    sources: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self, file_name: &str) -> Option<String> {
        self.sources.lock().get(file_name).cloned()
    }
}

impl RecordStore for MemoryStore {
    async fn save(&self, record: &DeploymentRecord, owner: Address) -> Result<(), StoreError> {
        let mut records = self.records.lock();
        let owned = records.entry(owner).or_default();
        if is_recorded(owned, record) {
            return Err(StoreError::Duplicate {
                chain_id: record.chain_id,
                address: record.contract_address,
            });
        }
        owned.push(record.clone());
        Ok(())
    }

    async fn list_for(&self, owner: Address) -> Result<Vec<DeploymentRecord>, StoreError> {
        Ok(self.records.lock().get(&owner).cloned().unwrap_or_default())
    }

    async fn archive_source(&self, file_name: &str, source: &str) -> Result<String, StoreError> {
        self.sources
            .lock()
            .insert(file_name.to_string(), source.to_string());
        Ok(format!("memory://sources/{file_name}"))
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;
    use crate::core::store::tests::record;

    const OWNER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    const OTHER: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");

    #[tokio::test]
    async fn lists_by_owner() {
        let store = MemoryStore::new();
        let first = record(114, address!("5FbDB2315678afecb367f032d93F642f64180aa3"));
        let second = record(84532, address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512"));
        store.save(&first, OWNER).await.unwrap();
        store.save(&second, OWNER).await.unwrap();

        assert_eq!(store.list_for(OWNER).await.unwrap(), vec![first, second]);
        assert!(store.list_for(OTHER).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn records_are_created_once() {
        let store = MemoryStore::new();
        let rec = record(114, address!("5FbDB2315678afecb367f032d93F642f64180aa3"));
        store.save(&rec, OWNER).await.unwrap();
        assert!(matches!(
            store.save(&rec, OWNER).await,
            Err(StoreError::Duplicate { chain_id: 114, .. })
        ));
    }

    #[tokio::test]
    async fn archives_sources() {
        let store = MemoryStore::new();
        let reference = store
            .archive_source("Contract_0x1.sol", "contract A {}")
            .await
            .unwrap();
        assert_eq!(reference, "memory://sources/Contract_0x1.sol");
        assert_eq!(store.source("Contract_0x1.sol").unwrap(), "contract A {}");
    }
}
