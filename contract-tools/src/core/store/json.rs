// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Record store laid out as a directory of JSON files.
//!
//! ```text
//! <root>/<owner>.json            records saved by <owner>
//! <root>/sources/Contract_*.sol  archived sources
//! ```

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use alloy::primitives::Address;
use tokio::{fs, sync::Mutex};

use super::{is_recorded, DeploymentRecord, RecordStore, StoreError};

const SOURCES_DIR: &str = "sources";

#[derive(Debug)]
pub struct JsonFileStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn owner_path(&self, owner: Address) -> PathBuf {
        self.root.join(format!("{}.json", owner.to_checksum(None)))
    }

    async fn read_records(&self, path: &Path) -> Result<Vec<DeploymentRecord>, StoreError> {
        match fs::read(path).await {
            Ok(contents) => Ok(serde_json::from_slice(&contents)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    /// Writes through a sibling temp file.
    async fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, contents).await?;
        fs::rename(&tmp, path).await?;
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    async fn save(&self, record: &DeploymentRecord, owner: Address) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        fs::create_dir_all(&self.root).await?;
        let path = self.owner_path(owner);
        let mut records = self.read_records(&path).await?;
        if is_recorded(&records, record) {
            return Err(StoreError::Duplicate {
                chain_id: record.chain_id,
                address: record.contract_address,
            });
        }
        records.push(record.clone());
        let contents = serde_json::to_vec_pretty(&records)?;
        Self::write_atomic(&path, &contents).await?;
        debug!(@grey, "saved record to {}", path.display());
        Ok(())
    }

    async fn list_for(&self, owner: Address) -> Result<Vec<DeploymentRecord>, StoreError> {
        self.read_records(&self.owner_path(owner)).await
    }

    async fn archive_source(&self, file_name: &str, source: &str) -> Result<String, StoreError> {
        if file_name.is_empty() || file_name.contains(['/', '\\']) || file_name.starts_with('.') {
            return Err(StoreError::InvalidFileName(file_name.to_string()));
        }
        let dir = self.root.join(SOURCES_DIR);
        fs::create_dir_all(&dir).await?;
        let path = dir.join(file_name);
        fs::write(&path, source).await?;
        Ok(path.display().to_string())
    }
}
