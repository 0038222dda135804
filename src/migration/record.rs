//! Deployment records written after a successful migration.

use std::fs;
use std::path::{Path, PathBuf};

use alloy::primitives::{Address, TxHash};
use serde::{Deserialize, Serialize};

use crate::migration::runner::{MigrationError, MigrationResult};

/// What a migration deployed, where, and from which account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub network: String,
    pub contract: String,
    pub address: Address,
    pub deployer: Address,
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    pub chain_id: Option<u64>,
    pub gas_limit: u64,
    pub gas_used: u64,
}

impl DeploymentRecord {
    /// `<dir>/<network>/<contract>.json`
    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(&self.network).join(format!("{}.json", self.contract))
    }

    /// Write the record under `dir`, replacing any previous one.
    pub fn save(&self, dir: &Path) -> MigrationResult<PathBuf> {
        let path = self.path_in(dir);
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| MigrationError::Record {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, json).map_err(|source| MigrationError::Record {
            path: path.clone(),
            source,
        })?;

        tracing::info!(path = %path.display(), "Deployment recorded");
        Ok(path)
    }

    pub fn load(path: &Path) -> MigrationResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| MigrationError::Record {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}
