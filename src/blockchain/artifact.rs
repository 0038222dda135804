//! Compiled contract artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use alloy::primitives::Bytes;
use serde::Deserialize;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// The subset of a Hardhat artifact needed to deploy a contract.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    pub contract_name: String,
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Conventional artifact location: `<artifacts>/contracts/<Name>.sol/<Name>.json`.
    pub fn default_path(artifacts_dir: &Path, contract: &str) -> PathBuf {
        artifacts_dir
            .join("contracts")
            .join(format!("{contract}.sol"))
            .join(format!("{contract}.json"))
    }

    pub fn from_json(content: &str) -> BlockchainResult<Self> {
        let artifact: Self = serde_json::from_str(content)
            .map_err(|e| BlockchainError::Artifact(format!("malformed artifact: {e}")))?;
        if artifact.bytecode.is_empty() {
            return Err(BlockchainError::Artifact(format!(
                "{} has no creation bytecode",
                artifact.contract_name
            )));
        }
        Ok(artifact)
    }

    pub fn load(path: &Path) -> BlockchainResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            BlockchainError::Artifact(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&content)
    }
}
