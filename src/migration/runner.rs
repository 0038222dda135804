//! The initial migration: deploy the `Migrations` bookkeeping contract.
//!
//! # Steps
//! 1. Select the network profile by name
//! 2. Pre-flight: the node-managed mode needs `ACCOUNT_PASSWORD`; nothing
//!    touches the network before this check passes
//! 3. Unlock the first account for [`UNLOCK_DURATION`]
//! 4. Deploy with the fixed [`DEPLOY_GAS_LIMIT`]; no retry
//!
//! State moves once from `NotDeployed` to `Deployed` or `Failed`.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::blockchain::artifact::ContractArtifact;
use crate::blockchain::client::{RpcClient, RpcSettings};
use crate::blockchain::rpc::ChainRpc;
use crate::blockchain::types::{BlockchainError, DeployRequest};
use crate::blockchain::wallet;
use crate::config::{ConfigError, Credentials, NetworkProfile, ResolvedConfig, Secret};
use crate::migration::record::DeploymentRecord;
use crate::observability::metrics;

/// Contract deployed by the initial migration.
pub const MIGRATIONS_CONTRACT: &str = "Migrations";

/// Gas budget for the deployment transaction.
pub const DEPLOY_GAS_LIMIT: u64 = 6_000_000;

/// How long the node keeps the deployer account unlocked.
pub const UNLOCK_DURATION: Duration = Duration::from_secs(36_000);

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),

    #[error("migration on '{0}' already ran")]
    AlreadyExecuted(String),

    #[error("failed to access deployment record {}: {}", .path.display(), .source)]
    Record {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to encode deployment record: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type MigrationResult<T> = Result<T, MigrationError>;

/// Where the deployer account lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecutionMode {
    /// The node holds the key; the account is unlocked with `ACCOUNT_PASSWORD`.
    #[default]
    NodeManaged,
    /// Transactions are signed with the profile's own accounts.
    LocalSigner,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationState {
    NotDeployed,
    Deployed(DeploymentRecord),
    Failed(String),
}

/// A migration that passed pre-flight checks and is ready to run.
#[derive(Debug)]
pub struct Migration {
    profile: NetworkProfile,
    mode: ExecutionMode,
    password: Option<Secret>,
    state: MigrationState,
}

impl Migration {
    /// Select `network` and run pre-flight checks. Performs no network I/O.
    pub fn prepare(
        config: &ResolvedConfig,
        credentials: &Credentials,
        network: &str,
        mode: ExecutionMode,
    ) -> MigrationResult<Self> {
        let profile = config
            .network(network)
            .ok_or_else(|| ConfigError::UnknownNetwork(network.to_string()))?
            .clone();

        if profile.rpc_url().is_none() {
            return Err(BlockchainError::NotAvailable(format!(
                "network '{network}' runs in-process and has no RPC endpoint"
            ))
            .into());
        }

        let password = match mode {
            ExecutionMode::NodeManaged => Some(credentials.require_account_password()?.clone()),
            ExecutionMode::LocalSigner => None,
        };

        Ok(Self {
            profile,
            mode,
            password,
            state: MigrationState::NotDeployed,
        })
    }

    pub fn profile(&self) -> &NetworkProfile {
        &self.profile
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    pub fn state(&self) -> &MigrationState {
        &self.state
    }

    /// Build the RPC client matching this migration's execution mode.
    pub fn connect(&self, settings: RpcSettings) -> MigrationResult<RpcClient> {
        let client = match self.mode {
            ExecutionMode::NodeManaged => RpcClient::connect(&self.profile, settings)?,
            ExecutionMode::LocalSigner => {
                let signers = wallet::signers_for(&self.profile.accounts)?;
                RpcClient::connect_with_signers(&self.profile, signers, settings)?
            }
        };
        Ok(client)
    }

    /// Run the migration once against `rpc`.
    pub async fn execute<R: ChainRpc>(
        &mut self,
        rpc: &R,
        artifact: &ContractArtifact,
    ) -> MigrationResult<DeploymentRecord> {
        if self.state != MigrationState::NotDeployed {
            return Err(MigrationError::AlreadyExecuted(self.profile.name.clone()));
        }

        let result = self.deploy(rpc, artifact).await;
        metrics::record_migration(&self.profile.name, result.is_ok());

        match &result {
            Ok(record) => {
                tracing::info!(
                    network = %record.network,
                    contract = %record.contract,
                    address = %record.address,
                    tx_hash = %record.tx_hash,
                    "Contract deployed"
                );
                self.state = MigrationState::Deployed(record.clone());
            }
            Err(e) => {
                tracing::error!(network = %self.profile.name, error = %e, "Migration failed");
                self.state = MigrationState::Failed(e.to_string());
            }
        }
        result
    }

    async fn deploy<R: ChainRpc>(
        &self,
        rpc: &R,
        artifact: &ContractArtifact,
    ) -> MigrationResult<DeploymentRecord> {
        let network = &self.profile.name;

        let accounts = rpc.accounts().await?;
        let deployer = *accounts
            .first()
            .ok_or_else(|| BlockchainError::NoAccounts(network.clone()))?;

        if let Some(password) = &self.password {
            tracing::info!(network = %network, account = %deployer, "Unlocking account");
            rpc.unlock_account(deployer, password, UNLOCK_DURATION).await?;
        }

        if let Some(expected) = self.profile.chain_id {
            let actual = rpc.chain_id().await?;
            if actual.0 != expected {
                return Err(BlockchainError::ChainMismatch {
                    expected,
                    actual: actual.0,
                }
                .into());
            }
        }

        tracing::info!(
            network = %network,
            contract = %artifact.contract_name,
            from = %deployer,
            gas_limit = DEPLOY_GAS_LIMIT,
            "Deploying contract"
        );
        let receipt = rpc
            .deploy(DeployRequest {
                from: deployer,
                bytecode: artifact.bytecode.clone(),
                gas_limit: DEPLOY_GAS_LIMIT,
                gas_price: self.profile.gas_price,
                chain_id: self.profile.chain_id,
            })
            .await?;

        Ok(DeploymentRecord {
            network: network.clone(),
            contract: artifact.contract_name.clone(),
            address: receipt.contract_address,
            deployer,
            tx_hash: receipt.tx_hash,
            block_number: receipt.block_number,
            chain_id: self.profile.chain_id,
            gas_limit: DEPLOY_GAS_LIMIT,
            gas_used: receipt.gas_used,
        })
    }
}
