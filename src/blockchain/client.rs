//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to a network's JSON-RPC endpoint
//! - Unlock node-managed accounts
//! - Submit contract creations and wait for their receipts
//! - Bound every request with a timeout

use std::borrow::Cow;
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use alloy::network::EthereumWallet;
use alloy::primitives::{Address, TxHash};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;
use alloy::transports::TransportResult;
use tokio::time::{interval, timeout};

use crate::blockchain::rpc::ChainRpc;
use crate::blockchain::types::{
    BlockchainError, BlockchainResult, ChainId, DeployRequest, DeploymentReceipt,
};
use crate::config::{NetworkProfile, Secret};
use crate::observability::metrics;

/// Timing knobs for RPC access.
#[derive(Debug, Clone)]
pub struct RpcSettings {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// How long to wait for a deployment to be mined.
    pub receipt_timeout_secs: u64,
    /// Receipt polling interval.
    pub poll_interval: Duration,
}

impl Default for RpcSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            receipt_timeout_secs: 300,
            poll_interval: Duration::from_secs(2),
        }
    }
}

/// JSON-RPC client for a single network.
#[derive(Clone)]
pub struct RpcClient {
    provider: Arc<dyn Provider + Send + Sync>,
    rpc_url: String,
    /// Addresses of locally held signers; empty when the node manages accounts.
    local_accounts: Vec<Address>,
    settings: RpcSettings,
}

impl RpcClient {
    /// Client for a node that manages its own accounts.
    ///
    /// No request is made until the first call.
    pub fn connect(profile: &NetworkProfile, settings: RpcSettings) -> BlockchainResult<Self> {
        let url = rpc_url(profile)?;
        let provider = ProviderBuilder::new().connect_http(url.clone());

        tracing::info!(network = %profile.name, rpc_url = %url, "RPC client created");
        Ok(Self {
            provider: Arc::new(provider),
            rpc_url: url.to_string(),
            local_accounts: Vec::new(),
            settings,
        })
    }

    /// Client that signs locally with `signers`, first signer first.
    pub fn connect_with_signers(
        profile: &NetworkProfile,
        signers: Vec<PrivateKeySigner>,
        settings: RpcSettings,
    ) -> BlockchainResult<Self> {
        let url = rpc_url(profile)?;
        let mut signers = signers.into_iter();
        let first = signers
            .next()
            .ok_or_else(|| BlockchainError::NoAccounts(profile.name.clone()))?;

        let mut local_accounts = vec![first.address()];
        let mut wallet = EthereumWallet::from(first);
        for signer in signers {
            local_accounts.push(signer.address());
            wallet.register_signer(signer);
        }

        let provider = ProviderBuilder::new().wallet(wallet).connect_http(url.clone());

        tracing::info!(
            network = %profile.name,
            rpc_url = %url,
            accounts = local_accounts.len(),
            "RPC client created with local signers"
        );
        Ok(Self {
            provider: Arc::new(provider),
            rpc_url: url.to_string(),
            local_accounts,
            settings,
        })
    }

    fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.settings.timeout_secs)
    }

    /// Run one request under the configured timeout.
    async fn call<T, F>(&self, method: &'static str, request: F) -> BlockchainResult<T>
    where
        F: IntoFuture<Output = TransportResult<T>>,
    {
        let outcome = match timeout(self.timeout_duration(), request).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(BlockchainError::Rpc(format!("{method}: {e}"))),
            Err(_) => Err(BlockchainError::Timeout(self.settings.timeout_secs)),
        };

        metrics::record_rpc_call(method, outcome.is_ok());
        if let Err(e) = &outcome {
            tracing::warn!(method, rpc_url = %self.rpc_url, error = %e, "RPC call failed");
        }
        outcome
    }

    /// Poll for the receipt of `tx_hash` until it is mined.
    async fn wait_for_receipt(&self, tx_hash: TxHash) -> BlockchainResult<DeploymentReceipt> {
        let wait = Duration::from_secs(self.settings.receipt_timeout_secs);

        let result = timeout(wait, async {
            let mut ticker = interval(self.settings.poll_interval);

            loop {
                ticker.tick().await;

                let receipt = match self
                    .call(
                        "eth_getTransactionReceipt",
                        self.provider.get_transaction_receipt(tx_hash),
                    )
                    .await?
                {
                    Some(r) => r,
                    None => {
                        tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                        continue;
                    }
                };

                if !receipt.status() {
                    return Err(BlockchainError::Reverted(tx_hash));
                }
                let contract_address = receipt
                    .contract_address
                    .ok_or(BlockchainError::NoContractAddress(tx_hash))?;

                return Ok(DeploymentReceipt {
                    tx_hash,
                    contract_address,
                    block_number: receipt.block_number,
                    gas_used: receipt.gas_used,
                });
            }
        })
        .await;

        match result {
            Ok(receipt) => receipt,
            Err(_) => Err(BlockchainError::ReceiptTimeout {
                tx_hash,
                secs: self.settings.receipt_timeout_secs,
            }),
        }
    }

    /// The endpoint this client talks to.
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }
}

fn rpc_url(profile: &NetworkProfile) -> BlockchainResult<url::Url> {
    let raw = profile.rpc_url().ok_or_else(|| {
        BlockchainError::NotAvailable(format!(
            "network '{}' runs in-process and has no RPC endpoint",
            profile.name
        ))
    })?;
    raw.parse()
        .map_err(|e| BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", raw, e)))
}

impl ChainRpc for RpcClient {
    async fn accounts(&self) -> BlockchainResult<Vec<Address>> {
        if !self.local_accounts.is_empty() {
            return Ok(self.local_accounts.clone());
        }
        self.call("eth_accounts", self.provider.get_accounts()).await
    }

    async fn chain_id(&self) -> BlockchainResult<ChainId> {
        self.call("eth_chainId", self.provider.get_chain_id())
            .await
            .map(ChainId)
    }

    async fn unlock_account(
        &self,
        account: Address,
        password: &Secret,
        duration: Duration,
    ) -> BlockchainResult<()> {
        let params =
            serde_json::value::to_raw_value(&(account, password.expose(), duration.as_secs()))
                .map_err(|e| BlockchainError::Rpc(format!("personal_unlockAccount: {e}")))?;

        let raw = self
            .call(
                "personal_unlockAccount",
                self.provider
                    .raw_request_dyn(Cow::Borrowed("personal_unlockAccount"), &params),
            )
            .await?;

        let unlocked: bool = serde_json::from_str(raw.get()).map_err(|e| {
            BlockchainError::Rpc(format!("personal_unlockAccount: unexpected result: {e}"))
        })?;
        if !unlocked {
            return Err(BlockchainError::UnlockRejected(account));
        }
        Ok(())
    }

    async fn deploy(&self, request: DeployRequest) -> BlockchainResult<DeploymentReceipt> {
        let from = request.from;
        let pending = self
            .call("eth_sendTransaction", self.provider.send_transaction(request.into_transaction()))
            .await?;
        let tx_hash = *pending.tx_hash();

        tracing::info!(tx_hash = %tx_hash, from = %from, "Deployment transaction submitted");
        self.wait_for_receipt(tx_hash).await
    }
}

impl std::fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient")
            .field("rpc_url", &self.rpc_url)
            .field("local_accounts", &self.local_accounts)
            .field("timeout_secs", &self.settings.timeout_secs)
            .finish()
    }
}
