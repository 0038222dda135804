//! The RPC operations a migration needs from a node.

use std::time::Duration;

use alloy::primitives::Address;

use crate::blockchain::types::{BlockchainResult, ChainId, DeployRequest, DeploymentReceipt};
use crate::config::Secret;

/// Node operations used by the migration runner.
///
/// Implemented by [`RpcClient`](crate::blockchain::RpcClient) for real
/// endpoints. Every call is a single request; failures are not retried.
#[allow(async_fn_in_trait)]
pub trait ChainRpc {
    /// Accounts available for signing, first account first.
    async fn accounts(&self) -> BlockchainResult<Vec<Address>>;

    /// Chain ID reported by the node.
    async fn chain_id(&self) -> BlockchainResult<ChainId>;

    /// Unlock a node-managed account for `duration`.
    async fn unlock_account(
        &self,
        account: Address,
        password: &Secret,
        duration: Duration,
    ) -> BlockchainResult<()>;

    /// Submit a contract creation and wait until it is mined.
    async fn deploy(&self, request: DeployRequest) -> BlockchainResult<DeploymentReceipt>;
}
