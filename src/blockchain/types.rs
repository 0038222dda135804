//! Chain-specific types and error definitions.

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash};
use alloy::rpc::types::TransactionRequest;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// No receipt arrived within the wait window.
    #[error("Transaction {tx_hash} not mined after {secs} seconds")]
    ReceiptTimeout { tx_hash: TxHash, secs: u64 },

    /// Deployment transaction was reverted on-chain.
    #[error("Transaction reverted: {0}")]
    Reverted(TxHash),

    /// Receipt carried no contract address.
    #[error("Transaction {0} created no contract")]
    NoContractAddress(TxHash),

    /// Invalid private key, mnemonic or derivation error.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// The node refused to unlock the account.
    #[error("Node refused to unlock account {0}")]
    UnlockRejected(Address),

    /// The node reported no accounts to deploy from.
    #[error("No accounts available on {0}")]
    NoAccounts(String),

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    /// Network cannot be reached over RPC.
    #[error("Blockchain not available: {0}")]
    NotAvailable(String),

    /// Contract artifact missing or malformed.
    #[error("Artifact error: {0}")]
    Artifact(String),
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// A contract-creation transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployRequest {
    pub from: Address,
    pub bytecode: Bytes,
    pub gas_limit: u64,
    /// Fixed gas price in wei; the node decides when unset.
    pub gas_price: Option<u128>,
    pub chain_id: Option<u64>,
}

impl DeployRequest {
    pub fn into_transaction(self) -> TransactionRequest {
        let mut tx = TransactionRequest::default()
            .with_from(self.from)
            .with_deploy_code(self.bytecode)
            .with_gas_limit(self.gas_limit);
        if let Some(gas_price) = self.gas_price {
            tx = tx.with_gas_price(gas_price);
        }
        if let Some(chain_id) = self.chain_id {
            tx = tx.with_chain_id(chain_id);
        }
        tx
    }
}

/// Outcome of a mined contract creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentReceipt {
    pub tx_hash: TxHash,
    pub contract_address: Address,
    pub block_number: Option<u64>,
    pub gas_used: u64,
}
