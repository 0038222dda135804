//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! NetworkProfile (resolved config)
//!     → wallet.rs (local signers from mnemonic or keys)
//!     → client.rs (RPC connection with timeouts)
//!     → rpc.rs (operations the migration runner calls)
//! artifacts directory
//!     → artifact.rs (creation bytecode)
//! ```
//!
//! # Security Constraints
//! - Private keys and passwords are never logged
//! - All RPC calls have configurable timeouts
//! - Failures propagate; nothing is retried

pub mod artifact;
pub mod client;
pub mod rpc;
pub mod types;
pub mod wallet;

pub use artifact::ContractArtifact;
pub use client::{RpcClient, RpcSettings};
pub use rpc::ChainRpc;
pub use types::{BlockchainError, BlockchainResult, ChainId, DeployRequest, DeploymentReceipt};
