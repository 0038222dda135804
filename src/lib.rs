//! Deployment tooling for the bridge's Ethereum contracts.

pub mod blockchain;
pub mod config;
pub mod migration;
pub mod observability;

pub use config::{resolve, Credentials, Environment, ResolvedConfig};
pub use migration::{ExecutionMode, Migration};
