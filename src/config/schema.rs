//! Configuration schema definitions.
//!
//! This module defines the resolved configuration consumed by the deployment
//! tooling. All types derive Serde traits so the resolved value can be
//! rendered as JSON for downstream build tools.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// Placeholder emitted in place of secrets when rendering redacted output.
pub const REDACTED: &str = "***";

/// A credential sourced from the environment.
///
/// The value is never printed through `Debug`. Serialization emits the raw
/// value because downstream tooling needs it; use
/// [`ResolvedConfig::redacted`] before printing.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the raw secret value.
    pub fn expose(&self) -> &str {
        &self.0
    }

    fn redact(&self) -> Self {
        Self(REDACTED.to_string())
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Root of the resolved configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedConfig {
    /// Network used when none is selected explicitly.
    pub default_network: String,

    /// Network table keyed by network name. Ordered for deterministic output.
    pub networks: BTreeMap<String, NetworkProfile>,

    /// Contract-verification service settings.
    pub etherscan: EtherscanConfig,

    /// Sourcify verification settings.
    pub sourcify: SourcifyConfig,

    /// Solidity compiler profiles; several versions coexist.
    pub compilers: Vec<CompilerProfile>,

    /// Shared directory layout.
    pub paths: PathsConfig,

    /// Contract test-runner settings.
    pub test_runner: TestRunnerConfig,
}

impl ResolvedConfig {
    /// Look up a network profile by name.
    pub fn network(&self, name: &str) -> Option<&NetworkProfile> {
        self.networks.get(name)
    }

    /// Copy of this configuration with every secret replaced by [`REDACTED`].
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        config.etherscan.api_key = config.etherscan.api_key.as_ref().map(Secret::redact);
        for profile in config.networks.values_mut() {
            if let AccountSource::PrivateKeys { keys } = &mut profile.accounts {
                for key in keys.iter_mut() {
                    *key = key.redact();
                }
            }
        }
        config
    }

    /// Serialize to pretty JSON. Output is byte-stable for equal values.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// A single deployable network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkProfile {
    /// Network name (matches its key in the network table).
    pub name: String,

    /// Where the network runs.
    pub endpoint: Endpoint,

    /// Where signing accounts come from.
    pub accounts: AccountSource,

    /// Expected chain ID, if pinned.
    pub chain_id: Option<u64>,

    /// Gas limit per transaction; `None` lets the node estimate.
    pub gas: Option<u64>,

    /// Gas price in wei; `None` lets the node decide.
    pub gas_price: Option<u128>,

    /// Guardian and governance parameters for bridge deployment scripts.
    pub deployment: Option<DeploymentConfig>,
}

impl NetworkProfile {
    /// RPC URL, or `None` for the in-process network.
    pub fn rpc_url(&self) -> Option<&str> {
        match &self.endpoint {
            Endpoint::InProcess => None,
            Endpoint::Http { url } => Some(url),
        }
    }
}

/// Network endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Endpoint {
    /// Ephemeral chain run inside the build tool. Needs no credentials.
    InProcess,
    /// JSON-RPC over HTTP(S).
    Http { url: String },
}

/// Source of the accounts used to sign transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AccountSource {
    /// Accounts managed by the node (`eth_accounts`).
    Remote,
    /// HD accounts derived from a mnemonic phrase.
    Mnemonic {
        phrase: String,
        path: String,
        initial_index: u32,
        count: u32,
    },
    /// Explicit private keys.
    PrivateKeys { keys: Vec<Secret> },
}

/// Default HD derivation prefix for Ethereum accounts.
pub const DEFAULT_HD_PATH: &str = "m/44'/60'/0'/0";

/// Number of accounts derived from a mnemonic by default.
pub const DEFAULT_HD_COUNT: u32 = 20;

impl AccountSource {
    /// Mnemonic source with the standard derivation path.
    pub fn mnemonic(phrase: impl Into<String>) -> Self {
        Self::Mnemonic {
            phrase: phrase.into(),
            path: DEFAULT_HD_PATH.to_string(),
            initial_index: 0,
            count: DEFAULT_HD_COUNT,
        }
    }
}

/// Guardian and governance parameters.
///
/// Thresholds are optional because some networks only declare one side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    pub guardian_ids: Vec<Address>,
    pub threshold: Option<u32>,
    pub governance_ids: Vec<Address>,
    pub governance_threshold: Option<u32>,
}

/// Solidity compiler profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerProfile {
    pub version: String,
    pub optimizer: OptimizerSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizerSettings {
    pub enabled: bool,
    pub runs: u32,
}

/// Contract-verification service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EtherscanConfig {
    pub api_key: Option<Secret>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcifyConfig {
    pub enabled: bool,
}

/// Project directory layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    pub sources: PathBuf,
    pub tests: PathBuf,
    pub cache: PathBuf,
    pub artifacts: PathBuf,
    /// Where migration results are recorded.
    pub deployments: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            sources: PathBuf::from("./contracts"),
            tests: PathBuf::from("./test"),
            cache: PathBuf::from("./cache"),
            artifacts: PathBuf::from("./artifacts"),
            deployments: PathBuf::from("./deployments"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRunnerConfig {
    /// Per-test timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for TestRunnerConfig {
    fn default() -> Self {
        Self { timeout_ms: 40_000 }
    }
}
