//! Resolution of the environment into an immutable configuration.
//!
//! `resolve` is a pure function: the same environment and overrides always
//! produce an equal value, and the network table is ordered so serialized
//! output is byte-identical across runs.

use std::collections::BTreeMap;

use crate::config::env::Credentials;
use crate::config::env::Environment;
use crate::config::loader::{ConfigError, ConfigResult, Overrides};
use crate::config::networks;
use crate::config::schema::{
    CompilerProfile, Endpoint, EtherscanConfig, NetworkProfile, OptimizerSettings, PathsConfig,
    ResolvedConfig, SourcifyConfig, TestRunnerConfig,
};
use crate::config::validation::{validate_config, ValidationError};

const OPTIMIZER_RUNS: u32 = 200;

/// Compiler versions used by the contract set, newest first.
const COMPILER_VERSIONS: [&str; 2] = ["0.8.20", "0.4.18"];

/// Build the built-in network table for this environment.
///
/// Networks that need a credential are present only when it is supplied.
pub fn builtin_networks(credentials: &Credentials) -> BTreeMap<String, NetworkProfile> {
    let mut profiles = vec![
        networks::hardhat(),
        networks::development(),
        networks::bridgenet(),
    ];
    if let Some(key) = &credentials.sepolia_key {
        profiles.push(networks::sepolia(key.clone()));
    }

    profiles
        .into_iter()
        .map(|profile| (profile.name.clone(), profile))
        .collect()
}

fn compilers() -> Vec<CompilerProfile> {
    COMPILER_VERSIONS
        .iter()
        .map(|version| CompilerProfile {
            version: version.to_string(),
            optimizer: OptimizerSettings {
                enabled: true,
                runs: OPTIMIZER_RUNS,
            },
        })
        .collect()
}

/// Resolve and validate the configuration.
pub fn resolve(env: &Environment, overrides: &Overrides) -> ConfigResult<ResolvedConfig> {
    let credentials = Credentials::from_env(env);
    let mut table = builtin_networks(&credentials);
    let mut errors = Vec::new();

    for (name, network_overrides) in &overrides.networks {
        if !networks::KNOWN_NETWORKS.contains(&name.as_str()) {
            errors.push(ValidationError::UnknownOverrideNetwork(name.clone()));
            continue;
        }
        // Inactive networks (sepolia without its key) stay omitted.
        let Some(profile) = table.get_mut(name) else {
            continue;
        };
        if network_overrides.url.is_some() && profile.endpoint == Endpoint::InProcess {
            errors.push(ValidationError::InProcessUrlOverride {
                network: name.clone(),
            });
            continue;
        }
        network_overrides.apply(profile);
    }

    let config = ResolvedConfig {
        default_network: networks::HARDHAT.to_string(),
        networks: table,
        etherscan: EtherscanConfig {
            api_key: credentials.etherscan_api_key,
        },
        sourcify: SourcifyConfig { enabled: true },
        compilers: compilers(),
        paths: PathsConfig::default(),
        test_runner: TestRunnerConfig::default(),
    };

    if let Err(mut validation) = validate_config(&config) {
        errors.append(&mut validation);
    }
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors));
    }

    tracing::debug!(
        networks = ?config.networks.keys().collect::<Vec<_>>(),
        "Configuration resolved"
    );
    Ok(config)
}
