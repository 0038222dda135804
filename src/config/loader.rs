//! Configuration overrides loading from disk.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use alloy::primitives::Address;
use serde::Deserialize;
use thiserror::Error;

use crate::config::schema::{DeploymentConfig, Endpoint, NetworkProfile};
use crate::config::validation::ValidationError;

/// Overrides file picked up from the working directory when present.
pub const DEFAULT_OVERRIDES_PATH: &str = "bridge-deploy.toml";

/// Error type for configuration loading and resolution.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("unknown network '{0}'")]
    UnknownNetwork(String),

    #[error("missing required credential: {variable} is not set")]
    MissingCredential { variable: &'static str },
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Per-network overrides read from a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Overrides {
    pub networks: BTreeMap<String, NetworkOverrides>,
}

/// Fields a file may override on one network. Absent fields keep defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkOverrides {
    pub url: Option<String>,
    pub chain_id: Option<u64>,
    pub gas: Option<u64>,
    /// Wei. TOML integers are 64-bit, so the override is narrower than the profile field.
    pub gas_price: Option<u64>,
    pub deployment: Option<DeploymentOverrides>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeploymentOverrides {
    pub guardian_ids: Option<Vec<Address>>,
    pub threshold: Option<u32>,
    pub governance_ids: Option<Vec<Address>>,
    pub governance_threshold: Option<u32>,
}

impl NetworkOverrides {
    /// Merge these overrides over `profile`.
    pub fn apply(&self, profile: &mut NetworkProfile) {
        if let Some(url) = &self.url {
            profile.endpoint = Endpoint::Http { url: url.clone() };
        }
        if let Some(chain_id) = self.chain_id {
            profile.chain_id = Some(chain_id);
        }
        if let Some(gas) = self.gas {
            profile.gas = Some(gas);
        }
        if let Some(gas_price) = self.gas_price {
            profile.gas_price = Some(u128::from(gas_price));
        }
        if let Some(deployment) = &self.deployment {
            deployment.apply(profile.deployment.get_or_insert_with(DeploymentConfig::default));
        }
    }
}

impl DeploymentOverrides {
    pub fn apply(&self, config: &mut DeploymentConfig) {
        if let Some(ids) = &self.guardian_ids {
            config.guardian_ids = ids.clone();
        }
        if let Some(threshold) = self.threshold {
            config.threshold = Some(threshold);
        }
        if let Some(ids) = &self.governance_ids {
            config.governance_ids = ids.clone();
        }
        if let Some(threshold) = self.governance_threshold {
            config.governance_threshold = Some(threshold);
        }
    }
}

/// Parse overrides from TOML text.
pub fn parse_overrides(content: &str) -> ConfigResult<Overrides> {
    Ok(toml::from_str(content)?)
}

/// Load overrides from a TOML file.
pub fn load_overrides(path: &Path) -> ConfigResult<Overrides> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_overrides(&content)
}

/// Load overrides from `path` if the file exists, otherwise return none.
pub fn load_overrides_if_present(path: &Path) -> ConfigResult<Overrides> {
    if path.exists() {
        tracing::debug!(path = %path.display(), "Loading configuration overrides");
        load_overrides(path)
    } else {
        Ok(Overrides::default())
    }
}
