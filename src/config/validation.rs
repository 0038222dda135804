//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Enforce quorum invariants: a threshold never exceeds its member set
//! - Validate RPC URLs and account sources
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ResolvedConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is handed to the migration runner

use std::collections::BTreeSet;

use alloy::primitives::Address;
use thiserror::Error;

use crate::config::schema::{AccountSource, DeploymentConfig, Endpoint, NetworkProfile, ResolvedConfig};

/// A single semantic problem in the resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("default network '{0}' is not declared")]
    UnknownDefaultNetwork(String),

    #[error("overrides reference unknown network '{0}'")]
    UnknownOverrideNetwork(String),

    #[error("network key '{key}' does not match profile name '{name}'")]
    NameMismatch { key: String, name: String },

    #[error("network '{network}': invalid RPC URL '{url}': {reason}")]
    InvalidUrl {
        network: String,
        url: String,
        reason: String,
    },

    #[error("network '{network}': {field} {threshold} exceeds {members} members")]
    ThresholdTooHigh {
        network: String,
        field: &'static str,
        threshold: u32,
        members: usize,
    },

    #[error("network '{network}': {field} must be at least 1")]
    ZeroThreshold { network: String, field: &'static str },

    #[error("network '{network}': duplicate address {address} in {field}")]
    DuplicateMember {
        network: String,
        field: &'static str,
        address: Address,
    },

    #[error("network '{network}': no accounts configured")]
    NoAccounts { network: String },

    #[error("network '{network}': gas limit must be positive")]
    ZeroGas { network: String },

    #[error("network '{network}' runs in-process; its url cannot be overridden")]
    InProcessUrlOverride { network: String },
}

/// Validate the full resolved configuration.
pub fn validate_config(config: &ResolvedConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !config.networks.contains_key(&config.default_network) {
        errors.push(ValidationError::UnknownDefaultNetwork(
            config.default_network.clone(),
        ));
    }

    for (key, profile) in &config.networks {
        if key != &profile.name {
            errors.push(ValidationError::NameMismatch {
                key: key.clone(),
                name: profile.name.clone(),
            });
        }
        validate_network(profile, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_network(profile: &NetworkProfile, errors: &mut Vec<ValidationError>) {
    let network = &profile.name;

    if let Endpoint::Http { url } = &profile.endpoint {
        match url::Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => errors.push(ValidationError::InvalidUrl {
                network: network.clone(),
                url: url.clone(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            }),
            Err(e) => errors.push(ValidationError::InvalidUrl {
                network: network.clone(),
                url: url.clone(),
                reason: e.to_string(),
            }),
        }
    }

    let has_accounts = match &profile.accounts {
        AccountSource::Remote => true,
        AccountSource::Mnemonic { count, .. } => *count > 0,
        AccountSource::PrivateKeys { keys } => !keys.is_empty(),
    };
    if !has_accounts {
        errors.push(ValidationError::NoAccounts {
            network: network.clone(),
        });
    }

    if profile.gas == Some(0) {
        errors.push(ValidationError::ZeroGas {
            network: network.clone(),
        });
    }

    if let Some(deployment) = &profile.deployment {
        validate_deployment(network, deployment, errors);
    }
}

fn validate_deployment(network: &str, config: &DeploymentConfig, errors: &mut Vec<ValidationError>) {
    check_quorum(network, "threshold", config.threshold, &config.guardian_ids, errors);
    check_quorum(
        network,
        "governance_threshold",
        config.governance_threshold,
        &config.governance_ids,
        errors,
    );
}

fn check_quorum(
    network: &str,
    field: &'static str,
    threshold: Option<u32>,
    members: &[Address],
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = BTreeSet::new();
    for address in members {
        if !seen.insert(address) {
            errors.push(ValidationError::DuplicateMember {
                network: network.to_string(),
                field,
                address: *address,
            });
        }
    }

    let Some(threshold) = threshold else {
        return;
    };
    if threshold == 0 {
        errors.push(ValidationError::ZeroThreshold {
            network: network.to_string(),
            field,
        });
    } else if threshold as usize > seen.len() {
        errors.push(ValidationError::ThresholdTooHigh {
            network: network.to_string(),
            field,
            threshold,
            members: seen.len(),
        });
    }
}
