//! Environment snapshot and credentials.
//!
//! The environment is captured once into an [`Environment`] value so that
//! resolution stays a pure function of its input.

use std::collections::BTreeMap;
use std::fmt;

use crate::config::loader::{ConfigError, ConfigResult};
use crate::config::schema::Secret;

/// API key for the contract-verification service.
pub const ETHERSCAN_API_KEY_VAR: &str = "ETHERSCAN_API_KEY";

/// Signing key for the sepolia test network.
pub const SEPOLIA_KEY_VAR: &str = "SEPOLIA_KEY";

/// Password used to unlock the node-managed deployer account.
pub const ACCOUNT_PASSWORD_VAR: &str = "ACCOUNT_PASSWORD";

/// Immutable snapshot of environment variables.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    /// Capture the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(key, value)| {
                Some((key.into_string().ok()?, value.into_string().ok()?))
            })
            .collect()
    }

    /// Value of `key`. Empty values count as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    fn secret(&self, key: &str) -> Option<Secret> {
        self.get(key).map(Secret::new)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// Values may hold secrets; only names are shown.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.vars.keys()).finish()
    }
}

/// Credentials read from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub etherscan_api_key: Option<Secret>,
    pub sepolia_key: Option<Secret>,
    pub account_password: Option<Secret>,
}

impl Credentials {
    pub fn from_env(env: &Environment) -> Self {
        Self {
            etherscan_api_key: env.secret(ETHERSCAN_API_KEY_VAR),
            sepolia_key: env.secret(SEPOLIA_KEY_VAR),
            account_password: env.secret(ACCOUNT_PASSWORD_VAR),
        }
    }

    /// The account-unlock password, or a missing-credential error.
    pub fn require_account_password(&self) -> ConfigResult<&Secret> {
        self.account_password
            .as_ref()
            .ok_or(ConfigError::MissingCredential {
                variable: ACCOUNT_PASSWORD_VAR,
            })
    }
}
