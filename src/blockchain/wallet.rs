//! Local signers for networks that carry their own accounts.
//!
//! # Security
//! - Keys come from the resolved configuration, which reads them from the
//!   environment
//! - Keys and phrases are never logged

use alloy::signers::local::coins_bip39::English;
use alloy::signers::local::{MnemonicBuilder, PrivateKeySigner};
use alloy::signers::Signer;

use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::config::{AccountSource, Secret};

/// Parse a hex-encoded private key, with or without `0x` prefix.
pub fn signer_from_private_key(key: &Secret) -> BlockchainResult<PrivateKeySigner> {
    let raw = key.expose();
    let key_hex = raw.strip_prefix("0x").unwrap_or(raw);

    key_hex
        .parse()
        .map_err(|e| BlockchainError::Wallet(format!("Invalid private key format: {}", e)))
}

/// Derive `count` accounts from `phrase` starting at `initial_index`.
pub fn signers_from_mnemonic(
    phrase: &str,
    path: &str,
    initial_index: u32,
    count: u32,
) -> BlockchainResult<Vec<PrivateKeySigner>> {
    (initial_index..initial_index.saturating_add(count))
        .map(|index| {
            MnemonicBuilder::<English>::default()
                .phrase(phrase)
                .derivation_path(format!("{path}/{index}"))
                .and_then(|builder| builder.build())
                .map_err(|e| {
                    BlockchainError::Wallet(format!("Mnemonic derivation failed at index {index}: {e}"))
                })
        })
        .collect()
}

/// Signers for an account source, first account first.
///
/// Node-managed accounts have no local signers.
pub fn signers_for(accounts: &AccountSource) -> BlockchainResult<Vec<PrivateKeySigner>> {
    let signers = match accounts {
        AccountSource::Remote => Vec::new(),
        AccountSource::Mnemonic {
            phrase,
            path,
            initial_index,
            count,
        } => signers_from_mnemonic(phrase, path, *initial_index, *count)?,
        AccountSource::PrivateKeys { keys } => keys
            .iter()
            .map(signer_from_private_key)
            .collect::<BlockchainResult<Vec<_>>>()?,
    };

    if let Some(first) = signers.first() {
        tracing::info!(address = %first.address(), count = signers.len(), "Local signers loaded");
    }
    Ok(signers)
}
