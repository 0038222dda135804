//! Built-in network table.

use alloy::primitives::{address, Address};

use crate::config::schema::{AccountSource, DeploymentConfig, Endpoint, NetworkProfile, Secret};

/// The account derived first from this mnemonic is
/// 0xEe88da44b4901d7F86970c52dC5139Af80C83edD, pre-funded locally and on bridgenet.
pub const DEV_MNEMONIC: &str =
    "harsh master island dirt equip search awesome double turn crush wool grant";

pub const HARDHAT: &str = "hardhat";
pub const DEVELOPMENT: &str = "development";
pub const BRIDGENET: &str = "bridgenet";
pub const SEPOLIA: &str = "sepolia";

/// Every network name this tool knows, whether or not it is active.
pub const KNOWN_NETWORKS: [&str; 4] = [HARDHAT, DEVELOPMENT, BRIDGENET, SEPOLIA];

const DEVELOPMENT_URL: &str = "http://127.0.0.1:8545";
const BRIDGENET_URL: &str = "https://rpc-eth-bridgenet.dev.azero.dev";
const SEPOLIA_URL: &str = "https://ethereum-sepolia-rpc.publicnode.com";

const BRIDGENET_CHAIN_ID: u64 = 12_345;
const DEV_GAS_LIMIT: u64 = 25_000_000;
const DEV_GAS_PRICE: u128 = 20_000_000_000;

const DEV_COMMITTEE: [Address; 3] = [
    address!("0x05501355922a6529670DB49158676D98D6c34245"),
    address!("0x084321C892ebb289dA2131d18a39fdfC3CCC0D2C"),
    address!("0xd7a898720ab24ae154d67f51F2F75341D2A3719f"),
];

/// Governance account matching the sepolia signing key.
const SEPOLIA_GOVERNANCE: Address = address!("0xc4E0B92Df2DE77C077D060e49ec63DC196980716");

fn dev_deployment() -> DeploymentConfig {
    DeploymentConfig {
        guardian_ids: DEV_COMMITTEE.to_vec(),
        threshold: Some(2),
        governance_ids: DEV_COMMITTEE.to_vec(),
        governance_threshold: Some(2),
    }
}

pub fn hardhat() -> NetworkProfile {
    NetworkProfile {
        name: HARDHAT.to_string(),
        endpoint: Endpoint::InProcess,
        accounts: AccountSource::mnemonic(DEV_MNEMONIC),
        chain_id: None,
        gas: None,
        gas_price: None,
        deployment: None,
    }
}

pub fn development() -> NetworkProfile {
    NetworkProfile {
        name: DEVELOPMENT.to_string(),
        endpoint: Endpoint::Http {
            url: DEVELOPMENT_URL.to_string(),
        },
        accounts: AccountSource::mnemonic(DEV_MNEMONIC),
        chain_id: None,
        gas: Some(DEV_GAS_LIMIT),
        gas_price: Some(DEV_GAS_PRICE),
        deployment: Some(dev_deployment()),
    }
}

pub fn bridgenet() -> NetworkProfile {
    NetworkProfile {
        name: BRIDGENET.to_string(),
        endpoint: Endpoint::Http {
            url: BRIDGENET_URL.to_string(),
        },
        accounts: AccountSource::mnemonic(DEV_MNEMONIC),
        chain_id: Some(BRIDGENET_CHAIN_ID),
        gas: Some(DEV_GAS_LIMIT),
        gas_price: Some(DEV_GAS_PRICE),
        deployment: Some(dev_deployment()),
    }
}

/// Sepolia signs with the supplied key only.
pub fn sepolia(key: Secret) -> NetworkProfile {
    NetworkProfile {
        name: SEPOLIA.to_string(),
        endpoint: Endpoint::Http {
            url: SEPOLIA_URL.to_string(),
        },
        accounts: AccountSource::PrivateKeys { keys: vec![key] },
        chain_id: None,
        gas: None,
        gas_price: None,
        deployment: Some(DeploymentConfig {
            guardian_ids: Vec::new(),
            threshold: None,
            governance_ids: vec![SEPOLIA_GOVERNANCE],
            governance_threshold: Some(1),
        }),
    }
}
