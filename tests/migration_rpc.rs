//! Migration against a mock JSON-RPC node.

use std::collections::BTreeMap;
use std::time::Duration;

use alloy::primitives::{Address, Bytes};
use bridge_deploy::blockchain::{BlockchainError, ChainRpc, ContractArtifact, RpcClient, RpcSettings};
use bridge_deploy::config::loader::{NetworkOverrides, Overrides};
use bridge_deploy::config::{resolve, ConfigError, Credentials, Environment, ResolvedConfig, Secret};
use bridge_deploy::migration::{ExecutionMode, Migration, MigrationError, UNLOCK_DURATION};

mod common;
use common::{MockNode, CREATED_CONTRACT, NODE_ACCOUNT};

fn settings() -> RpcSettings {
    RpcSettings {
        timeout_secs: 5,
        receipt_timeout_secs: 5,
        poll_interval: Duration::from_millis(20),
    }
}

/// Resolve with `development` pointed at the mock node.
fn config_for(node: &MockNode, env: &Environment) -> ResolvedConfig {
    let mut networks = BTreeMap::new();
    networks.insert(
        "development".to_string(),
        NetworkOverrides {
            url: Some(node.url.clone()),
            ..Default::default()
        },
    );
    resolve(env, &Overrides { networks }).unwrap()
}

fn artifact() -> ContractArtifact {
    ContractArtifact {
        contract_name: "Migrations".into(),
        bytecode: Bytes::from_static(&[0x60, 0x80, 0x60, 0x40, 0x52]),
    }
}

#[tokio::test]
async fn test_missing_password_never_reaches_node() {
    let node = MockNode::start().await;
    let env = Environment::default();
    let config = config_for(&node, &env);

    let result = Migration::prepare(
        &config,
        &Credentials::from_env(&env),
        "development",
        ExecutionMode::NodeManaged,
    );

    match result {
        Err(MigrationError::Config(ConfigError::MissingCredential { variable })) => {
            assert_eq!(variable, "ACCOUNT_PASSWORD");
        }
        other => panic!("expected missing credential, got {:?}", other),
    }
    assert!(node.calls().is_empty());
}

#[tokio::test]
async fn test_client_lists_node_accounts() {
    let node = MockNode::start().await;
    let config = config_for(&node, &Environment::default());
    let client = RpcClient::connect(config.network("development").unwrap(), settings()).unwrap();

    let accounts = client.accounts().await.unwrap();
    assert_eq!(accounts, vec![NODE_ACCOUNT.parse::<Address>().unwrap()]);
    assert_eq!(node.methods(), vec!["eth_accounts"]);
}

#[tokio::test]
async fn test_unlock_sends_password_and_duration() {
    let node = MockNode::start().await;
    let config = config_for(&node, &Environment::default());
    let client = RpcClient::connect(config.network("development").unwrap(), settings()).unwrap();
    let account: Address = NODE_ACCOUNT.parse().unwrap();

    client
        .unlock_account(account, &Secret::new("pw"), UNLOCK_DURATION)
        .await
        .unwrap();

    let calls = node.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, "personal_unlockAccount");
    assert_eq!(calls[0].params[0].as_str().unwrap().to_lowercase(), NODE_ACCOUNT);
    assert_eq!(calls[0].params[1], "pw");
    assert_eq!(calls[0].params[2], 36_000);
}

#[tokio::test]
async fn test_unlock_refused_by_node() {
    let node = MockNode::start_with_unlock(false).await;
    let config = config_for(&node, &Environment::default());
    let client = RpcClient::connect(config.network("development").unwrap(), settings()).unwrap();

    let err = client
        .unlock_account(Address::ZERO, &Secret::new("bad"), UNLOCK_DURATION)
        .await
        .unwrap_err();
    assert!(matches!(err, BlockchainError::UnlockRejected(_)));
}

#[tokio::test]
async fn test_migration_unlocks_once_and_deploys_once() {
    let node = MockNode::start().await;
    let env: Environment = [("ACCOUNT_PASSWORD", "pw")].into_iter().collect();
    let config = config_for(&node, &env);

    let mut migration = Migration::prepare(
        &config,
        &Credentials::from_env(&env),
        "development",
        ExecutionMode::NodeManaged,
    )
    .unwrap();
    let client = migration.connect(settings()).unwrap();

    let record = migration.execute(&client, &artifact()).await.unwrap();

    assert_eq!(node.count("personal_unlockAccount"), 1);
    assert_eq!(node.count("eth_sendTransaction"), 1);

    let send = node
        .calls()
        .into_iter()
        .find(|c| c.method == "eth_sendTransaction")
        .unwrap();
    let tx = &send.params[0];
    assert_eq!(tx["gas"], "0x5b8d80");
    assert_eq!(tx["from"].as_str().unwrap().to_lowercase(), NODE_ACCOUNT);
    assert!(tx.get("to").map_or(true, |to| to.is_null()));

    assert_eq!(record.address, CREATED_CONTRACT.parse::<Address>().unwrap());
    assert_eq!(record.gas_limit, 6_000_000);
    assert_eq!(record.block_number, Some(1));
}
