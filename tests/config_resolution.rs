//! Configuration resolution properties.

use std::io::Write;

use bridge_deploy::config::loader::{load_overrides, ConfigError, Overrides};
use bridge_deploy::config::{resolve, AccountSource, Endpoint, Environment};

const SEPOLIA_KEY: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

fn env(vars: &[(&str, &str)]) -> Environment {
    vars.iter().copied().collect()
}

#[test]
fn test_sepolia_absent_without_key() {
    let variations = [
        env(&[]),
        env(&[("SEPOLIA_KEY", "")]),
        env(&[("ETHERSCAN_API_KEY", "key"), ("ACCOUNT_PASSWORD", "pw")]),
        env(&[("SEPOLIA_KEYS", SEPOLIA_KEY)]),
    ];

    for environment in &variations {
        let config = resolve(environment, &Overrides::default()).unwrap();
        assert!(
            !config.networks.contains_key("sepolia"),
            "sepolia present for {:?}",
            environment
        );
    }
}

#[test]
fn test_sepolia_governance_threshold_is_one() {
    for key in [SEPOLIA_KEY, "not-even-hex", "0x01"] {
        let config = resolve(&env(&[("SEPOLIA_KEY", key)]), &Overrides::default()).unwrap();
        let sepolia = config.network("sepolia").expect("sepolia declared");

        let deployment = sepolia.deployment.as_ref().unwrap();
        assert_eq!(deployment.governance_threshold, Some(1));
        assert_eq!(deployment.governance_ids.len(), 1);
        match &sepolia.accounts {
            AccountSource::PrivateKeys { keys } => assert_eq!(keys[0].expose(), key),
            other => panic!("unexpected accounts {:?}", other),
        }
    }
}

#[test]
fn test_every_network_satisfies_quorum_invariants() {
    let config = resolve(&env(&[("SEPOLIA_KEY", SEPOLIA_KEY)]), &Overrides::default()).unwrap();

    for profile in config.networks.values() {
        let Some(deployment) = &profile.deployment else {
            continue;
        };
        if let Some(threshold) = deployment.threshold {
            assert!(threshold as usize <= deployment.guardian_ids.len(), "{}", profile.name);
        }
        if let Some(threshold) = deployment.governance_threshold {
            assert!(threshold as usize <= deployment.governance_ids.len(), "{}", profile.name);
        }
    }
}

#[test]
fn test_resolution_is_deterministic() {
    let environment = env(&[
        ("SEPOLIA_KEY", SEPOLIA_KEY),
        ("ETHERSCAN_API_KEY", "key"),
        ("UNRELATED", "value"),
    ]);

    let first = resolve(&environment, &Overrides::default()).unwrap();
    let second = resolve(&environment, &Overrides::default()).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

#[test]
fn test_hardhat_always_present_and_default() {
    let config = resolve(&env(&[]), &Overrides::default()).unwrap();
    let hardhat = config.network(&config.default_network).unwrap();
    assert_eq!(hardhat.name, "hardhat");
    assert_eq!(hardhat.endpoint, Endpoint::InProcess);
}

#[test]
fn test_redacted_output_hides_secrets() {
    let environment = env(&[("SEPOLIA_KEY", SEPOLIA_KEY), ("ETHERSCAN_API_KEY", "apikey123")]);
    let config = resolve(&environment, &Overrides::default()).unwrap();

    let json = config.redacted().to_json().unwrap();
    assert!(!json.contains(SEPOLIA_KEY));
    assert!(!json.contains("apikey123"));

    let raw = config.to_json().unwrap();
    assert!(raw.contains(SEPOLIA_KEY));
}

#[test]
fn test_file_overrides_merge_over_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[networks.development]
url = "http://10.1.2.3:8545"
chain_id = 1337

[networks.bridgenet.deployment]
governance_threshold = 3
"#
    )
    .unwrap();

    let overrides = load_overrides(file.path()).unwrap();
    let config = resolve(&env(&[]), &overrides).unwrap();

    let development = config.network("development").unwrap();
    assert_eq!(development.rpc_url(), Some("http://10.1.2.3:8545"));
    assert_eq!(development.chain_id, Some(1337));
    assert_eq!(development.gas, Some(25_000_000));

    let bridgenet = config.network("bridgenet").unwrap();
    let deployment = bridgenet.deployment.as_ref().unwrap();
    assert_eq!(deployment.governance_threshold, Some(3));
    assert_eq!(deployment.threshold, Some(2));
}

#[test]
fn test_overrides_violating_quorum_are_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[networks.development.deployment]
guardian_ids = ["0x05501355922a6529670DB49158676D98D6c34245"]
"#
    )
    .unwrap();

    let overrides = load_overrides(file.path()).unwrap();
    match resolve(&env(&[]), &overrides) {
        Err(ConfigError::Validation(errors)) => {
            assert_eq!(errors.len(), 1);
            assert!(errors[0].to_string().contains("threshold 2 exceeds 1 members"));
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
}

#[test]
fn test_file_gas_price_override() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[networks.bridgenet]
gas_price = 35000000000
"#
    )
    .unwrap();

    let overrides = load_overrides(file.path()).unwrap();
    let config = resolve(&env(&[]), &overrides).unwrap();

    let bridgenet = config.network("bridgenet").unwrap();
    assert_eq!(bridgenet.gas_price, Some(35_000_000_000));
    assert_eq!(bridgenet.gas, Some(25_000_000));
}

#[test]
fn test_hardhat_stays_in_process() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[networks.hardhat]\nurl = \"http://10.1.2.3:8545\"").unwrap();

    let overrides = load_overrides(file.path()).unwrap();
    match resolve(&env(&[]), &overrides) {
        Err(ConfigError::Validation(errors)) => {
            assert_eq!(errors.len(), 1);
            assert!(errors[0].to_string().contains("runs in-process"));
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
}
