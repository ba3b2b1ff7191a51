//! Configuration file handling.

use std::fs;
use tempfile::TempDir;
use w3t_config::*;

#[test]
fn partial_file_keeps_defaults() {
    let config = TerminalConfig::from_toml(
        r#"
        [explorer]
        default_network = "base"

        [wallet]
        provider_url = "http://127.0.0.1:1248"
        "#,
    )
    .unwrap();

    assert_eq!(config.explorer.default_network, "base");
    assert_eq!(config.explorer.timeout_secs, DEFAULT_TIMEOUT_SECS);
    assert_eq!(config.explorer.ens_api_url, DEFAULT_ENS_API_URL);
    assert_eq!(
        config.wallet.provider_url.as_deref(),
        Some("http://127.0.0.1:1248")
    );
    assert_eq!(config.wallet.timeout_secs, DEFAULT_WALLET_TIMEOUT_SECS);
    assert_eq!(config.console, ConsoleConfig::default());
}

#[test]
fn extra_networks_are_parsed() {
    let config = TerminalConfig::from_toml(
        r#"
        [console]
        profile = "explorer"

        [[explorer.networks]]
        key = "scroll"
        name = "Scroll"
        url = "https://scroll.blockscout.com"
        symbol = "ETH"
        chain_id = 534352
        is_l2 = true
        "#,
    )
    .unwrap();

    assert_eq!(config.console.profile, Profile::Explorer);
    assert_eq!(config.explorer.networks.len(), 1);
    let network = &config.explorer.networks[0];
    assert_eq!(network.key, "scroll");
    assert_eq!(network.chain_id, 534352);
    assert!(network.is_l2);
    assert!(network.api_url.is_none());
}

#[test]
fn duplicate_network_keys_are_rejected() {
    let err = TerminalConfig::from_toml(
        r#"
        [[explorer.networks]]
        key = "dev"
        name = "Dev"
        url = "http://localhost:4000"
        symbol = "ETH"
        chain_id = 1337

        [[explorer.networks]]
        key = "DEV"
        name = "Dev again"
        url = "http://localhost:4001"
        symbol = "ETH"
        chain_id = 1338
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(ref msg) if msg.contains("more than once")));
}

#[test]
fn bad_urls_are_rejected() {
    let err = TerminalConfig::from_toml(
        r#"
        [wallet]
        provider_url = "ws://127.0.0.1:1248"
        "#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("wallet.provider_url"));

    let err = TerminalConfig::from_toml(
        r#"
        [market]
        api_url = "not a url"
        "#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("market.api_url"));
}

#[test]
fn syntax_errors_name_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[console\nprompt = 1").unwrap();

    let err = TerminalConfig::load(&path).unwrap_err();
    match err {
        ConfigError::Parse { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    assert!(matches!(
        TerminalConfig::load_or_default(Some(&path)),
        Err(ConfigError::Io { .. })
    ));
}

#[test]
fn save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

    let mut config = TerminalConfig::default();
    config.console.prompt = "eth>".to_string();
    config.wallet.provider_url = Some("http://127.0.0.1:8545".to_string());
    config.explorer.networks.push(ExplorerNetworkConfig {
        key: "local".to_string(),
        name: "Local Blockscout".to_string(),
        url: "http://localhost:4000".to_string(),
        api_url: Some("http://localhost:4000/api/v2".to_string()),
        symbol: "ETH".to_string(),
        chain_id: 31337,
        is_l2: false,
    });
    config.save(&path).unwrap();

    let loaded = TerminalConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}
