//! The full command set against mock explorer, price and wallet servers.

use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use w3t_cli::build_console;
use w3t_cli::commands::CLEAR_SEQUENCE;
use w3t_config::{ExplorerNetworkConfig, Profile, TerminalConfig};

const ACCOUNT: &str = "0x1111111111111111111111111111111111111111";

/// Every remote endpoint points at `server`; the default network is a local
/// Blockscout with chain id 1337.
fn config_for(server: &ServerGuard, profile: Profile) -> TerminalConfig {
    let mut config = TerminalConfig::default();
    config.console.profile = profile;
    config.explorer.networks.push(ExplorerNetworkConfig {
        key: "local".to_string(),
        name: "Local Devnet".to_string(),
        url: server.url(),
        api_url: None,
        symbol: "ETH".to_string(),
        chain_id: 1337,
        is_l2: false,
    });
    config.explorer.default_network = "local".to_string();
    config.explorer.ens_api_url = format!("{}/ens", server.url());
    config.market.api_url = format!("{}/market", server.url());
    if profile.includes_wallet() {
        config.wallet.provider_url = Some(format!("{}/rpc", server.url()));
    }
    config.validate().unwrap();
    config
}

async fn rpc_mock(server: &mut ServerGuard, method: &str, result: serde_json::Value) {
    server
        .mock("POST", "/rpc")
        .match_body(Matcher::PartialJson(json!({ "method": method })))
        .with_body(json!({"jsonrpc": "2.0", "id": 1, "result": result}).to_string())
        .create_async()
        .await;
}

#[tokio::test]
async fn help_lists_the_full_profile_in_order() {
    let server = Server::new_async().await;
    let console = build_console(&config_for(&server, Profile::Full)).unwrap();

    let names: Vec<&str> = console.list_all().into_iter().map(|(name, _)| name).collect();
    assert_eq!(
        names,
        vec![
            "help", "about", "clear", "blockscout", "address", "tx", "block", "stats",
            "networks", "ens", "search", "crypto", "network", "summon", "disconnect", "status",
            "balance", "gas", "send", "web3help",
        ]
    );
}

#[tokio::test]
async fn explorer_profile_has_no_wallet_commands() {
    let server = Server::new_async().await;
    let mut console = build_console(&config_for(&server, Profile::Explorer)).unwrap();

    assert!(console.list_all().iter().all(|(name, _)| *name != "summon"));
    assert_eq!(
        console.dispatch("summon").await,
        "unknown command: summon. Type 'help' for available commands."
    );
    assert_eq!(
        console.dispatch("network status").await,
        "No Web3 wallet configured"
    );
}

#[tokio::test]
async fn address_lookup_renders_details() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v2/addresses/0xabc")
        .with_body(
            r#"{"hash":"0xabc","coin_balance":"2500000000000000000","is_contract":false,
                "has_tokens":true,"has_token_transfers":true,"is_verified":false,"is_scam":false}"#,
        )
        .create_async()
        .await;
    let mut console = build_console(&config_for(&server, Profile::Full)).unwrap();

    let output = console.dispatch("address 0xabc").await;
    assert!(output.starts_with("Address Information (Local Devnet):\nHash: 0xabc\n"));
    assert!(output.contains("Balance: 2.5 ETH"));
    assert!(output.contains("Type: EOA"));
    assert!(output.ends_with(&format!("Explorer URL: {}/address/0xabc", server.url())));

    assert_eq!(console.dispatch("blockscout address 0xabc").await, output);
}

#[tokio::test]
async fn missing_arguments_print_usage() {
    let server = Server::new_async().await;
    let mut console = build_console(&config_for(&server, Profile::Full)).unwrap();

    assert_eq!(
        console.dispatch("address").await,
        "Please provide an address. Usage: address <addr> [network]"
    );
    assert_eq!(
        console.dispatch("blockscout tx").await,
        "Please provide a transaction hash. Usage: blockscout tx <hash> [network]"
    );
    assert_eq!(
        console.dispatch("block").await,
        "Please provide a block number. Usage: block <number> [network]"
    );
    assert!(console.dispatch("search").await.starts_with("Usage: search <type> <query>"));
    assert!(console.dispatch("crypto").await.starts_with("Usage: crypto <command>"));
    assert!(console.dispatch("network").await.starts_with("Usage: network <command>"));
    assert_eq!(
        console.dispatch("send 0x12").await,
        "Usage: send <address> <amount>"
    );
}

#[tokio::test]
async fn explorer_edge_cases_are_plain_output() {
    let server = Server::new_async().await;
    let mut console = build_console(&config_for(&server, Profile::Full)).unwrap();

    assert_eq!(
        console.dispatch("tx 0xfeed solana").await,
        "Network 'solana' not found."
    );
    assert_eq!(
        console.dispatch("blockscout balance").await,
        "Unknown command: balance. Type 'blockscout help' for available commands."
    );
    assert!(console
        .dispatch("blockscout")
        .await
        .starts_with("Blockscout Explorer Commands:"));
    assert!(console.dispatch("networks").await.contains("local        - Local Devnet (ETH)"));
    assert_eq!(console.dispatch("clear").await, CLEAR_SEQUENCE);
}

#[tokio::test]
async fn http_failures_become_one_error_line() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v2/blocks/999999999")
        .with_status(404)
        .with_body(r#"{"message":"Not found"}"#)
        .create_async()
        .await;
    let mut console = build_console(&config_for(&server, Profile::Full)).unwrap();

    assert_eq!(
        console.dispatch("block 999999999").await,
        "Error fetching block: request failed with status 404 Not Found: Not found"
    );
    // The session survives and keeps answering.
    assert!(console.dispatch("about").await.starts_with("Web3 Terminal"));
}

#[tokio::test]
async fn transport_failures_name_the_cause_once() {
    let server = Server::new_async().await;
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let mut config = config_for(&server, Profile::Full);
    config.explorer.networks[0].url = format!("http://127.0.0.1:{port}");
    let mut console = build_console(&config).unwrap();

    let output = console.dispatch("stats").await;
    assert!(output.starts_with("Error fetching network stats: HTTP error: "), "{output}");
    assert_eq!(output.matches("error sending request").count(), 1, "{output}");
    assert_eq!(
        output.matches(&format!("127.0.0.1:{port}")).count(),
        1,
        "{output}"
    );
    assert_eq!(output.lines().count(), 1);
}

#[tokio::test]
async fn explorer_profile_ignores_a_configured_provider() {
    let server = Server::new_async().await;
    let mut config = config_for(&server, Profile::Explorer);
    config.wallet.provider_url = Some("http://127.0.0.1:1".to_string());
    let mut console = build_console(&config).unwrap();

    assert!(!console.session().wallet.has_provider());
    assert_eq!(console.dispatch("network status").await, "No Web3 wallet configured");
}

#[tokio::test]
async fn ens_and_prices() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/ens/1337/domains/vitalik.eth")
        .with_body(
            r#"{"name":"vitalik.eth","resolved_address":{"hash":"0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"}}"#,
        )
        .create_async()
        .await;
    server
        .mock("GET", "/ens/1337/domains/nobody.eth")
        .with_status(404)
        .with_body(r#"{"message":"domain not found"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/market/simple/price")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("ids".into(), "ethereum".into()),
            Matcher::UrlEncoded("vs_currencies".into(), "usd".into()),
        ]))
        .with_body(r#"{"ethereum":{"usd":3000.0}}"#)
        .create_async()
        .await;
    let mut console = build_console(&config_for(&server, Profile::Full)).unwrap();

    let output = console.dispatch("ens vitalik.eth").await;
    assert!(output.starts_with("ENS Domain (Local Devnet):\nName: vitalik.eth\n"));
    assert!(output.contains("Resolved Address: 0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"));

    assert_eq!(
        console.dispatch("ens nobody.eth").await,
        "ENS name 'nobody.eth' not found on Local Devnet."
    );
    assert_eq!(console.dispatch("crypto price eth").await, "ETH: 3000.00 USD");
    assert_eq!(
        console.dispatch("crypto convert 2 eth usd").await,
        "2 ETH = 6000.00 USD"
    );
    assert_eq!(
        console.dispatch("crypto convert lots eth usd").await,
        "Invalid amount: lots"
    );
}

#[tokio::test]
async fn wallet_flow_keeps_account_in_session() {
    let mut server = Server::new_async().await;
    rpc_mock(&mut server, "eth_requestAccounts", json!([ACCOUNT])).await;
    rpc_mock(&mut server, "eth_accounts", json!([ACCOUNT])).await;
    rpc_mock(&mut server, "eth_getBalance", json!("0x1bc16d674ec80000")).await;
    rpc_mock(&mut server, "eth_chainId", json!("0x539")).await;
    rpc_mock(&mut server, "eth_gasPrice", json!("0x6fc23ac00")).await;
    let mut console = build_console(&config_for(&server, Profile::Full)).unwrap();

    assert_eq!(
        console.dispatch("balance").await,
        "Please use \"summon\" first to connect your wallet"
    );
    assert_eq!(
        console.dispatch("summon").await,
        format!("Connected to wallet: {ACCOUNT}")
    );
    assert_eq!(console.session().wallet.account(), Some(ACCOUNT));
    assert_eq!(console.dispatch("balance").await, "Balance: 2 ETH");
    assert_eq!(console.dispatch("gas").await, "Gas Price: 30 Gwei");
    assert_eq!(console.dispatch("status").await, "\u{1f7e2} Connected: 0x1111...1111");
    assert!(console
        .dispatch("network status")
        .await
        .starts_with("Connected to: Network ID 1337\n"));

    assert_eq!(
        console.dispatch("send 0x2222222222222222222222222222222222222222 1.5.0").await,
        "Invalid amount: 1.5.0"
    );
    assert_eq!(
        console.dispatch("disconnect").await,
        format!("Disconnected from wallet: {ACCOUNT}")
    );
    assert_eq!(console.dispatch("disconnect").await, "No wallet connected.");
}

#[tokio::test]
async fn wallet_rejection_is_reported_plainly() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/rpc")
        .with_body(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":4001,"message":"User rejected the request."}}"#,
        )
        .create_async()
        .await;
    let mut console = build_console(&config_for(&server, Profile::Full)).unwrap();

    assert_eq!(console.dispatch("summon").await, "User rejected the request.");
    assert_eq!(console.session().wallet.account(), None);
}

#[tokio::test]
async fn missing_provider_is_explained() {
    let server = Server::new_async().await;
    let mut config = config_for(&server, Profile::Full);
    config.wallet.provider_url = None;
    let mut console = build_console(&config).unwrap();

    assert_eq!(
        console.dispatch("summon").await,
        "No Web3 wallet detected. Please configure a wallet provider URL."
    );
    assert_eq!(console.dispatch("status").await, "\u{1f534} No Web3 Wallet");
    assert_eq!(console.dispatch("network status").await, "No Web3 wallet configured");
}

#[tokio::test]
async fn profile_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[console]\nprofile = \"explorer\"\n\n[explorer]\ndefault_network = \"base\"\n",
    )
    .unwrap();

    let config = TerminalConfig::load(&path).unwrap();
    let console = build_console(&config).unwrap();
    assert_eq!(console.list_all().len(), 13);
    assert!(console.suggest("s").iter().all(|name| name != "summon"));
}
