//! JSON-RPC provider and wallet session against a mock HTTP signer.

use mockito::{Matcher, Server};
use num_bigint::BigUint;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use w3t_wallet::*;

const ACCOUNT: &str = "0x1111111111111111111111111111111111111111";

fn session_for(server: &Server) -> WalletSession {
    let provider: Arc<dyn WalletProvider> =
        Arc::new(JsonRpcProvider::new(server.url(), Duration::from_secs(5)).unwrap());
    WalletSession::new(Some(provider))
}

#[tokio::test]
async fn posts_json_rpc_envelope() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "jsonrpc": "2.0",
            "method": "eth_gasPrice",
            "params": []
        })))
        .with_status(200)
        .with_body(r#"{"jsonrpc":"2.0","id":1,"result":"0x6fc23ac00"}"#)
        .create_async()
        .await;

    let session = session_for(&server);
    let price = session.gas_price().await.unwrap();

    mock.assert_async().await;
    assert_eq!(price, BigUint::from(30_000_000_000u64));
}

#[tokio::test]
async fn summon_then_balance() {
    let mut server = Server::new_async().await;
    let _accounts = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({"method": "eth_requestAccounts"})))
        .with_body(format!(r#"{{"jsonrpc":"2.0","id":1,"result":["{ACCOUNT}"]}}"#))
        .create_async()
        .await;
    let balance = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "method": "eth_getBalance",
            "params": [ACCOUNT, "latest"]
        })))
        .with_body(r#"{"jsonrpc":"2.0","id":2,"result":"0x1bc16d674ec80000"}"#)
        .create_async()
        .await;

    let mut session = session_for(&server);
    assert_eq!(session.request_accounts().await.unwrap(), ACCOUNT);
    assert_eq!(session.account(), Some(ACCOUNT));

    let wei = session.balance().await.unwrap();
    balance.assert_async().await;
    assert_eq!(wei, BigUint::from(2_000_000_000_000_000_000u64));
}

#[tokio::test]
async fn user_rejection_is_recognised() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_body(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":4001,"message":"User rejected the request."}}"#,
        )
        .create_async()
        .await;

    let mut session = session_for(&server);
    let err = session.request_accounts().await.unwrap_err();
    assert!(matches!(err, WalletError::UserRejected));
    assert_eq!(session.account(), None);
}

#[tokio::test]
async fn chain_id_is_decoded() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({"method": "eth_chainId"})))
        .with_body(r#"{"jsonrpc":"2.0","id":1,"result":"0xaa36a7"}"#)
        .create_async()
        .await;

    let session = session_for(&server);
    assert_eq!(session.chain_id().await.unwrap(), 11_155_111);
}

#[tokio::test]
async fn gateway_errors_report_the_status() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let session = session_for(&server);
    let err = session.accounts().await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid response: request failed with status 502 Bad Gateway"
    );
}
