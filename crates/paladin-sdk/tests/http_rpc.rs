//! Integration tests for the JSON-RPC client against a mock HTTP node.

use std::time::Duration;

use base64::{engine::general_purpose, Engine as _};
use paladin_sdk::rpc::BlockhashConfirmation;
use paladin_sdk::sol_tx::{Hash, Pubkey, Signature};
use paladin_sdk::{Commitment, HttpRpcClient, RpcConnection, SdkConfig, SdkError, SendOptions};
use serde_json::{json, Value};
use url::Url;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn rpc_result(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "jsonrpc": "2.0", "id": 1, "result": result }))
}

fn with_context(value: Value) -> Value {
    json!({ "context": { "slot": 311_000_000 }, "value": value })
}

async fn mount(server: &MockServer, rpc_method: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "jsonrpc": "2.0", "method": rpc_method })))
        .respond_with(response)
        .mount(server)
        .await;
}

fn client_for(server: &MockServer) -> HttpRpcClient {
    let config = SdkConfig::builder(Url::parse(&server.uri()).unwrap())
        .poll_interval(Duration::from_millis(10))
        .confirm_timeout(Duration::from_millis(500))
        .build()
        .unwrap();
    HttpRpcClient::new(&config).unwrap()
}

fn confirmation(last_valid_block_height: u64) -> BlockhashConfirmation {
    BlockhashConfirmation {
        signature: Signature::new_from_array([1; 64]),
        blockhash: Hash::new_from_array([2; 32]),
        last_valid_block_height,
    }
}

#[tokio::test]
async fn get_latest_blockhash() {
    let server = MockServer::start().await;
    let blockhash = Hash::new_from_array([2; 32]);
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "method": "getLatestBlockhash",
            "params": [{ "commitment": "finalized" }],
        })))
        .respond_with(rpc_result(with_context(json!({
            "blockhash": blockhash.to_string(),
            "lastValidBlockHeight": 290_000_150,
        }))))
        .mount(&server)
        .await;

    let latest = client_for(&server)
        .get_latest_blockhash(Commitment::Finalized)
        .await
        .unwrap();
    assert_eq!(latest.blockhash, blockhash);
    assert_eq!(latest.last_valid_block_height, 290_000_150);
}

#[tokio::test]
async fn send_raw_transaction_encodes_base64() {
    let server = MockServer::start().await;
    let wire = vec![1u8, 2, 3, 4, 5];
    let signature = Signature::new_from_array([7; 64]);
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "method": "sendTransaction",
            "params": [
                general_purpose::STANDARD.encode(&wire),
                { "encoding": "base64", "skipPreflight": true, "preflightCommitment": "processed" }
            ],
        })))
        .respond_with(rpc_result(json!(signature.to_string())))
        .expect(1)
        .mount(&server)
        .await;

    let options = SendOptions {
        skip_preflight: true,
        preflight_commitment: Some(Commitment::Processed),
    };
    let returned = client_for(&server).send_raw_transaction(&wire, options).await.unwrap();
    assert_eq!(returned, signature);
}

#[tokio::test]
async fn rpc_error_is_mapped_with_code() {
    let server = MockServer::start().await;
    mount(
        &server,
        "sendTransaction",
        ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {
                "code": -32002,
                "message": "Transaction simulation failed: Blockhash not found",
                "data": { "accounts": null, "err": "BlockhashNotFound", "logs": [] }
            }
        })),
    )
    .await;

    let err = client_for(&server)
        .send_raw_transaction(&[0u8; 8], SendOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.rpc_code(), Some(-32002));
    assert!(err.is_network_error());
    assert!(err.to_string().contains("Blockhash not found"));
}

#[tokio::test]
async fn http_failure_is_a_network_error() {
    let server = MockServer::start().await;
    mount(&server, "getVoteAccounts", ResponseTemplate::new(503)).await;

    let err = client_for(&server).get_vote_accounts().await.unwrap_err();
    assert!(matches!(err, SdkError::Http(_)));
    assert!(err.is_network_error());
}

#[tokio::test]
async fn malformed_response_is_a_serialization_error() {
    let server = MockServer::start().await;
    mount(
        &server,
        "getMinimumBalanceForRentExemption",
        ResponseTemplate::new(200).set_body_string("not json"),
    )
    .await;

    let err = client_for(&server)
        .get_minimum_balance_for_rent_exemption(160)
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::Serialization(_)));
}

#[tokio::test]
async fn rent_exemption_passes_data_length() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "method": "getMinimumBalanceForRentExemption",
            "params": [160],
        })))
        .respond_with(rpc_result(json!(2_004_480)))
        .mount(&server)
        .await;

    let lamports = client_for(&server)
        .get_minimum_balance_for_rent_exemption(160)
        .await
        .unwrap();
    assert_eq!(lamports, 2_004_480);
}

#[tokio::test]
async fn get_vote_accounts_parses_both_lists() {
    let server = MockServer::start().await;
    let vote = Pubkey::new_from_array([0x11; 32]);
    let node = Pubkey::new_from_array([0x10; 32]);
    mount(
        &server,
        "getVoteAccounts",
        rpc_result(json!({
            "current": [],
            "delinquent": [{
                "votePubkey": vote.to_string(),
                "nodePubkey": node.to_string(),
                "activatedStake": 0,
                "commission": 100,
                "epochVoteAccount": false,
                "epochCredits": [[700, 10, 5]],
                "lastVote": 311_000_000u64,
                "rootSlot": 310_999_968u64
            }]
        })),
    )
    .await;

    let status = client_for(&server).get_vote_accounts().await.unwrap();
    assert!(status.current.is_empty());
    assert_eq!(status.delinquent[0].vote_pubkey, vote);
    assert_eq!(status.delinquent[0].node_pubkey, node);
}

#[tokio::test]
async fn get_account_data_decodes_base64() {
    let server = MockServer::start().await;
    let data = vec![9u8; 68];
    mount(
        &server,
        "getAccountInfo",
        rpc_result(with_context(json!({
            "data": [general_purpose::STANDARD.encode(&data), "base64"],
            "executable": false,
            "lamports": 27_074_400,
            "owner": "Vote111111111111111111111111111111111111111",
            "rentEpoch": 18_446_744_073_709_551_615u64,
            "space": 68
        }))),
    )
    .await;

    let fetched = client_for(&server)
        .get_account_data(&Pubkey::new_from_array([0x11; 32]))
        .await
        .unwrap();
    assert_eq!(fetched, Some(data));
}

#[tokio::test]
async fn get_account_data_missing_account() {
    let server = MockServer::start().await;
    mount(&server, "getAccountInfo", rpc_result(with_context(Value::Null))).await;

    let fetched = client_for(&server)
        .get_account_data(&Pubkey::new_from_array([0x11; 32]))
        .await
        .unwrap();
    assert_eq!(fetched, None);
}

#[tokio::test]
async fn confirm_succeeds_once_commitment_is_reached() {
    let server = MockServer::start().await;
    mount(
        &server,
        "getSignatureStatuses",
        rpc_result(with_context(json!([{
            "slot": 311_000_001,
            "confirmations": null,
            "err": null,
            "status": { "Ok": null },
            "confirmationStatus": "finalized"
        }]))),
    )
    .await;

    client_for(&server)
        .confirm_transaction(confirmation(1_000), Commitment::Confirmed)
        .await
        .unwrap();
}

#[tokio::test]
async fn confirm_reports_on_chain_failure() {
    let server = MockServer::start().await;
    mount(
        &server,
        "getSignatureStatuses",
        rpc_result(with_context(json!([{
            "slot": 311_000_001,
            "confirmations": 0,
            "err": { "InstructionError": [2, { "Custom": 6 }] },
            "status": { "Err": { "InstructionError": [2, { "Custom": 6 }] } },
            "confirmationStatus": "processed"
        }]))),
    )
    .await;

    let err = client_for(&server)
        .confirm_transaction(confirmation(1_000), Commitment::Confirmed)
        .await
        .unwrap_err();
    match err {
        SdkError::TransactionFailed { signature, reason } => {
            assert_eq!(signature, Signature::new_from_array([1; 64]));
            assert!(reason.contains("InstructionError"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn confirm_fails_when_blockhash_expires() {
    let server = MockServer::start().await;
    mount(&server, "getSignatureStatuses", rpc_result(with_context(json!([null])))).await;
    mount(&server, "getBlockHeight", rpc_result(json!(1_001))).await;

    let err = client_for(&server)
        .confirm_transaction(confirmation(1_000), Commitment::Confirmed)
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::BlockhashExpired(_)));
}

#[tokio::test]
async fn confirm_times_out() {
    let server = MockServer::start().await;
    // Seen but never past `processed`, and the blockhash stays valid.
    mount(
        &server,
        "getSignatureStatuses",
        rpc_result(with_context(json!([{
            "slot": 311_000_001,
            "confirmations": 0,
            "err": null,
            "status": { "Ok": null },
            "confirmationStatus": "processed"
        }]))),
    )
    .await;
    mount(&server, "getBlockHeight", rpc_result(json!(10))).await;

    let config = SdkConfig::builder(Url::parse(&server.uri()).unwrap())
        .poll_interval(Duration::from_millis(10))
        .confirm_timeout(Duration::from_millis(100))
        .build()
        .unwrap();
    let client = HttpRpcClient::new(&config).unwrap();

    let err = client
        .confirm_transaction(confirmation(1_000), Commitment::Finalized)
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::Timeout(d) if d == Duration::from_millis(100)));
}

#[test]
fn rejects_non_http_endpoint() {
    let mut config = SdkConfig::new(Url::parse("http://localhost:8899").unwrap());
    config.rpc_url = Url::parse("ws://localhost:8900").unwrap();
    let err = HttpRpcClient::new(&config).unwrap_err();
    assert!(matches!(err, SdkError::Configuration(_)));
}
