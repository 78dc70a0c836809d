// Integration tests for the ledger JSON-RPC client against a mock node

mod common;

use common::*;
use ledger_liquidity::{Issue, LedgerRpcClient, LiquidityEngine, LiquidityError, RawAmount};
use mockito::Matcher;
use rust_decimal_macros::dec;
use serde_json::json;

#[tokio::test]
async fn test_book_offers_parses_offers() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({ "method": "book_offers" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "result": {
                    "ledger_index": 90000000,
                    "offers": [
                        {
                            "Account": "rMaker",
                            "TakerGets": { "currency": "TOKEN", "issuer": ISSUER, "value": "100" },
                            "TakerPays": "10000000",
                            "quality": "100000"
                        },
                        { "Account": "rBroken" },
                        {
                            "TakerGets": { "currency": "TOKEN", "issuer": ISSUER, "value": "50" },
                            "TakerPays": "6000000"
                        }
                    ],
                    "status": "success",
                    "validated": true
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = LedgerRpcClient::new(server.url());
    let offers = client.book_offers(&token_side(), 10).await.unwrap();

    mock.assert_async().await;
    assert_eq!(offers.len(), 2);
    assert_eq!(offers[0].taker_pays, RawAmount::Native("10000000".to_string()));

    let quote = LiquidityEngine::default().quote(&token_side(), dec!(12), &offers, &[], None);
    assert!(approx_eq(quote.execution.received_total, dec!(116.667), dec!(0.001)));
}

#[tokio::test]
async fn test_book_offers_ledger_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/")
        .with_status(200)
        .with_body(json!({ "result": { "status": "error", "error": "srcCurMalformed" } }).to_string())
        .create_async()
        .await;

    let client = LedgerRpcClient::new(server.url());
    let result = client.book_offers(&token_side(), 10).await;

    match result {
        Err(LiquidityError::RpcResponse(msg)) => assert!(msg.contains("srcCurMalformed")),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_http_failure_is_network_error() {
    let mut server = mockito::Server::new_async().await;
    server.mock("POST", "/").with_status(503).create_async().await;

    let client = LedgerRpcClient::new(server.url());
    let result = client.book_offers(&token_side(), 10).await;
    assert!(matches!(result, Err(LiquidityError::Network(_))));
}

#[tokio::test]
async fn test_amm_info_returns_pool() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({ "method": "amm_info" })))
        .with_status(200)
        .with_body(
            json!({
                "result": {
                    "amm": {
                        "account": "rAmmAccount",
                        "amount": { "currency": "TOKEN", "issuer": ISSUER, "value": "1000" },
                        "amount2": "500000000",
                        "lp_token": { "currency": "03930D02208264E2E40EC1B0C09E4DB96EE197B1", "issuer": "rAmmAccount", "value": "707" },
                        "trading_fee": 500
                    },
                    "status": "success"
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = LedgerRpcClient::new(server.url());
    let pool = client.amm_info(&token(), &Issue::native()).await.unwrap().expect("pool");

    assert_eq!(pool.trading_fee, 500);
    assert_eq!(pool.amount2, RawAmount::Native("500000000".to_string()));
    assert!(pool.lp_token.is_some());

    let quote = LiquidityEngine::default().quote(&token_side(), dec!(100), &[], &[], Some(&pool));
    assert_eq!(quote.execution.received_total, dec!(200));
}

#[tokio::test]
async fn test_amm_info_without_pool() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/")
        .with_status(200)
        .with_body(json!({ "result": { "status": "error", "error": "actNotFound" } }).to_string())
        .create_async()
        .await;

    let client = LedgerRpcClient::new(server.url());
    let pool = client.amm_info(&token(), &Issue::native()).await.unwrap();
    assert!(pool.is_none());
}
