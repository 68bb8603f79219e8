// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the complete purchase pipeline.
//!
//! Each test loads a TOML configuration, starts the adapter on a fresh
//! in-process market with the real HTTP fetcher, and buys items against a
//! local wiremock server. Tests are independent and order-insensitive.

use std::sync::Arc;
use std::time::Duration;

use mintpic_adapter::{PicAdapter, ReqwestFetcher};
use mintpic_config::{MintpicConfig, load_and_validate_str};
use mintpic_core::{
    HealthStatus, ItemDescriptor, MarketHost, MarketItem, MintpicError, PluginAdapter,
    PurchaseHandler, PurchaseResult, Session,
};
use mintpic_market::{InMemoryMarket, IntakeSummary, run_intake};
use mintpic_test_utils::MockSession;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(toml: &str) -> MintpicConfig {
    load_and_validate_str(toml).expect("test config should be valid")
}

fn harness(config: MintpicConfig) -> (Arc<InMemoryMarket>, PicAdapter) {
    let market = Arc::new(InMemoryMarket::new());
    let fetcher = Arc::new(ReqwestFetcher::new().unwrap());
    let adapter = PicAdapter::new(config, Arc::clone(&market) as Arc<dyn MarketHost>, fetcher);
    (market, adapter)
}

fn sunset_config(server: &MockServer) -> MintpicConfig {
    config(&format!(
        r#"
timeout = 1000

[[api_list]]
name = "Sunset"
description = "A random sunset"
tags = ["pic", "sunset"]
url = "{}/api"
method = "GET"
response = "$.data.url"
"#,
        server.uri()
    ))
}

// ---- Purchases ----

#[tokio::test]
async fn sunset_api_delivers_extracted_image() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"data": {"url": "https://img/1.png"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (market, adapter) = harness(sunset_config(&server));
    adapter.start().await.unwrap();

    let session = MockSession::new("alice");
    let result = market.purchase("Sunset", &session).await.unwrap();

    assert_eq!(result, PurchaseResult::success());
    assert_eq!(result.msg, "兑换成功");
    assert_eq!(session.sent_images().await, vec!["https://img/1.png"]);
    assert_eq!(
        session.sent_messages().await[0].to_markup(),
        r#"<img src="https://img/1.png"/>"#
    );
}

#[tokio::test]
async fn direct_entry_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (market, adapter) = harness(config(&format!(
        r#"
[[api_list]]
name = "Direct"
url = "{}/img/2.png"
response = ""
"#,
        server.uri()
    )));
    adapter.start().await.unwrap();

    let session = MockSession::default();
    let result = market.purchase("Direct", &session).await.unwrap();

    assert!(result.is_success());
    assert_eq!(
        session.sent_images().await,
        vec![format!("{}/img/2.png", server.uri())]
    );
}

#[tokio::test]
async fn post_entry_calls_with_post() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/draw"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"images": [{"src": "a.png"}, {"src": "b.png"}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (market, adapter) = harness(config(&format!(
        r#"
[[api_list]]
name = "Drawn"
url = "{}/draw"
method = "POST"
response = "$.images[*].src"
"#,
        server.uri()
    )));
    adapter.start().await.unwrap();

    let session = MockSession::default();
    let result = market.purchase("Drawn", &session).await.unwrap();
    assert!(result.is_success());
    assert_eq!(session.sent_images().await, vec!["a.png"]);
}

#[tokio::test]
async fn timeout_fails_without_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"data": {"url": "late.png"}}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let (market, adapter) = harness(sunset_config(&server));
    adapter.start().await.unwrap();

    let session = MockSession::default();
    let result = market.purchase("Sunset", &session).await.unwrap();

    assert_eq!(result, PurchaseResult::failure());
    assert_eq!(result.msg, "兑换失败");
    assert_eq!(session.sent_count().await, 0);
}

#[tokio::test]
async fn server_error_fails_without_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let (market, adapter) = harness(sunset_config(&server));
    adapter.start().await.unwrap();

    let session = MockSession::default();
    let result = market.purchase("Sunset", &session).await.unwrap();
    assert_eq!(result.code, PurchaseResult::FAILURE);
    assert_eq!(session.sent_count().await, 0);
}

#[tokio::test]
async fn no_match_fails_and_returns_stock() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": {}})))
        .mount(&server)
        .await;

    let (market, adapter) = harness(config(&format!(
        r#"
[[api_list]]
name = "Sunset"
stock = 1
url = "{}/api"
response = "$.data.url"
"#,
        server.uri()
    )));
    adapter.start().await.unwrap();

    let session = MockSession::default();
    let result = market.purchase("Sunset", &session).await.unwrap();

    assert!(!result.is_success());
    assert_eq!(session.sent_count().await, 0);
    assert_eq!(market.get("Sunset").await.unwrap().stock, Some(1));
}

#[tokio::test]
async fn result_serializes_to_wire_shape() {
    let server = MockServer::start().await;
    let (market, adapter) = harness(config(&format!(
        "[[api_list]]\nname = \"Direct\"\nurl = \"{}/2.png\"\n",
        server.uri()
    )));
    adapter.start().await.unwrap();

    let result = market
        .purchase("Direct", &MockSession::default())
        .await
        .unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"code": 200, "msg": "兑换成功", "data": {"itemType": "api"}})
    );
}

#[tokio::test]
async fn concurrent_purchases_each_call_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"data": {"url": "https://img/1.png"}})),
        )
        .expect(5)
        .mount(&server)
        .await;

    let (market, adapter) = harness(sunset_config(&server));
    adapter.start().await.unwrap();

    let sessions: Vec<MockSession> = (0..5).map(|i| MockSession::new(format!("user-{i}"))).collect();
    let purchases = sessions.iter().map(|s| market.purchase("Sunset", s));
    let results = futures::future::join_all(purchases).await;

    assert!(results.iter().all(|r| r.as_ref().is_ok_and(PurchaseResult::is_success)));
    for session in &sessions {
        assert_eq!(session.sent_count().await, 1);
    }
}

#[tokio::test]
async fn intake_lines_buy_through_real_fetcher() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"data": {"url": "https://img/1.png"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (market, adapter) = harness(sunset_config(&server));
    adapter.start().await.unwrap();

    let input = b"alice Sunset
bob Nope
";
    let mut out = Vec::new();
    let mut opened = Vec::new();
    let summary = run_intake(&market, &input[..], &mut out, |user: &str| {
        let session = MockSession::new(user);
        opened.push(session.clone());
        session
    })
    .await
    .unwrap();

    assert_eq!(
        summary,
        IntakeSummary {
            succeeded: 1,
            failed: 0,
            rejected: 1,
        }
    );
    assert_eq!(opened[0].sent_images().await, vec!["https://img/1.png"]);
    assert_eq!(opened[1].sent_count().await, 0);

    let text = String::from_utf8(out).unwrap();
    let replies: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(replies[0]["user"], "alice");
    assert_eq!(replies[0]["code"], 200);
    assert_eq!(replies[0]["msg"], "兑换成功");
    assert_eq!(replies[1]["error"], "item not found: Nope");

    adapter.stop().await.unwrap();
}

// ---- Lifecycle ----

struct Noop;

#[async_trait::async_trait]
impl PurchaseHandler for Noop {
    async fn on_purchase(&self, _session: &dyn Session) -> PurchaseResult {
        PurchaseResult::success()
    }
}

#[tokio::test]
async fn double_start_yields_same_items() {
    let server = MockServer::start().await;
    let (market, adapter) = harness(config(&format!(
        r#"
namespace = "pics"

[[api_list]]
name = "Sunset"
url = "{0}/api"
response = "$.data.url"

[[api_list]]
name = "Direct"
url = "{0}/2.png"
"#,
        server.uri()
    )));

    adapter.start().await.unwrap();
    let once = market.list(Some("pics")).await;
    adapter.start().await.unwrap();
    let twice = market.list(Some("pics")).await;

    assert_eq!(once, twice);
    assert_eq!(twice.len(), 2);
    assert_eq!(adapter.health_check().await.unwrap(), HealthStatus::Healthy);
}

#[tokio::test]
async fn stop_clears_namespace_after_partial_failure() {
    let server = MockServer::start().await;
    let market = Arc::new(InMemoryMarket::new());

    // Another plugin already owns "Taken".
    market
        .register_item(
            "someone-else",
            MarketItem {
                descriptor: ItemDescriptor {
                    id: None,
                    name: "Taken".into(),
                    description: String::new(),
                    tags: vec![],
                    price: None,
                    stock: None,
                },
                handler: Arc::new(Noop),
            },
        )
        .await
        .unwrap();

    let adapter = PicAdapter::new(
        config(&format!(
            r#"
[[api_list]]
name = "Mine"
url = "{0}/m.png"

[[api_list]]
name = "Taken"
url = "{0}/x.png"
"#,
            server.uri()
        )),
        Arc::clone(&market) as Arc<dyn MarketHost>,
        Arc::new(ReqwestFetcher::new().unwrap()),
    );

    let report = adapter.start().await.unwrap();
    assert_eq!(report.registered, vec!["Mine"]);
    assert_eq!(report.failed, vec!["Taken"]);
    assert!(matches!(
        adapter.health_check().await.unwrap(),
        HealthStatus::Degraded(_)
    ));

    adapter.stop().await.unwrap();
    assert!(market.list(Some(adapter.name())).await.is_empty());
    assert_eq!(market.get("Taken").await.unwrap().namespace, "someone-else");
}

#[tokio::test]
async fn purchase_after_stop_is_not_found() {
    let server = MockServer::start().await;
    let (market, adapter) = harness(sunset_config(&server));

    adapter.start().await.unwrap();
    adapter.stop().await.unwrap();

    let err = market
        .purchase("Sunset", &MockSession::default())
        .await
        .unwrap_err();
    assert!(matches!(err, MintpicError::ItemNotFound { .. }));
}
