use lisk_client::LiskConfig;
use lisk_client::session::{EXHAUSTED_MESSAGE, Session};
use lisk_client::session::network::MAINNET_NETHASH;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer, peers: &[&str]) -> LiskConfig {
    let mut config = LiskConfig::default();
    config.client.peers = Some(peers.iter().map(|p| p.to_string()).collect());
    config.client.port = Some(server.address().port().to_string());
    config.client.random_peer = Some(true);
    config.client.failover_delay_ms = 10;
    config.client.request_timeout_secs = 2;
    config.client.transport_retries = 0;
    config
}

#[tokio::test]
async fn test_get_request_carries_network_headers() {
    let server = MockServer::start().await;
    let port = server.address().port().to_string();
    Mock::given(method("GET"))
        .and(path("/api/blocks"))
        .and(query_param("limit", "5"))
        .and(header("nethash", MAINNET_NETHASH))
        .and(header("version", "1.0.0"))
        .and(header("minVersion", ">=0.5.0"))
        .and(header("port", port.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "blocks": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let session = Session::from_config(&config_for(&server, &["127.0.0.1"])).unwrap();
    let result = session.list_blocks(5).await;

    assert_eq!(result, json!({ "success": true, "blocks": [] }));
    assert!(session.last_request_latency().await.is_some());
}

#[tokio::test]
async fn test_post_body_is_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/transactions"))
        .and(body_json(json!({ "recipientId": "123L", "amount": "10", "secret": "pass" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "transactionId": "1" })))
        .expect(1)
        .mount(&server)
        .await;

    let session = Session::from_config(&config_for(&server, &["127.0.0.1"])).unwrap();
    let result = session.send_lsk("123L", 10, "pass", None).await;

    assert_eq!(result["transactionId"], "1");
}

#[tokio::test]
async fn test_logical_failure_is_returned_as_is() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false, "error": "Account not found" })))
        .expect(1)
        .mount(&server)
        .await;

    let session = Session::from_config(&config_for(&server, &["127.0.0.1"])).unwrap();
    let result = session.get_account("1L").await;

    assert_eq!(result, json!({ "success": false, "error": "Account not found" }));
    assert!(session.banned_peers().await.is_empty());
}

#[tokio::test]
async fn test_clock_skew_retries_with_offset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("timeOffset", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": false, "message": "Timestamp is in the future" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = Session::from_config(&config_for(&server, &["127.0.0.1"])).unwrap();
    let result = session.list_blocks(1).await;

    assert_eq!(result, json!({ "success": true }));
}

#[tokio::test]
async fn test_failover_from_unreachable_peer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/blocks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    // Nothing listens on 127.0.0.2 at the mock port.
    let session = Session::from_config(&config_for(&server, &["127.0.0.2", "127.0.0.1"])).unwrap();
    let result = session.list_blocks(1).await;

    assert_eq!(result, json!({ "success": true }));
    assert_eq!(session.current_peer().await, "127.0.0.1");
    assert!(!session.banned_peers().await.contains(&"127.0.0.1".to_string()));
}

#[tokio::test]
async fn test_server_error_counts_as_peer_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(2)
        .mount(&server)
        .await;

    let session = Session::from_config(&config_for(&server, &["127.0.0.1"])).unwrap();
    let result = session.list_blocks(1).await;

    assert_eq!(result["success"], false);
    assert_eq!(result["message"], EXHAUSTED_MESSAGE);
    assert_eq!(session.banned_peers().await, vec!["127.0.0.1".to_string()]);
}

#[tokio::test]
async fn test_all_peers_unreachable() {
    let server = MockServer::start().await;

    let session = Session::from_config(&config_for(&server, &["127.0.0.2", "127.0.0.3"])).unwrap();
    let result = session.list_blocks(1).await;

    assert_eq!(result["success"], false);
    assert_eq!(result["message"], EXHAUSTED_MESSAGE);
    let mut banned = session.banned_peers().await;
    banned.sort();
    assert_eq!(banned, vec!["127.0.0.2".to_string(), "127.0.0.3".to_string()]);
}

#[tokio::test]
async fn test_unsupported_verbs_never_ban_healthy_peers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let session = Session::from_config(&config_for(&server, &["127.0.0.1", "localhost"])).unwrap();

    for verb in [reqwest::Method::DELETE, reqwest::Method::HEAD] {
        let result = session.send_request(verb, "blocks", None).await;
        assert_eq!(result["success"], false);
        assert!(result["error"].as_str().unwrap().contains("Unsupported HTTP method"));
    }

    assert!(session.banned_peers().await.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
    assert_eq!(session.list_blocks(1).await, json!({ "success": true }));
}
