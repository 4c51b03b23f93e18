//! HTTP proxy client tests

use mcp_playground::{ActivateRequest, ClientError, HttpProxyClient, ProxyClient, QueryRequest};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_activate_posts_config_and_session() {
    let proxy = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/mcp/activate"))
        .and(body_json(json!({"config": {"mcpServers": {}}, "sessionId": "session-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status_code": 200,
            "status": true,
            "message": "Configuration activated successfully!",
            "path": "/api/mcp/activate",
            "data": {"sessionId": "session-1"}
        })))
        .expect(1)
        .mount(&proxy)
        .await;

    let client = HttpProxyClient::new(proxy.uri()).unwrap();
    let reply = client
        .activate(&ActivateRequest {
            config: json!({"mcpServers": {}}),
            session_id: "session-1".to_string(),
        })
        .await
        .unwrap();

    assert!(reply.is_success());
    assert_eq!(reply.field("sessionId"), Some(&json!("session-1")));
}

#[tokio::test]
async fn test_query_keeps_error_status() {
    let proxy = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/mcp/query"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "status_code": 503,
            "status": false,
            "message": "overloaded",
            "path": "/api/mcp/query",
            "data": null
        })))
        .mount(&proxy)
        .await;

    let client = HttpProxyClient::new(proxy.uri()).unwrap();
    let reply = client
        .query(&QueryRequest {
            query: "hi".to_string(),
            session_id: "session-1".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(reply.http_status, 503);
    assert!(!reply.is_success());
    assert_eq!(reply.message(), Some("overloaded"));
}

#[tokio::test]
async fn test_non_json_body_is_kept_as_none() {
    let proxy = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/mcp/query"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&proxy)
        .await;

    let client = HttpProxyClient::new(proxy.uri()).unwrap();
    let reply = client
        .query(&QueryRequest {
            query: "hi".to_string(),
            session_id: "s".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(reply.body, None);
    assert_eq!(reply.status_line(), "502 Bad Gateway");
}

#[tokio::test]
async fn test_release_session_encodes_id() {
    let proxy = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/mcp/session/session%201"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": true})))
        .expect(1)
        .mount(&proxy)
        .await;

    let client = HttpProxyClient::new(proxy.uri()).unwrap();
    let reply = client.release_session("session 1").await.unwrap();

    assert!(reply.is_success());
}

#[tokio::test]
async fn test_unreachable_proxy_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = HttpProxyClient::new(format!("http://127.0.0.1:{}", port)).unwrap();
    let err = client.list_sessions().await.unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)));
}
