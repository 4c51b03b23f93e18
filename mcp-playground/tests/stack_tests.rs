//! Playground driven through a real proxy instance

use std::sync::Arc;

use mcp_playground::{ExchangeState, HttpProxyClient, Message, Page, SidebarState, View};
use mcp_proxy::{McpProxy, ProxyConfig};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serve a proxy for `backend_url` on an ephemeral port and return its URL
async fn spawn_proxy(backend_url: &str) -> String {
    let config = ProxyConfig::builder().backend_url(backend_url).build().unwrap();
    let router = McpProxy::new(config).unwrap().router();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

fn dead_backend_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

fn page_for(proxy_url: &str) -> Page<HttpProxyClient> {
    let client = HttpProxyClient::new(proxy_url).unwrap();
    Page::new(View::Playground, Arc::new(client))
}

#[tokio::test]
async fn test_dead_backend_shows_connection_error() {
    let backend_url = dead_backend_url();
    let mut page = page_for(&spawn_proxy(&backend_url).await);

    page.load_example();
    assert_eq!(page.activate().await, SidebarState::Error);

    assert_eq!(
        page.sidebar().error(),
        Some(
            format!(
                "Cannot connect to backend at {}. Make sure the backend server is running.",
                backend_url
            )
            .as_str()
        )
    );
    assert!(!page.chat().is_config_active());
}

#[tokio::test]
async fn test_activate_and_chat_through_proxy() {
    let backend = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/mcp/activate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status_code": 200,
            "status": true,
            "message": "Configuration activated successfully!",
            "path": "/api/mcp/activate",
            "data": {"sessionId": "session-backend"}
        })))
        .mount(&backend)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/mcp/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status_code": 200,
            "status": true,
            "message": "Query processed successfully",
            "path": "/api/mcp/query",
            "data": {"result": "Firecrawl and Ragie tools are available."}
        })))
        .mount(&backend)
        .await;

    let mut page = page_for(&spawn_proxy(&backend.uri()).await);

    page.load_example();
    assert_eq!(page.activate().await, SidebarState::Active);
    assert_eq!(page.chat().session_id(), Some("session-backend"));

    assert_eq!(page.send("What tools do you have?").await, ExchangeState::Ready);
    assert_eq!(
        page.chat().messages(),
        &[
            Message::user("What tools do you have?"),
            Message::assistant("Firecrawl and Ragie tools are available."),
        ]
    );
}
