//! Shared test helpers for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use notifyhub_core::config::AppConfig;
use notifyhub_core::config::app::{CorsConfig, ServerConfig};
use notifyhub_core::config::logging::LoggingConfig;
use notifyhub_core::config::realtime::RealtimeConfig;
use notifyhub_realtime::server::RouterEngine;

/// A WebSocket client connection to the test server.
pub type WsClient = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Test application context: the full router stack bound to an ephemeral
/// port.
pub struct TestApp {
    /// Bound address of the running server
    pub addr: SocketAddr,
    /// HTTP client for producer requests
    pub http: reqwest::Client,
}

fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            shutdown_grace_seconds: 1,
            cors: CorsConfig::default(),
        },
        realtime: RealtimeConfig {
            channel_buffer_size: 64,
            max_subscriptions_per_connection: 16,
        },
        logging: LoggingConfig::default(),
    }
}

impl TestApp {
    /// Start the server on an ephemeral port.
    pub async fn spawn() -> Self {
        let config = test_config();

        let engine = Arc::new(RouterEngine::new(config.realtime.clone()));
        let state = notifyhub_api::state::AppState {
            config: Arc::new(config),
            engine,
        };
        let app = notifyhub_api::router::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("No local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        Self {
            addr,
            http: reqwest::Client::new(),
        }
    }

    /// Open a WebSocket client session.
    pub async fn ws_client(&self) -> WsClient {
        let url = format!("ws://{}/ws", self.addr);
        let (socket, _) = tokio_tungstenite::connect_async(url)
            .await
            .expect("WebSocket connect failed");
        socket
    }

    /// Post one producer event; returns the acknowledgement id.
    pub async fn notify(&self, summary: &str, body: &str) -> u32 {
        let req = serde_json::json!({
            "app_name": "test-app",
            "replaces_id": 0,
            "icon": "",
            "summary": summary,
            "body": body,
            "actions": [],
            "hints": {},
            "expire_timeout": -1,
        });

        let resp = self
            .http
            .post(format!("http://{}/api/notify", self.addr))
            .json(&req)
            .send()
            .await
            .expect("notify request failed");
        assert!(resp.status().is_success(), "notify returned {}", resp.status());

        let body: serde_json::Value = resp.json().await.expect("bad notify response");
        body["data"]["id"].as_u64().expect("missing ack id") as u32
    }

    /// Fetch the detailed health payload.
    pub async fn detailed_health(&self) -> serde_json::Value {
        let resp = self
            .http
            .get(format!("http://{}/api/health/detailed", self.addr))
            .send()
            .await
            .expect("health request failed");
        resp.json().await.expect("bad health response")
    }

    /// Poll until the server reports the expected subscription total.
    pub async fn wait_for_subscriptions(&self, expected: u64) {
        self.wait_for(|health| health["data"]["subscriptions"].as_u64() == Some(expected))
            .await;
    }

    /// Poll until the server reports the expected connection count.
    pub async fn wait_for_connections(&self, expected: u64) {
        self.wait_for(|health| health["data"]["connections"].as_u64() == Some(expected))
            .await;
    }

    async fn wait_for(&self, predicate: impl Fn(&serde_json::Value) -> bool) {
        for _ in 0..50 {
            if predicate(&self.detailed_health().await) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("Server never reached expected state: {:?}", self.detailed_health().await);
    }
}

/// Send a subscribe control message.
pub async fn subscribe(client: &mut WsClient, url_pattern: &str, summary_pattern: Option<&str>) {
    let mut payload = serde_json::json!({ "url_pattern": url_pattern });
    if let Some(p) = summary_pattern {
        payload["summary_pattern"] = serde_json::Value::String(p.to_string());
    }
    let msg = serde_json::json!({ "type": "subscribe", "payload": payload });
    client
        .send(Message::Text(msg.to_string().into()))
        .await
        .expect("subscribe send failed");
}

/// Send an unsubscribe control message.
pub async fn unsubscribe(client: &mut WsClient, url_pattern: &str) {
    let msg = serde_json::json!({
        "type": "unsubscribe",
        "payload": { "url_pattern": url_pattern },
    });
    client
        .send(Message::Text(msg.to_string().into()))
        .await
        .expect("unsubscribe send failed");
}

/// Receive the next text frame as JSON, within a timeout.
pub async fn recv_json(client: &mut WsClient) -> serde_json::Value {
    let frame = tokio::time::timeout(Duration::from_secs(2), client.next())
        .await
        .expect("Timed out waiting for notification")
        .expect("Connection closed")
        .expect("WebSocket error");
    let text = frame.into_text().expect("Expected text frame");
    serde_json::from_str(&text).expect("Invalid JSON frame")
}

/// Assert that no frame arrives within a short window.
pub async fn assert_silent(client: &mut WsClient) {
    let res = tokio::time::timeout(Duration::from_millis(300), client.next()).await;
    assert!(res.is_err(), "Expected no delivery, got {:?}", res);
}
