//! Integration tests for the producer ingest endpoint and health checks.

use crate::helpers::TestApp;

#[tokio::test]
async fn test_ack_is_one_without_subscribers() {
    let app = TestApp::spawn().await;

    let ack = app.notify("New Tweet", "https://x.com/status/1").await;
    assert_eq!(ack, 1);
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::spawn().await;

    let resp = app
        .http
        .get(format!("http://{}/api/health", app.addr))
        .send()
        .await
        .expect("health request failed");
    assert!(resp.status().is_success());

    let body: serde_json::Value = resp.json().await.expect("bad health body");
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_detailed_health_reflects_connections() {
    let app = TestApp::spawn().await;

    assert_eq!(app.detailed_health().await["data"]["connections"], 0);

    let _client = app.ws_client().await;
    app.wait_for_connections(1).await;

    let health = app.detailed_health().await;
    assert_eq!(health["data"]["status"], "ok");
    assert_eq!(health["data"]["connections"], 1);
}
