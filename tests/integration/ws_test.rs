//! Integration tests for WebSocket subscription and delivery.

use crate::helpers::{self, TestApp};

#[tokio::test]
async fn test_subscribe_receive_then_unsubscribe_silence() {
    let app = TestApp::spawn().await;
    let mut client = app.ws_client().await;
    app.wait_for_connections(1).await;

    helpers::subscribe(&mut client, "x.com", None).await;
    app.wait_for_subscriptions(1).await;

    app.notify("New Tweet", "see https://x.com/status/1 now").await;

    let delivered = helpers::recv_json(&mut client).await;
    assert_eq!(delivered["body"], "see https://x.com/status/1 now");
    assert_eq!(delivered["summary"], "New Tweet");
    assert_eq!(delivered["app_name"], "test-app");

    helpers::unsubscribe(&mut client, "x.com").await;
    app.wait_for_subscriptions(0).await;

    app.notify("New Tweet", "see https://x.com/status/2 now").await;
    helpers::assert_silent(&mut client).await;
}

#[tokio::test]
async fn test_summary_pattern_filters_delivery() {
    let app = TestApp::spawn().await;
    let mut client = app.ws_client().await;
    app.wait_for_connections(1).await;

    helpers::subscribe(&mut client, "x.com", Some("Alert")).await;
    app.wait_for_subscriptions(1).await;

    // Body matches but summary does not
    app.notify("Other", "https://x.com/status/1").await;
    helpers::assert_silent(&mut client).await;

    // Both match
    app.notify("Security Alert", "https://x.com/status/1").await;
    let delivered = helpers::recv_json(&mut client).await;
    assert_eq!(delivered["summary"], "Security Alert");
}

#[tokio::test]
async fn test_at_most_once_with_overlapping_subscriptions() {
    let app = TestApp::spawn().await;
    let mut client = app.ws_client().await;
    app.wait_for_connections(1).await;

    helpers::subscribe(&mut client, "x.com", None).await;
    helpers::subscribe(&mut client, "status", None).await;
    app.wait_for_subscriptions(2).await;

    app.notify("New Tweet", "https://x.com/status/1").await;

    let _delivered = helpers::recv_json(&mut client).await;
    helpers::assert_silent(&mut client).await;
}

#[tokio::test]
async fn test_fanout_reaches_all_matching_clients() {
    let app = TestApp::spawn().await;
    let mut first = app.ws_client().await;
    let mut second = app.ws_client().await;
    app.wait_for_connections(2).await;

    helpers::subscribe(&mut first, "x.com", None).await;
    helpers::subscribe(&mut second, "status", None).await;
    app.wait_for_subscriptions(2).await;

    app.notify("New Tweet", "https://x.com/status/1").await;

    let to_first = helpers::recv_json(&mut first).await;
    let to_second = helpers::recv_json(&mut second).await;
    assert_eq!(to_first["body"], "https://x.com/status/1");
    assert_eq!(to_second["body"], "https://x.com/status/1");
}

#[tokio::test]
async fn test_disconnected_client_does_not_affect_others() {
    let app = TestApp::spawn().await;
    let mut staying = app.ws_client().await;
    let mut leaving = app.ws_client().await;
    app.wait_for_connections(2).await;

    helpers::subscribe(&mut staying, "x.com", None).await;
    helpers::subscribe(&mut leaving, "x.com", None).await;
    app.wait_for_subscriptions(2).await;

    drop(leaving);
    app.wait_for_connections(1).await;

    app.notify("New Tweet", "https://x.com/status/1").await;

    let delivered = helpers::recv_json(&mut staying).await;
    assert_eq!(delivered["body"], "https://x.com/status/1");

    // The departed client's subscriptions are gone too
    assert_eq!(app.detailed_health().await["data"]["subscriptions"], 1);
}

#[tokio::test]
async fn test_per_client_delivery_preserves_ingest_order() {
    let app = TestApp::spawn().await;
    let mut client = app.ws_client().await;
    app.wait_for_connections(1).await;

    helpers::subscribe(&mut client, "x.com", None).await;
    app.wait_for_subscriptions(1).await;

    app.notify("First", "https://x.com/1").await;
    app.notify("Second", "https://x.com/2").await;
    app.notify("Third", "https://x.com/3").await;

    assert_eq!(helpers::recv_json(&mut client).await["summary"], "First");
    assert_eq!(helpers::recv_json(&mut client).await["summary"], "Second");
    assert_eq!(helpers::recv_json(&mut client).await["summary"], "Third");
}

#[tokio::test]
async fn test_malformed_control_message_keeps_connection_open() {
    use futures::SinkExt;
    use tokio_tungstenite::tungstenite::Message;

    let app = TestApp::spawn().await;
    let mut client = app.ws_client().await;
    app.wait_for_connections(1).await;

    client
        .send(Message::Text("definitely not json".to_string().into()))
        .await
        .expect("send failed");
    client
        .send(Message::Text(
            r#"{"type":"ping","payload":{}}"#.to_string().into(),
        ))
        .await
        .expect("send failed");

    // The connection survives and still works normally
    helpers::subscribe(&mut client, "x.com", None).await;
    app.wait_for_subscriptions(1).await;

    app.notify("New Tweet", "https://x.com/status/1").await;
    let delivered = helpers::recv_json(&mut client).await;
    assert_eq!(delivered["body"], "https://x.com/status/1");
}
