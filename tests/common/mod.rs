#![allow(dead_code)]

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_tungstenite::{accept_async, tungstenite::Message};

pub const TOKEN: &str = "long-lived-token";

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn entity(entity_id: &str, state: &str) -> Value {
    json!({
        "entity_id": entity_id,
        "state": state,
        "last_changed": "2024-02-15T11:13:02.291378+00:00",
        "last_updated": "2024-02-15T11:13:27.686327+00:00",
        "attributes": {"friendly_name": entity_id},
        "context": {"id": "01HPQ", "parent_id": null, "user_id": null}
    })
}

/// Websocket hub answering `get_states` and `call_service` for one client.
/// Resolves to every command received after authentication.
pub async fn fake_hub() -> (String, JoinHandle<Vec<Value>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();
        let mut received = Vec::new();

        ws.send(Message::text(
            json!({"type": "auth_required", "ha_version": "2024.2.1"}).to_string(),
        ))
        .await
        .unwrap();

        while let Some(Ok(msg)) = ws.next().await {
            let Message::Text(text) = msg else {
                continue;
            };
            let cmd: Value = serde_json::from_str(text.as_str()).unwrap();
            let reply = match cmd["type"].as_str() {
                Some("auth") if cmd["access_token"] == TOKEN => {
                    json!({"type": "auth_ok", "ha_version": "2024.2.1"})
                }
                Some("auth") => json!({"type": "auth_invalid", "message": "Invalid access token"}),
                Some("get_states") => json!({
                    "id": cmd["id"],
                    "type": "result",
                    "success": true,
                    "result": [entity("light.kitchen", "on"), entity("scene.movie", "scening")]
                }),
                Some("call_service") if cmd["domain"] == "light" => json!({
                    "id": cmd["id"],
                    "type": "result",
                    "success": true,
                    "result": {"context": {"id": "01HPR", "parent_id": null, "user_id": null}}
                }),
                Some("call_service") => json!({
                    "id": cmd["id"],
                    "type": "result",
                    "success": false,
                    "error": {"code": "not_found", "message": "Service not found."}
                }),
                _ => continue,
            };
            if cmd["type"] != "auth" {
                received.push(cmd);
            }
            if ws.send(Message::text(reply.to_string())).await.is_err() {
                break;
            }
        }
        received
    });

    (format!("ws://{}/api/websocket", addr), handle)
}
