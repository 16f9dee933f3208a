use reqwest::Client;
use serde_json::{json, Value as JsonValue};

/// Fire-and-forget event dispatch after interview and bid mutations.
/// Delivery is at most once and uncoordinated with the mutation: failures
/// are logged, never surfaced to the caller.
#[derive(Clone)]
pub struct NotificationService {
    client: Client,
    target_url: Option<String>,
}

impl NotificationService {
    pub fn new(client: Client, target_url: Option<String>) -> Self {
        Self { client, target_url }
    }

    pub fn notify(&self, event: &str, payload: JsonValue) {
        let Some(url) = self.target_url.clone() else {
            tracing::debug!(event, "notification target not configured, dropping event");
            return;
        };
        let client = self.client.clone();
        let event = event.to_string();

        tokio::spawn(async move {
            let body = json!({ "event": event, "payload": payload });
            match client.post(&url).json(&body).send().await {
                Ok(resp) if !resp.status().is_success() => {
                    tracing::warn!(event = %event, status = %resp.status(), "notification rejected");
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(event = %event, error = %err, "notification dispatch failed");
                }
            }
        });
    }
}
