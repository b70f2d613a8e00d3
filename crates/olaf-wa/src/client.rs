//! Outbound WhatsApp text delivery via the Meta Graph API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{info, warn};

use olaf_core::{defaults, Error, OutboundMessenger, Result};

#[derive(Debug, Serialize)]
struct SendTextRequest<'a> {
    messaging_product: &'static str,
    to: &'a str,
    #[serde(rename = "type")]
    message_type: &'static str,
    text: TextPayload<'a>,
}

#[derive(Debug, Serialize)]
struct TextPayload<'a> {
    body: &'a str,
}

/// WhatsApp Cloud API client.
pub struct WaClient {
    client: Client,
    base_url: String,
    phone_id: String,
    bearer_token: String,
}

impl WaClient {
    /// Create a client for the given business phone number id.
    pub fn new(phone_id: String, bearer_token: String) -> Result<Self> {
        Self::with_base_url(defaults::GRAPH_API_BASE.to_string(), phone_id, bearer_token)
    }

    /// Create a client against a custom Graph API base URL (tests).
    pub fn with_base_url(base_url: String, phone_id: String, bearer_token: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(defaults::WA_SEND_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            phone_id,
            bearer_token,
        })
    }
}

#[async_trait]
impl OutboundMessenger for WaClient {
    async fn send_text(&self, recipient: &str, body: &str) -> Result<()> {
        let url = format!(
            "{}/{}/messages",
            self.base_url.trim_end_matches('/'),
            self.phone_id
        );
        let request = SendTextRequest {
            messaging_product: "whatsapp",
            to: recipient,
            message_type: "text",
            text: TextPayload { body },
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.bearer_token))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Request(format!("send failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(
                subsystem = "wa",
                component = "client",
                op = "send_text",
                status = %status,
                "WhatsApp send rejected"
            );
            return Err(Error::Request(format!(
                "graph api status {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        info!(
            subsystem = "wa",
            component = "client",
            op = "send_text",
            "Message sent"
        );
        Ok(())
    }
}
