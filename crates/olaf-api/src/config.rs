//! Process configuration from environment variables.

use olaf_core::{defaults, Error, Result};

/// Configuration for the webhook server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Postgres connection string.
    pub database_url: String,
    /// Listen address, host:port.
    pub bind_addr: String,
    /// Meta app secret (webhook signature key).
    pub meta_app_secret: String,
    /// Token expected on the webhook verification handshake.
    pub meta_verify_token: String,
    /// Bearer token for the Graph API.
    pub wa_bearer_token: String,
    /// Business phone number id for outbound sends.
    pub wa_phone_id: String,
    /// Whether the fallback classifier is configured. Without it, unclear
    /// messages get a clarification prompt instead of an LLM call.
    pub classifier_enabled: bool,
}

impl AppConfig {
    /// Load configuration, reading a `.env` file when present.
    ///
    /// | Variable | Required | Default |
    /// |----------|----------|---------|
    /// | `DATABASE_URL` | yes | — |
    /// | `META_APP_SECRET` | yes | — |
    /// | `META_VERIFY_TOKEN` | yes | — |
    /// | `WA_BEARER_TOKEN` | yes | — |
    /// | `WA_PHONE_ID` | yes | — |
    /// | `OPENAI_API_KEY` | no | classifier disabled |
    /// | `BIND_ADDR` | no | `0.0.0.0:8000` |
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: require("DATABASE_URL")?,
            bind_addr: std::env::var("BIND_ADDR")
                .unwrap_or_else(|_| defaults::BIND_ADDR.to_string()),
            meta_app_secret: require("META_APP_SECRET")?,
            meta_verify_token: require("META_VERIFY_TOKEN")?,
            wa_bearer_token: require("WA_BEARER_TOKEN")?,
            wa_phone_id: require("WA_PHONE_ID")?,
            classifier_enabled: std::env::var("OPENAI_API_KEY")
                .map(|key| !key.is_empty())
                .unwrap_or(false),
        })
    }
}

fn require(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| Error::Config(format!("{} must be set", name)))
}
