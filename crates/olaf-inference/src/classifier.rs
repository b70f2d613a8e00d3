//! Fallback classifier over an OpenAI-compatible chat completions API.
//!
//! Invoked only when the rule parser is not confident enough. One
//! outbound call per invocation, no automatic retries — a single failure
//! degrades to the unavailable path and the dispatcher answers with a
//! generic processing-error message.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use olaf_core::{defaults, ClassifierBackend, ClassifyError, Error, ParseResult, ParseSource, Result};

use crate::types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ClassifierOutput, ResponseFormat,
};

/// System instruction constraining the model to the fixed JSON contract.
const SYSTEM_PROMPT: &str =
    "Return ONLY JSON with keys: action, items[].name, items[].quantity, items[].location.";

/// Configuration for the fallback classifier.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Base URL for the API endpoint.
    pub base_url: String,
    /// API key for authentication (optional for local endpoints).
    pub api_key: Option<String>,
    /// Model to use for classification.
    pub model: String,
    /// Output-token budget per call.
    pub max_tokens: u32,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::CLASSIFIER_BASE_URL.to_string(),
            api_key: None,
            model: defaults::CLASSIFIER_MODEL.to_string(),
            max_tokens: defaults::CLASSIFIER_MAX_TOKENS,
            timeout_seconds: defaults::CLASSIFIER_TIMEOUT_SECS,
        }
    }
}

impl ClassifierConfig {
    /// Create from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `OPENAI_BASE_URL` | `https://api.openai.com/v1` |
    /// | `OPENAI_API_KEY` | unset |
    /// | `OPENAI_MODEL` | `gpt-4o-mini` |
    /// | `OPENAI_MAX_TOKENS` | `150` |
    /// | `OPENAI_TIMEOUT` | `30` |
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| defaults::CLASSIFIER_BASE_URL.to_string()),
            api_key: std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            model: std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| defaults::CLASSIFIER_MODEL.to_string()),
            max_tokens: std::env::var("OPENAI_MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults::CLASSIFIER_MAX_TOKENS),
            timeout_seconds: std::env::var("OPENAI_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults::CLASSIFIER_TIMEOUT_SECS),
        }
    }
}

/// OpenAI-compatible fallback classifier.
pub struct FallbackClassifier {
    client: Client,
    config: ClassifierConfig,
}

impl FallbackClassifier {
    /// Create a new classifier with the given configuration.
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Classifier(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            subsystem = "inference",
            component = "classifier",
            model = %config.model,
            base_url = %config.base_url,
            "Initializing fallback classifier"
        );

        Ok(Self { client, config })
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Map a well-formed model answer onto a parse result.
    ///
    /// Only the first item is honored; surplus items are discarded (a
    /// documented limitation, logged so it is never a silent drop).
    /// Missing fields get explicit placeholders so downstream persistence
    /// always has non-null values.
    fn to_parse_result(output: ClassifierOutput) -> ParseResult {
        if output.action.as_deref() != Some("add") || output.items.is_empty() {
            debug!(
                subsystem = "inference",
                component = "classifier",
                action = output.action.as_deref().unwrap_or("none"),
                "Classifier returned a non-add answer"
            );
            return ParseResult::unknown(ParseSource::Llm);
        }

        if output.items.len() > 1 {
            warn!(
                subsystem = "inference",
                component = "classifier",
                discarded = output.items.len() - 1,
                "Classifier returned multiple items; honoring the first only"
            );
        }
        let item = &output.items[0];

        let food_name = item
            .name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| defaults::FALLBACK_FOOD_NAME.to_string());
        let quantity_text = item
            .quantity_text()
            .unwrap_or_else(|| defaults::FALLBACK_QUANTITY.to_string());
        let location = item
            .location
            .clone()
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| defaults::FALLBACK_LOCATION.to_string());

        ParseResult::add(
            Some(food_name),
            Some(quantity_text),
            Some(location),
            1.0,
            ParseSource::Llm,
        )
    }
}

#[async_trait]
impl ClassifierBackend for FallbackClassifier {
    async fn classify(&self, text: &str) -> std::result::Result<ParseResult, ClassifyError> {
        let started = Instant::now();

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: text.to_string(),
                },
            ],
            temperature: 0.0,
            max_tokens: self.config.max_tokens,
            response_format: ResponseFormat::json_object(),
        };

        let mut http = self.client.post(self.endpoint()).json(&request);
        if let Some(ref api_key) = self.config.api_key {
            http = http.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = http
            .send()
            .await
            .map_err(|e| ClassifyError::Unavailable(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifyError::Unavailable(format!(
                "status {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ClassifyError::Malformed(format!("bad response envelope: {}", e)))?;

        let content = completion
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .ok_or_else(|| ClassifyError::Malformed("empty completion".to_string()))?;

        let output: ClassifierOutput = serde_json::from_str(content)
            .map_err(|e| ClassifyError::Malformed(format!("not the required shape: {}", e)))?;

        let result = Self::to_parse_result(output);
        debug!(
            subsystem = "inference",
            component = "classifier",
            op = "classify",
            model = %self.config.model,
            intent = %result.intent,
            duration_ms = started.elapsed().as_millis() as u64,
            "Classification complete"
        );
        Ok(result)
    }
}
