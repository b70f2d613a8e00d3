//! Wire types for the OpenAI-compatible chat completions API and the
//! classifier's fixed output contract.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

// =============================================================================
// REQUEST
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    /// Always 0.0: no sampling randomness, reproducible outputs for
    /// identical input.
    pub temperature: f32,
    pub max_tokens: u32,
    pub response_format: ResponseFormat,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self {
            format_type: "json_object".to_string(),
        }
    }
}

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoiceMessage {
    pub content: Option<String>,
}

// =============================================================================
// CLASSIFIER OUTPUT CONTRACT
// =============================================================================

/// The JSON shape the system prompt constrains the model to.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierOutput {
    pub action: Option<String>,
    #[serde(default)]
    pub items: Vec<ClassifierItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierItem {
    pub name: Option<String>,
    /// Models occasionally emit a bare number here despite the contract,
    /// so this stays a raw value until stringified.
    pub quantity: Option<JsonValue>,
    pub location: Option<String>,
}

impl ClassifierItem {
    /// Quantity as display text, when present and representable.
    pub fn quantity_text(&self) -> Option<String> {
        match &self.quantity {
            Some(JsonValue::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(JsonValue::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }
}
