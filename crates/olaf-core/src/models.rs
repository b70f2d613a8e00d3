//! Core data models for OLAF.
//!
//! These types are shared across all OLAF crates and represent the domain
//! entities of the message-understanding pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::quantity;

// =============================================================================
// PARSE TYPES
// =============================================================================

/// Coarse category of what the user wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Store a food item.
    Add,
    /// Ask what is currently in the inventory.
    Query,
    /// Nothing recognizable.
    Unknown,
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Query => write!(f, "query"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Which path produced a parse result. Persisted with the record as
/// forensic provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseSource {
    Rules,
    Llm,
}

impl ParseSource {
    /// Database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rules => "rules",
            Self::Llm => "llm",
        }
    }
}

impl std::fmt::Display for ParseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalized numeric view of a free-form quantity string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    /// Decimal magnitude, when the raw text led with a number.
    pub value: Option<f64>,
    /// Lower-cased unit token following the number, if any.
    pub unit: Option<String>,
}

/// Structured understanding of one inbound message, produced by either
/// the rule parser or the fallback classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResult {
    pub intent: Intent,
    /// Extracted food name, original casing preserved. Non-empty when present.
    pub food_name: Option<String>,
    /// Raw quantity text as typed by the user, preserved for display.
    pub quantity_text: Option<String>,
    /// Normalized value/unit, always derived from `quantity_text`.
    pub quantity: Quantity,
    /// Storage location, verbatim. Small open vocabulary, not enforced.
    pub location: Option<String>,
    /// Self-estimated extraction confidence in [0.0, 1.0].
    pub confidence: f32,
    pub source: ParseSource,
}

impl ParseResult {
    /// An add-intent result. The normalized quantity is derived here so it
    /// can never drift from the raw text.
    pub fn add(
        food_name: Option<String>,
        quantity_text: Option<String>,
        location: Option<String>,
        confidence: f32,
        source: ParseSource,
    ) -> Self {
        let quantity = quantity_text
            .as_deref()
            .map(quantity::normalize)
            .unwrap_or_default();
        Self {
            intent: Intent::Add,
            food_name,
            quantity_text,
            quantity,
            location,
            confidence,
            source,
        }
    }

    /// A query-intent result. Carries no extracted fields.
    pub fn query(confidence: f32, source: ParseSource) -> Self {
        Self {
            intent: Intent::Query,
            food_name: None,
            quantity_text: None,
            quantity: Quantity::default(),
            location: None,
            confidence,
            source,
        }
    }

    /// The empty result: nothing recognized, confidence zero.
    pub fn unknown(source: ParseSource) -> Self {
        Self {
            intent: Intent::Unknown,
            food_name: None,
            quantity_text: None,
            quantity: Quantity::default(),
            location: None,
            confidence: 0.0,
            source,
        }
    }

    /// True when both slots the dispatcher requires for a direct write
    /// (food name and location) are present.
    pub fn has_required_add_slots(&self) -> bool {
        self.food_name.as_deref().is_some_and(|f| !f.is_empty())
            && self.location.as_deref().is_some_and(|l| !l.is_empty())
    }
}

// =============================================================================
// INBOUND MESSAGE
// =============================================================================

/// Content of an inbound message after transport-level extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageContent {
    /// Plain text body.
    Text(String),
    /// Voice note. Transcription is not handled by this core.
    Audio,
    /// Any other content type (image, sticker, location share, ...),
    /// tagged with the transport's type string.
    Other(String),
}

/// One authenticated inbound message, as handed to the dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Platform message identifier (WhatsApp `wamid.*`). Idempotency key.
    pub message_id: String,
    /// Sender phone number.
    pub sender: String,
    /// Sender profile name, when the platform supplied one.
    pub display_name: Option<String>,
    pub content: MessageContent,
}

// =============================================================================
// PERSISTED RECORDS
// =============================================================================

/// Insert payload for one inventory record.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFoodItem {
    pub user_id: i64,
    pub food_name: String,
    /// Raw quantity text as typed ("" when the user gave none).
    pub quantity_text: String,
    pub quantity_value: Option<f64>,
    pub quantity_unit: Option<String>,
    pub location: String,
    /// Originating message identifier.
    pub message_id: String,
    /// Which path produced the record.
    pub parsed_by: ParseSource,
}

impl NewFoodItem {
    /// Build an insert payload from a parse result.
    ///
    /// Re-derives the normalized value/unit from the raw quantity text so
    /// the persisted pair can never disagree with what the user typed,
    /// regardless of how the [`ParseResult`] was constructed.
    pub fn from_parse(user_id: i64, message_id: &str, parse: &ParseResult) -> Self {
        let quantity_text = parse.quantity_text.clone().unwrap_or_default();
        let quantity = quantity::normalize(&quantity_text);
        Self {
            user_id,
            food_name: parse.food_name.clone().unwrap_or_default(),
            quantity_text,
            quantity_value: quantity.value,
            quantity_unit: quantity.unit,
            location: parse.location.clone().unwrap_or_default(),
            message_id: message_id.to_string(),
            parsed_by: parse.source,
        }
    }
}

/// A persisted inventory record. Never mutated or deleted by this core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: i64,
    pub user_id: i64,
    pub food_name: String,
    pub quantity_text: String,
    pub quantity_value: Option<f64>,
    pub quantity_unit: Option<String>,
    pub location: String,
    /// Always false at creation; consumption tracking is out of scope here.
    pub consumed: bool,
    pub message_id: Option<String>,
    pub parsed_by: String,
    pub created_at: DateTime<Utc>,
}
