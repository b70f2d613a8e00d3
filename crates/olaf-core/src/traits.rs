//! Core traits for OLAF abstractions.
//!
//! These traits define the seams between the pipeline and its
//! collaborators (persistence, the fallback classifier, the outbound
//! messenger), enabling pluggable backends and testability.

use async_trait::async_trait;

use crate::error::{ClassifyError, Result};
use crate::models::{NewFoodItem, ParseResult};

// =============================================================================
// PERSISTENCE GATEWAY
// =============================================================================

/// Idempotency gate over inbound messages.
#[async_trait]
pub trait InboundMessageRepository: Send + Sync {
    /// Atomically claim a message identifier (insert-if-absent).
    ///
    /// Returns `true` when this caller claimed the id, `false` when it was
    /// already seen. Must be a single atomic operation so that concurrent
    /// redelivery of the same id yields exactly one `true`.
    async fn try_claim(&self, message_id: &str, sender: &str) -> Result<bool>;
}

/// User lookup-or-create keyed by sender phone number.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Resolve a sender to a user id, creating the user on first contact.
    async fn resolve(&self, sender: &str, display_name: Option<&str>) -> Result<i64>;
}

/// Inventory record persistence.
#[async_trait]
pub trait FoodItemRepository: Send + Sync {
    /// Insert one inventory record, returning its id.
    async fn insert(&self, item: &NewFoodItem) -> Result<i64>;
}

// =============================================================================
// FALLBACK CLASSIFIER
// =============================================================================

/// Secondary classifier, invoked when the rule parser is not confident.
#[async_trait]
pub trait ClassifierBackend: Send + Sync {
    /// Classify one message via the external model.
    ///
    /// Exactly one outbound call per invocation, no retries. A
    /// well-formed "add" answer comes back as an add-intent result with
    /// confidence 1.0; an on-contract negative comes back with unknown
    /// intent. Transport or contract failures are [`ClassifyError`]s.
    async fn classify(&self, text: &str) -> std::result::Result<ParseResult, ClassifyError>;
}

// =============================================================================
// OUTBOUND MESSENGER
// =============================================================================

/// Outbound text delivery to the messaging platform.
///
/// At-least-once semantics: the caller logs failures and never rolls back
/// prior persistence on account of an undelivered reply.
#[async_trait]
pub trait OutboundMessenger: Send + Sync {
    /// Send a text message to a recipient.
    async fn send_text(&self, recipient: &str, body: &str) -> Result<()>;
}
