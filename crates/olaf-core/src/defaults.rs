//! Centralized default constants for OLAF.
//!
//! **This module is the single source of truth** for shared default
//! values. Crates reference these constants instead of defining their own
//! magic numbers.

// =============================================================================
// DISPATCH POLICY
// =============================================================================

/// Minimum rule-parser confidence for a direct write without escalating
/// to the fallback classifier. Heuristic policy, injectable per
/// dispatcher — nothing downstream may assume this exact value.
pub const CONFIDENCE_THRESHOLD: f32 = 0.8;

// =============================================================================
// FALLBACK CLASSIFIER
// =============================================================================

/// Default OpenAI-compatible API endpoint.
pub const CLASSIFIER_BASE_URL: &str = "https://api.openai.com/v1";

/// Default classification model.
pub const CLASSIFIER_MODEL: &str = "gpt-4o-mini";

/// Output-token budget for one classification call.
pub const CLASSIFIER_MAX_TOKENS: u32 = 150;

/// Timeout for one classification request (seconds).
pub const CLASSIFIER_TIMEOUT_SECS: u64 = 30;

/// Placeholder food name when the model omits one. Exists so persistence
/// always has non-null values, not because the model inferred it.
pub const FALLBACK_FOOD_NAME: &str = "item";

/// Placeholder quantity text when the model omits one.
pub const FALLBACK_QUANTITY: &str = "unknown";

/// Placeholder location when the model omits one.
pub const FALLBACK_LOCATION: &str = "pantry";

// =============================================================================
// WHATSAPP TRANSPORT
// =============================================================================

/// Meta Graph API base URL.
pub const GRAPH_API_BASE: &str = "https://graph.facebook.com/v20.0";

/// Timeout for one outbound send (seconds).
pub const WA_SEND_TIMEOUT_SECS: u64 = 20;

// =============================================================================
// DATABASE POOL
// =============================================================================

/// Maximum connections in the pool. Sized for a single small bot process.
pub const POOL_MAX_CONNECTIONS: u32 = 5;

/// Minimum connections kept open.
pub const POOL_MIN_CONNECTIONS: u32 = 1;

/// Connection acquire timeout (seconds).
pub const POOL_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Idle connection timeout (seconds).
pub const POOL_IDLE_TIMEOUT_SECS: u64 = 600;

// =============================================================================
// HTTP SURFACE
// =============================================================================

/// Default bind address for the webhook server.
pub const BIND_ADDR: &str = "0.0.0.0:8000";

/// Maximum accepted webhook body size in bytes.
pub const MAX_WEBHOOK_BODY_BYTES: usize = 256 * 1024;
