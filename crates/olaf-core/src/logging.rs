//! Structured logging field name constants for OLAF.
//!
//! All crates use these constants for consistent structured logging
//! fields, so log aggregation tools can query by standardized names
//! across every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events, terminal dispatch outcomes |
//! | DEBUG | Decision points (parse results, escalation choices) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "api", "db", "pipeline", "inference", "wa"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "dispatcher", "classifier", "pool", "webhook"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "handle", "classify", "try_claim", "send_text"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Platform message identifier being processed.
pub const MESSAGE_ID: &str = "message_id";

/// Resolved user id.
pub const USER_ID: &str = "user_id";

/// Sender phone number.
pub const SENDER: &str = "sender";

// ─── Pipeline fields ───────────────────────────────────────────────────────

/// Parsed intent ("add", "query", "unknown").
pub const INTENT: &str = "intent";

/// Rule-parser confidence for the decision being logged.
pub const CONFIDENCE: &str = "confidence";

/// Provenance of a parse result ("rules", "llm").
pub const PARSE_SOURCE: &str = "source";

/// Terminal dispatch outcome.
pub const OUTCOME: &str = "outcome";

// ─── Inference fields ──────────────────────────────────────────────────────

/// Model name used for classification.
pub const MODEL: &str = "model";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

// ─── Database fields ───────────────────────────────────────────────────────

/// Number of active connections in the pool.
pub const POOL_SIZE: &str = "pool_size";

/// Number of idle connections in the pool.
pub const POOL_IDLE: &str = "pool_idle";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
