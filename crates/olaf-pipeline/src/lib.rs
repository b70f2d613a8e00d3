//! # olaf-pipeline
//!
//! Per-message action dispatcher for OLAF.
//!
//! Consumes one authenticated [`olaf_core::InboundMessage`] and drives it
//! to a terminal state: idempotency claim, rule parse, optional fallback
//! classification, persistence, and the outbound reply.

pub mod dispatch;

pub use dispatch::{DispatchOutcome, DispatchPolicy, Dispatcher, ParseOutcome};

// Re-export core types
pub use olaf_core::*;
