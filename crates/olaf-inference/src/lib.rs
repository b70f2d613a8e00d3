//! # olaf-inference
//!
//! Fallback LLM classifier backend for OLAF.
//!
//! When the rule parser cannot decide a message with enough confidence,
//! the dispatcher escalates here: one chat-completions call against an
//! OpenAI-compatible endpoint with a fixed, deterministic configuration
//! (temperature 0, bounded output tokens, JSON-object response format)
//! and a system instruction pinning the output to
//! `{action, items:[{name, quantity, location}]}`.

pub mod classifier;
pub mod types;

pub use classifier::{ClassifierConfig, FallbackClassifier};

// Re-export core types
pub use olaf_core::*;
