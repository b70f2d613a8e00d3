//! # olaf-core
//!
//! Core types, traits, and message-understanding logic for OLAF, a
//! WhatsApp assistant that turns free-text food messages into structured
//! inventory records.
//!
//! This crate provides:
//! - The rule-based intent parser (fast path, no I/O)
//! - The quantity normalizer (free-form quantity text → value + unit)
//! - The reply composer (terminal state → user-facing template)
//! - Repository, classifier, and messenger traits implemented by the
//!   `olaf-db`, `olaf-inference`, and `olaf-wa` crates
//! - The shared error type and structured-logging field constants

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod quantity;
pub mod reply;
pub mod rules;
pub mod traits;

pub use error::{ClassifyError, Error, Result};
pub use models::{
    FoodItem, InboundMessage, Intent, MessageContent, NewFoodItem, ParseResult, ParseSource,
    Quantity,
};
pub use quantity::normalize;
pub use reply::Reply;
pub use rules::parse;
pub use traits::{
    ClassifierBackend, FoodItemRepository, InboundMessageRepository, OutboundMessenger,
    UserRepository,
};
