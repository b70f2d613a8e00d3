//! # olaf-wa
//!
//! WhatsApp Cloud API transport for OLAF.
//!
//! This crate provides:
//! - Inbound webhook payload types and message extraction
//! - HMAC-SHA256 signature verification over the raw request body
//! - The hub-challenge subscription handshake
//! - The outbound Graph API text client ([`WaClient`])

pub mod client;
pub mod payload;
pub mod signature;
pub mod verify;

pub use client::WaClient;
pub use payload::{extract_inbound, WebhookPayload};
pub use signature::{sign_body, verify_signature};
pub use verify::{check_verification, VerifyParams};

// Re-export core types
pub use olaf_core::*;
