//! HMAC-SHA256 webhook signature tests.
//!
//! Verifies that signatures computed independently (the way Meta computes
//! them) are accepted by the verification used in the inbound handler,
//! and that the signing scheme is deterministic.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use olaf_wa::{sign_body, verify_signature};

type HmacSha256 = Hmac<Sha256>;

/// Compute the header value the same way the platform does.
fn compute_signature(secret: &str, body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(body);
    format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
}

#[test]
fn test_independently_computed_signature_is_accepted() {
    let secret = "app-secret";
    let body = br#"{"object":"whatsapp_business_account","entry":[]}"#;

    let header = compute_signature(secret, body);
    assert!(verify_signature(secret, body, &header));
}

#[test]
fn test_sign_body_matches_reference_computation() {
    let secret = "app-secret";
    let body = br#"{"entry":[{"changes":[]}]}"#;

    assert_eq!(sign_body(secret, body), compute_signature(secret, body));
}

#[test]
fn test_signature_format() {
    let header = compute_signature("app-secret", b"payload");

    assert!(header.starts_with("sha256="));
    let hex_part = &header["sha256=".len()..];
    assert_eq!(hex_part.len(), 64);
    assert!(hex_part.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_signature_deterministic_and_input_sensitive() {
    let secret = "app-secret";
    let body = br#"{"entry":[]}"#;

    // Same input → same output.
    assert_eq!(compute_signature(secret, body), compute_signature(secret, body));

    // Different body → different signature.
    assert_ne!(
        compute_signature(secret, body),
        compute_signature(secret, br#"{"entry":[{}]}"#)
    );

    // Different secret → different signature.
    assert_ne!(
        compute_signature(secret, body),
        compute_signature("other-secret", body)
    );
}

#[test]
fn test_tampered_delivery_is_rejected() {
    let secret = "app-secret";
    let header = compute_signature(secret, br#"{"entry":[]}"#);

    assert!(!verify_signature(secret, br#"{"entry":[{}]}"#, &header));
    assert!(!verify_signature("other-secret", br#"{"entry":[]}"#, &header));
}
