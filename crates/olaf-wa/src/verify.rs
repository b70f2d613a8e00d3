//! Webhook subscription verification (`GET /webhook` hub challenge).

use serde::Deserialize;

/// Query parameters Meta sends on the verification handshake.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyParams {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

/// Check the handshake token; the challenge to echo back on success.
pub fn check_verification(params: &VerifyParams, expected_token: &str) -> Option<String> {
    if params.verify_token.as_deref() == Some(expected_token) {
        Some(params.challenge.clone().unwrap_or_default())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_token_echoes_challenge() {
        let params = VerifyParams {
            mode: Some("subscribe".to_string()),
            verify_token: Some("expected".to_string()),
            challenge: Some("challenge-42".to_string()),
        };
        assert_eq!(
            check_verification(&params, "expected").as_deref(),
            Some("challenge-42")
        );
    }

    #[test]
    fn test_wrong_or_missing_token_rejected() {
        let params = VerifyParams {
            verify_token: Some("wrong".to_string()),
            ..VerifyParams::default()
        };
        assert!(check_verification(&params, "expected").is_none());
        assert!(check_verification(&VerifyParams::default(), "expected").is_none());
    }

    #[test]
    fn test_missing_challenge_yields_empty_echo() {
        let params = VerifyParams {
            verify_token: Some("expected".to_string()),
            ..VerifyParams::default()
        };
        assert_eq!(check_verification(&params, "expected").as_deref(), Some(""));
    }
}
