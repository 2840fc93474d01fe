//! Permission extraction from session tokens.
//!
//! The backend issues JWT-shaped bearer tokens whose payload segment may
//! carry a `permissions` claim. Decoding is best-effort: the client never
//! validates the signature and treats any malformed token as carrying no
//! permissions at all.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use serde::Deserialize;

#[derive(Deserialize)]
struct TokenPayload {
    #[serde(default)]
    permissions: Option<Vec<serde_json::Value>>,
}

/// Decodes the permission list embedded in a bearer token.
///
/// Splits the token on `.`, base64-decodes the middle segment, parses it as
/// JSON and reads the `permissions` field if it is an array. Every failure
/// mode — missing segment, bad base64, bad UTF-8, bad JSON, missing or
/// non-array field — yields an empty list rather than an error: a corrupt
/// or expired token must never crash the client.
///
/// Returned permissions are lowercased; non-string entries are skipped.
pub fn decode_permissions(token: &str) -> Vec<String> {
    let Some(segment) = token.split('.').nth(1) else {
        return Vec::new();
    };

    let Some(bytes) = decode_segment(segment) else {
        return Vec::new();
    };

    let Ok(payload) = serde_json::from_slice::<TokenPayload>(&bytes) else {
        return Vec::new();
    };

    payload
        .permissions
        .unwrap_or_default()
        .iter()
        .filter_map(|value| value.as_str())
        .map(|p| p.to_lowercase())
        .collect()
}

/// JWT segments use the URL-safe alphabet without padding, but tokens from
/// older backend deployments were standard-base64 encoded.
fn decode_segment(segment: &str) -> Option<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .or_else(|_| STANDARD.decode(segment))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_token(payload: &str) -> String {
        let encoded = URL_SAFE_NO_PAD.encode(payload.as_bytes());
        format!("header.{encoded}.signature")
    }

    #[test]
    fn test_decode_permissions_from_valid_token() {
        let token = make_token(r#"{"sub": "ana@x.com", "permissions": ["Messages.Create", "*"]}"#);
        assert_eq!(
            decode_permissions(&token),
            vec!["messages.create".to_string(), "*".to_string()]
        );
    }

    #[test]
    fn test_decode_skips_non_string_entries() {
        let token = make_token(r#"{"permissions": ["users.list", 42, null]}"#);
        assert_eq!(decode_permissions(&token), vec!["users.list".to_string()]);
    }

    #[test]
    fn test_missing_permissions_field_yields_empty() {
        let token = make_token(r#"{"sub": "ana@x.com"}"#);
        assert!(decode_permissions(&token).is_empty());
    }

    #[test]
    fn test_permissions_not_an_array_yields_empty() {
        let token = make_token(r#"{"permissions": "messages.create"}"#);
        assert!(decode_permissions(&token).is_empty());
    }

    #[test]
    fn test_malformed_tokens_never_panic() {
        for token in [
            "",
            "no-dots-here",
            "a.!!!not-base64!!!.c",
            "a..c",
            &make_token("not json at all"),
            &make_token(r#"{"permissions": "#),
        ] {
            assert!(decode_permissions(token).is_empty(), "token: {token:?}");
        }
    }

    #[test]
    fn test_standard_base64_fallback() {
        let encoded = STANDARD.encode(br#"{"permissions": ["groups.list"]}"#);
        let token = format!("h.{encoded}.s");
        assert_eq!(decode_permissions(&token), vec!["groups.list".to_string()]);
    }
}
