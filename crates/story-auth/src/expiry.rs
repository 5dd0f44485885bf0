use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::AuthError;

#[derive(Deserialize)]
struct Claims {
    exp: Option<i64>,
}

/// Read the `exp` claim of an access token without verifying it.
///
/// Used for log lines only. The content API decides whether a token is
/// still accepted.
///
/// # Errors
///
/// Returns `AuthError::Other` when the token is not a three-segment JWT, the
/// payload is not base64url JSON, or `exp` is absent or out of range.
pub fn decode_expiry(jwt: &str) -> Result<DateTime<Utc>, AuthError> {
    let mut segments = jwt.split('.');
    let (Some(_), Some(payload), Some(_), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(AuthError::Other("token is not a three-segment JWT".into()));
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| AuthError::Other(format!("token payload is not base64url: {e}")))?;
    let claims: Claims = serde_json::from_slice(&bytes)
        .map_err(|e| AuthError::Other(format!("token claims are not JSON: {e}")))?;
    let exp = claims
        .exp
        .ok_or_else(|| AuthError::Other("token has no exp claim".into()))?;
    DateTime::from_timestamp(exp, 0)
        .ok_or_else(|| AuthError::Other(format!("exp {exp} is out of range")))
}

#[cfg(test)]
pub(crate) fn token_with_claims(claims: &str) -> String {
    format!(
        "{}.{}.sig",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(claims)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_exp_from_directus_style_token() {
        let token = token_with_claims(r#"{"id":"user-1","role":"editor","exp":1710000900}"#);
        let expires_at = decode_expiry(&token).unwrap();
        assert_eq!(expires_at.timestamp(), 1_710_000_900);
    }

    #[test]
    fn opaque_tokens_are_not_jwts() {
        let err = decode_expiry("static-api-token").unwrap_err();
        assert!(err.to_string().contains("three-segment"));
        assert!(decode_expiry("a.b.c.d").is_err());
    }

    #[test]
    fn token_without_exp() {
        let err = decode_expiry(&token_with_claims(r#"{"id":"u"}"#)).unwrap_err();
        assert!(err.to_string().contains("no exp claim"));
    }

    #[test]
    fn payload_must_be_base64url_json() {
        let err = decode_expiry("header.!!!.sig").unwrap_err();
        assert!(err.to_string().contains("base64url"));

        let not_json = format!("h.{}.s", URL_SAFE_NO_PAD.encode("plain"));
        assert!(decode_expiry(&not_json).unwrap_err().to_string().contains("not JSON"));
    }
}
