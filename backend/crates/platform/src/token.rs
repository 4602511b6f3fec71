//! Signed Bearer Tokens
//!
//! Stateless credentials binding a subject id to an expiry:
//! `base64url(claims_json) . base64url(hmac_sha256(secret, claims_b64))`.
//!
//! Validity is signature + expiry only; there is no server-side
//! revocation state. If revocation is ever needed, add a short-lived
//! denylist keyed by token at the verification boundary rather than
//! reintroducing session storage.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use crate::crypto::{from_base64url, to_base64url};

type HmacSha256 = Hmac<Sha256>;

/// Token verification failures.
///
/// Boundaries must collapse all three variants into a single
/// "unauthenticated" outcome; the sub-kind is for logs only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Not a recognizable signed structure
    #[error("Malformed token")]
    Malformed,

    /// Signature does not match
    #[error("Invalid token signature")]
    BadSignature,

    /// Embedded expiry has passed
    #[error("Token expired")]
    Expired,
}

#[derive(Serialize, Deserialize)]
struct Claims {
    /// Subject (account id)
    sub: String,
    /// Expiry, seconds since the Unix epoch
    exp: i64,
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

fn sign(secret: &[u8; 32], payload: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());
    to_base64url(&mac.finalize().into_bytes())
}

/// Issue a signed token for `subject` expiring `ttl` from now.
pub fn issue(secret: &[u8; 32], subject: &str, ttl: Duration) -> String {
    issue_with_expiry(secret, subject, now_secs() + ttl.as_secs() as i64)
}

/// Issue a signed token with an explicit expiry timestamp.
pub fn issue_with_expiry(secret: &[u8; 32], subject: &str, expires_at_secs: i64) -> String {
    let claims = Claims {
        sub: subject.to_string(),
        exp: expires_at_secs,
    };
    // Claims struct serialization cannot fail
    let payload = to_base64url(
        serde_json::to_vec(&claims)
            .expect("claims serialize")
            .as_slice(),
    );
    let signature = sign(secret, &payload);
    format!("{payload}.{signature}")
}

/// Verify a token and return the embedded subject id.
pub fn verify(secret: &[u8; 32], token: &str) -> Result<String, TokenError> {
    let (payload, signature_b64) = token.split_once('.').ok_or(TokenError::Malformed)?;
    if payload.is_empty() || signature_b64.contains('.') {
        return Err(TokenError::Malformed);
    }

    let signature = from_base64url(signature_b64).map_err(|_| TokenError::Malformed)?;

    // Constant-time signature check
    let mut mac =
        HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| TokenError::BadSignature)?;

    let claims_bytes = from_base64url(payload).map_err(|_| TokenError::Malformed)?;
    let claims: Claims =
        serde_json::from_slice(&claims_bytes).map_err(|_| TokenError::Malformed)?;

    if claims.exp < now_secs() {
        return Err(TokenError::Expired);
    }

    Ok(claims.sub)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [7u8; 32];

    #[test]
    fn test_issue_verify_roundtrip() {
        let token = issue(&SECRET, "account-123", Duration::from_secs(3600));
        let subject = verify(&SECRET, &token).unwrap();
        assert_eq!(subject, "account-123");
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = issue_with_expiry(&SECRET, "account-123", now_secs() - 10);
        assert_eq!(verify(&SECRET, &token), Err(TokenError::Expired));
    }

    #[test]
    fn test_bad_signature_rejected() {
        let other_secret = [9u8; 32];
        let token = issue(&other_secret, "account-123", Duration::from_secs(3600));
        assert_eq!(verify(&SECRET, &token), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let token = issue(&SECRET, "account-123", Duration::from_secs(3600));
        let (_, signature) = token.split_once('.').unwrap();
        let forged_payload = to_base64url(br#"{"sub":"someone-else","exp":9999999999}"#);
        let forged = format!("{forged_payload}.{signature}");
        assert_eq!(verify(&SECRET, &forged), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        assert_eq!(verify(&SECRET, ""), Err(TokenError::Malformed));
        assert_eq!(verify(&SECRET, "no-dot-here"), Err(TokenError::Malformed));
        assert_eq!(verify(&SECRET, ".sig"), Err(TokenError::Malformed));
        assert_eq!(verify(&SECRET, "a.b.c"), Err(TokenError::Malformed));
        assert_eq!(
            verify(&SECRET, "!!notb64!!.!!notb64!!"),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn test_valid_signature_invalid_claims_is_malformed() {
        let payload = to_base64url(b"not json at all");
        let signature = sign(&SECRET, &payload);
        let token = format!("{payload}.{signature}");
        assert_eq!(verify(&SECRET, &token), Err(TokenError::Malformed));
    }
}
