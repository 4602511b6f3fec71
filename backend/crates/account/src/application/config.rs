//! Application Configuration

use std::env;
use std::time::Duration;

use platform::crypto::{random_bytes, sha256};

/// Environment variable holding the token signing secret
pub const TOKEN_SECRET_ENV: &str = "MODAI_TOKEN_SECRET";

/// Fixed development fallback secret source. A deployment MUST override
/// this via the environment; `from_env` warns when the fallback is used.
const DEV_SECRET: &str = "modai-dev-secret-change-me";

/// Credential lifetime: 7 days from issuance
const TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 3600);

/// Account application configuration
#[derive(Debug, Clone)]
pub struct AccountConfig {
    /// Token signing secret (32 bytes), read-only after startup
    pub token_secret: [u8; 32],
    /// Token lifetime
    pub token_ttl: Duration,
}

impl AccountConfig {
    /// Build a config from an arbitrary-length secret string.
    ///
    /// The string is hashed to 32 bytes so env-provided secrets of any
    /// length work.
    pub fn from_secret_str(secret: &str) -> Self {
        Self {
            token_secret: sha256(secret.as_bytes()),
            token_ttl: TOKEN_TTL,
        }
    }

    /// Read the secret from the environment, falling back to the fixed
    /// development secret (with a warning).
    pub fn from_env() -> Self {
        match env::var(TOKEN_SECRET_ENV) {
            Ok(secret) if !secret.trim().is_empty() => Self::from_secret_str(&secret),
            _ => {
                tracing::warn!(
                    "{TOKEN_SECRET_ENV} not set, using the development fallback secret; \
                     override it in any real deployment"
                );
                Self::from_secret_str(DEV_SECRET)
            }
        }
    }

    /// Config with a random secret (for tests and development)
    pub fn with_random_secret() -> Self {
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&random_bytes(32));
        Self {
            token_secret: secret,
            token_ttl: TOKEN_TTL,
        }
    }
}
