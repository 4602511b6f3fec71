//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no domain knowledge:
//! - Cryptographic utilities (SHA-256, Base64)
//! - Password hashing (Argon2id, randomized salt)
//! - Signed bearer tokens (HMAC-SHA256, embedded expiry)
//! - Client IP extraction
//! - Sliding-window rate limiting

pub mod client;
pub mod crypto;
pub mod password;
pub mod rate_limit;
pub mod token;
