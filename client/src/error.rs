//! Client Error Types

use thiserror::Error;

/// Client-side result type alias
pub type ClientResult<T> = Result<T, ClientError>;

/// Everything that can go wrong talking to or caching the account
/// service. None of these abort the application; the sync controller
/// recovers locally and surfaces the message.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Server rejected the request; carries the problem body's detail
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Transport failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Local JSON handling failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Durable session store failure
    #[error("Session store error: {0}")]
    Session(#[from] std::io::Error),
}
