//! Account Client
//!
//! Consuming-application side of the account service:
//! - `api` - remote HTTP surface behind the `RemoteApi` trait seam
//! - `session` - durable local credential + snapshot store
//! - `sync` - optimistic profile mutation with automatic rollback
//! - `types` - wire shapes as the server serializes them
//!
//! The controller never panics on a failed mutation; failures roll the
//! local state back and degrade to a dismissible error message.

pub mod api;
pub mod error;
pub mod session;
pub mod sync;
pub mod types;

pub use api::{AuthSuccess, HttpApi, RemoteApi};
pub use error::{ClientError, ClientResult};
pub use session::SessionStore;
pub use sync::SyncController;
pub use types::User;
