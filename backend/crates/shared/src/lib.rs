//! Shared Kernel - Domain-crossing minimal core
//!
//! The smallest vocabulary shared by every backend crate:
//! - Unified error type and result alias
//! - HTTP status classification for errors
//!
//! **Design Principle**: only things that are hard to change and mean the
//! same thing across all domains belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
