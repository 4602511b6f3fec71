//! Application Layer - Use Cases
//!
//! The three operations below are the only writers of account state and
//! the only producers of credentials.

pub mod config;
pub mod login;
pub mod register;
pub mod update_profile;

pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use update_profile::UpdateProfileUseCase;
