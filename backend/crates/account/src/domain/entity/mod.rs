pub mod account;
pub mod outfit;
