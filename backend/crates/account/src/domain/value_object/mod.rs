pub mod account_id;
pub mod display_name;
pub mod email;
pub mod language;
pub mod plan;
pub mod style;
pub mod theme;
