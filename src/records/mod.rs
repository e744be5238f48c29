//! Completion record types and display helpers.

pub mod display;
pub mod types;

pub use display::{age_years, elapsed_minutes_decimal, format_age, format_elapsed};
pub use types::CompletionRecord;
