//! Shared formatting helpers.

pub mod format;

pub use format::{format_date, truncate_string};
