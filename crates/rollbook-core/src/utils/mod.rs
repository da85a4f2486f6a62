//! Utility functions for string formatting and manipulation.

pub mod format;

// Re-export commonly used functions at module level
pub use format::{
    cmp_ignore_case, format_date, format_optional, format_optional_number, truncate_string,
};
