//! Arrow data handling utilities
//!
//! Helpers for locating columns in record batches, adapting their types and
//! extracting typed values with missing data kept as `None`.

pub mod array_utils;
pub mod extractors;

// Re-export commonly used functions for convenience
pub use array_utils::{downcast_array, get_column};
pub use extractors::{extract_datetimes, extract_flags, extract_float64, extract_strings};
