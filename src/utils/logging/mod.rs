//! Logging utilities
//!
//! Consistent operation logging on top of the `log` facade.

pub mod log;

// Re-export commonly used functions for convenience
pub use log::{log_operation_complete, log_operation_start, log_warning};
