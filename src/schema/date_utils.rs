//! Day-first date and datetime parsing.
//!
//! Source files write datetimes as `DD/MM/YYYY HH:MM` (and variants). A value that
//! matches none of the configured formats is treated as missing, never as an error.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;

/// Configuration for date format handling
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DateFormatConfig {
    /// Datetime formats, tried in order
    pub datetime_formats: Vec<String>,
    /// Date-only formats, tried after every datetime format. The result is midnight.
    pub date_formats: Vec<String>,
}

impl Default for DateFormatConfig {
    fn default() -> Self {
        Self {
            datetime_formats: vec![
                "%d/%m/%Y %H:%M:%S".to_string(),
                "%d/%m/%Y %H:%M".to_string(),
                "%d-%m-%Y %H:%M:%S".to_string(),
                "%d-%m-%Y %H:%M".to_string(),
                "%d.%m.%Y %H:%M:%S".to_string(),
                "%d.%m.%Y %H:%M".to_string(),
                "%Y-%m-%d %H:%M:%S%.f".to_string(),
                "%Y-%m-%dT%H:%M:%S%.f".to_string(),
                "%Y-%m-%d %H:%M".to_string(),
                "%Y-%m-%dT%H:%M".to_string(),
            ],
            date_formats: vec![
                "%d/%m/%Y".to_string(), // UK: 15/01/2023
                "%d-%m-%Y".to_string(), // European: 15-01-2023
                "%d.%m.%Y".to_string(), // 15.01.2023
                "%Y-%m-%d".to_string(), // ISO format: 2023-01-15
                "%Y%m%d".to_string(),   // Compact: 20230115
            ],
        }
    }
}

/// Parse a datetime string with multiple format attempts.
///
/// Returns `None` for blank input or when no format matches.
#[must_use]
pub fn parse_datetime_string(s: &str, config: &DateFormatConfig) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for format in &config.datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    parse_date_string(s, config).map(|d| d.and_time(NaiveTime::MIN))
}

/// Parse a date-only string with the configured date formats
#[must_use]
pub fn parse_date_string(s: &str, config: &DateFormatConfig) -> Option<NaiveDate> {
    let s = s.trim();
    config
        .date_formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
}
