//! Field extraction utilities for Arrow record batches
//!
//! Each extractor turns one column of a batch into a `Vec<Option<T>>` with one
//! entry per row. Missing, blank and unparsable cells all become `None`.

use arrow::array::{Array, BooleanArray, Date32Array, Float64Array, StringArray, TimestampMillisecondArray};
use arrow::datatypes::{DataType, TimeUnit};
use arrow::record_batch::RecordBatch;
use chrono::{NaiveDateTime, NaiveTime};

use crate::error::Result;
use crate::schema::date_utils::{DateFormatConfig, parse_datetime_string};
use crate::utils::arrow::array_utils::{downcast_array, get_column};

/// Extract a string column. Cells are trimmed; empty strings become `None`.
///
/// Returns `Ok(None)` if the column is optional and absent.
pub fn extract_strings(
    batch: &RecordBatch,
    column_name: &str,
    required: bool,
) -> Result<Option<Vec<Option<String>>>> {
    let Some(array) = get_column(batch, column_name, &DataType::Utf8, required)? else {
        return Ok(None);
    };
    let strings = downcast_array::<StringArray>(&array, column_name, "String")?;

    Ok(Some(
        strings
            .iter()
            .map(|v| v.map(str::trim).filter(|s| !s.is_empty()).map(String::from))
            .collect(),
    ))
}

/// Extract a floating point column.
///
/// UTF-8 cells are trimmed and parsed; other numeric types are cast.
pub fn extract_float64(
    batch: &RecordBatch,
    column_name: &str,
    required: bool,
) -> Result<Option<Vec<Option<f64>>>> {
    if is_utf8(batch, column_name) {
        return Ok(extract_strings(batch, column_name, required)?.map(|values| {
            values
                .into_iter()
                .map(|v| v.and_then(|s| s.parse::<f64>().ok()).filter(|f| f.is_finite()))
                .collect()
        }));
    }

    let Some(array) = get_column(batch, column_name, &DataType::Float64, required)? else {
        return Ok(None);
    };
    let floats = downcast_array::<Float64Array>(&array, column_name, "Float64")?;
    Ok(Some(floats.iter().map(|v| v.filter(|f| f.is_finite())).collect()))
}

/// Extract a boolean-like flag column.
///
/// Accepts native booleans, numbers (zero is `false`) and the strings
/// `1/0`, `true/false`, `yes/no`, `y/n` in any case.
pub fn extract_flags(
    batch: &RecordBatch,
    column_name: &str,
    required: bool,
) -> Result<Option<Vec<Option<bool>>>> {
    let is_bool = batch
        .schema()
        .field_with_name(column_name)
        .is_ok_and(|f| f.data_type() == &DataType::Boolean);

    if is_bool {
        let Some(array) = get_column(batch, column_name, &DataType::Boolean, required)? else {
            return Ok(None);
        };
        let flags = downcast_array::<BooleanArray>(&array, column_name, "Boolean")?;
        return Ok(Some(flags.iter().collect()));
    }

    if is_utf8(batch, column_name) {
        return Ok(extract_strings(batch, column_name, required)?
            .map(|values| values.into_iter().map(|v| v.and_then(|s| parse_flag(&s))).collect()));
    }

    Ok(extract_float64(batch, column_name, required)?
        .map(|values| values.into_iter().map(|v| v.map(|f| f != 0.0)).collect()))
}

/// Interpret a textual boolean-like value
#[must_use]
pub fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "1.0" | "true" | "yes" | "y" => Some(true),
        "0" | "0.0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

/// Extract a datetime column.
///
/// UTF-8 cells are parsed day-first with `formats`. Timestamps of any unit and
/// `Date32` values (as midnight) are converted directly.
pub fn extract_datetimes(
    batch: &RecordBatch,
    column_name: &str,
    required: bool,
    formats: &DateFormatConfig,
) -> Result<Option<Vec<Option<NaiveDateTime>>>> {
    let data_type = batch
        .schema()
        .field_with_name(column_name)
        .map(|f| f.data_type().clone())
        .ok();

    match data_type {
        Some(DataType::Timestamp(_, _) | DataType::Date64) => {
            let target = DataType::Timestamp(TimeUnit::Millisecond, None);
            let Some(array) = get_column(batch, column_name, &target, required)? else {
                return Ok(None);
            };
            let ts = downcast_array::<TimestampMillisecondArray>(&array, column_name, "Timestamp")?;
            Ok(Some(
                (0..ts.len())
                    .map(|i| if ts.is_null(i) { None } else { ts.value_as_datetime(i) })
                    .collect(),
            ))
        }
        Some(DataType::Date32) => {
            let Some(array) = get_column(batch, column_name, &DataType::Date32, required)? else {
                return Ok(None);
            };
            let dates = downcast_array::<Date32Array>(&array, column_name, "Date32")?;
            Ok(Some(
                (0..dates.len())
                    .map(|i| {
                        if dates.is_null(i) {
                            None
                        } else {
                            dates.value_as_date(i).map(|d| d.and_time(NaiveTime::MIN))
                        }
                    })
                    .collect(),
            ))
        }
        _ => Ok(extract_strings(batch, column_name, required)?.map(|values| {
            values
                .into_iter()
                .map(|v| v.and_then(|s| parse_datetime_string(&s, formats)))
                .collect()
        })),
    }
}

fn is_utf8(batch: &RecordBatch, column_name: &str) -> bool {
    batch
        .schema()
        .field_with_name(column_name)
        .is_ok_and(|f| f.data_type() == &DataType::Utf8)
}
