//! Utilities for working with Arrow arrays.
//!
//! Column lookup by name with automatic casting to the type the caller expects.

use arrow::array::{Array, ArrayRef, new_null_array};
use arrow::compute::kernels::cast::{CastOptions, cast_with_options};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use log::{debug, warn};

use crate::error::{DashboardError, Result};

/// Get a column from a record batch with automatic type adaptation
///
/// # Arguments
///
/// * `batch` - The record batch containing the column
/// * `column_name` - The name of the column to extract
/// * `expected_type` - The expected data type for the column
/// * `required` - Whether the column is required (error if missing) or optional (None if missing)
///
/// # Returns
///
/// * `Ok(Some(ArrayRef))` - The column array (converted if necessary) if found
/// * `Ok(None)` - If the column is not found and `required` is false
/// * `Err` - If the column is not found and `required` is true
///
/// Values that cannot be converted become null. A column whose type cannot be
/// cast at all is replaced by an all-null array.
pub fn get_column(
    batch: &RecordBatch,
    column_name: &str,
    expected_type: &DataType,
    required: bool,
) -> Result<Option<ArrayRef>> {
    let Ok(idx) = batch.schema().index_of(column_name) else {
        if required {
            return Err(DashboardError::column_not_found(column_name, "record batch"));
        }
        debug!("Optional column '{column_name}' not found in record batch");
        return Ok(None);
    };

    let column = batch.column(idx);
    let actual_type = column.data_type();

    if actual_type == expected_type {
        return Ok(Some(column.clone()));
    }

    debug!("Converting column '{column_name}' from {actual_type:?} to {expected_type:?}");

    let options = CastOptions {
        safe: true,
        ..Default::default()
    };
    let converted = match cast_with_options(column, expected_type, &options) {
        Ok(converted) => converted,
        Err(err) => {
            warn!("Failed to convert column '{column_name}' to {expected_type:?}: {err}");
            new_null_array(expected_type, batch.num_rows())
        }
    };

    Ok(Some(converted))
}

/// Downcast a column to a specific array type with clear error messages
///
/// # Type Parameters
///
/// * `A` - The target array type to downcast to
pub fn downcast_array<'a, A: Array + 'static>(
    array: &'a ArrayRef,
    column_name: &str,
    expected_type_name: &str,
) -> Result<&'a A> {
    array.as_any().downcast_ref::<A>().ok_or_else(|| {
        DashboardError::Arrow(arrow::error::ArrowError::CastError(format!(
            "Column '{column_name}' is not a {expected_type_name} array"
        )))
    })
}
