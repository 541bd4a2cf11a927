//! Reading tabular sources into Arrow record batches.
//!
//! CSV files are read with every column as UTF-8 so that reading itself never
//! fails on a malformed cell; typing happens later, column by column, in
//! [`crate::utils::arrow::extractors`]. Parquet files keep their stored types.

use std::fs::File;
use std::io::{Seek, SeekFrom};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::util::safe_open_file;
use crate::error::{DashboardError, Result};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Supported on-disk formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Parquet,
}

impl SourceFormat {
    /// Detect the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv" | "txt") => Ok(Self::Csv),
            Some("parquet" | "pq") => Ok(Self::Parquet),
            _ => Err(DashboardError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// The raw contents of one source: its schema and all of its batches.
///
/// The schema is kept separately because a header-only CSV yields no batches.
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub schema: SchemaRef,
    pub batches: Vec<RecordBatch>,
}

impl SourceTable {
    /// Total number of rows across all batches
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(RecordBatch::num_rows).sum()
    }

    /// Whether the source declares a column
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.schema.index_of(name).is_ok()
    }

    /// Fail with `ColumnNotFound` for the first required column that is missing
    pub fn require_columns(&self, columns: &[&str], source_name: &str) -> Result<()> {
        match columns.iter().find(|c| !self.has_column(c)) {
            Some(missing) => Err(DashboardError::column_not_found(missing, source_name)),
            None => Ok(()),
        }
    }
}

/// Read a tabular file, dispatching on its extension
pub fn read_table(path: &Path, batch_size: usize) -> Result<SourceTable> {
    let start = Instant::now();
    log_operation_start("Reading", path);

    let table = match SourceFormat::from_path(path)? {
        SourceFormat::Csv => read_csv(path, batch_size)?,
        SourceFormat::Parquet => read_parquet(path, batch_size)?,
    };

    log_operation_complete("read", path, table.num_rows(), Some(start.elapsed()));
    Ok(table)
}

/// Read a CSV file with a header row, every column as nullable UTF-8
pub fn read_csv(path: &Path, batch_size: usize) -> Result<SourceTable> {
    let mut file = safe_open_file(path, "CSV source")?;

    let format = Format::default().with_header(true);
    let (header, _) = format.infer_schema(&mut file, Some(0))?;
    file.seek(SeekFrom::Start(0))
        .map_err(|e| DashboardError::io_error_with_source("Failed to rewind CSV", e).with_path(path))?;

    let schema: SchemaRef = Arc::new(Schema::new(
        header
            .fields()
            .iter()
            .map(|f| Field::new(f.name().trim(), DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));

    let reader = ReaderBuilder::new(Arc::clone(&schema))
        .with_header(true)
        .with_batch_size(batch_size)
        .build(file)?;

    let batches = reader.collect::<std::result::Result<Vec<_>, ArrowError>>()?;
    Ok(SourceTable { schema, batches })
}

/// Read a Parquet file with its stored schema
pub fn read_parquet(path: &Path, batch_size: usize) -> Result<SourceTable> {
    let file: File = safe_open_file(path, "Parquet source")?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?.with_batch_size(batch_size);
    let schema = Arc::clone(builder.schema());
    let reader = builder.build()?;

    let batches = reader.collect::<std::result::Result<Vec<_>, ArrowError>>()?;
    Ok(SourceTable { schema, batches })
}
