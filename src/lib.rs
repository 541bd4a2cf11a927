//! Filter and aggregate hospital admission and monitoring exports into
//! dashboard reports.
//!
//! Data flows one way: [`loader`] reads both sources once, [`filter`] narrows
//! the admissions by date range and condition, [`algorithm`] aggregates the
//! subset, and [`report`] turns the aggregates into cards, charts and tables.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod models;
pub mod reader;
pub mod report;
pub mod schema;
pub mod utils;

// Core types
pub use config::DashboardConfig;
pub use error::{DashboardError, Result};
pub use loader::{DataLoader, Dataset};
pub use models::{MonitoringSample, MonitoringTable, PatientRecord, PatientTable, YearMonth};

// Filtering
pub use filter::{DateRange, FilterSelection, FilteredSubset, filter_records};

// Aggregation
pub use algorithm::{DoctorKpis, FinancialKpis};

// Presentation
pub use report::{View, ViewReport, render};

// Arrow types
pub use arrow::record_batch::RecordBatch;
