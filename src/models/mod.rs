//! Domain models for the hospital dashboard
//!
//! Admission records and monitoring samples as they are held in memory after
//! loading. Both are read-only once built.

pub mod monitoring_sample;
pub mod patient_record;
pub mod year_month;

// Re-export commonly used types
pub use monitoring_sample::{MonitoringSample, MonitoringTable};
pub use patient_record::{PatientRecord, PatientTable};
pub use year_month::YearMonth;
