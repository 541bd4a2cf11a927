//! Configuration for the report generator.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::util::safe_read_to_string;
use crate::error::{DashboardError, Result};
use crate::schema::date_utils::DateFormatConfig;

/// Default patient admission source
pub const DEFAULT_PATIENT_DATA: &str = "final_patient_data_with_medication_8.csv";

/// Default 30-minute monitoring source
pub const DEFAULT_MONITORING_DATA: &str = "patient_24hr_monitoring_data_30min.csv";

/// Default batch size for CSV reading
pub const DEFAULT_BATCH_SIZE: usize = 8192;

/// Configuration for loading and reporting
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Path to the patient admission/cost records
    pub patient_data: PathBuf,
    /// Path to the vital-sign monitoring samples
    pub monitoring_data: PathBuf,
    /// Rows per Arrow batch when reading CSV sources
    pub batch_size: usize,
    /// How many procedures the revenue chart shows
    pub top_procedures: usize,
    /// How many doctors the patients-treated chart shows
    pub top_doctors: usize,
    /// Symbol prepended to monetary values
    pub currency_symbol: String,
    /// Datetime parsing formats
    pub date_formats: DateFormatConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            patient_data: PathBuf::from(DEFAULT_PATIENT_DATA),
            monitoring_data: PathBuf::from(DEFAULT_MONITORING_DATA),
            batch_size: DEFAULT_BATCH_SIZE,
            top_procedures: 7,
            top_doctors: 5,
            currency_symbol: "£".to_string(),
            date_formats: DateFormatConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Load a configuration from a YAML file. Keys that are absent keep their defaults.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = safe_read_to_string(path, "dashboard configuration")?;
        Self::from_yaml_str(&content)
    }

    /// Parse a configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `HOSP_REPORT_*` environment variable overrides
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(path) = std::env::var("HOSP_REPORT_PATIENTS") {
            self.patient_data = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("HOSP_REPORT_MONITORING") {
            self.monitoring_data = PathBuf::from(path);
        }
        if let Some(size) = get_batch_size() {
            self.batch_size = size;
        }
        self
    }

    /// Reject values that would make every report degenerate
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(DashboardError::config_error("batch_size must be positive"));
        }
        if self.top_procedures == 0 || self.top_doctors == 0 {
            return Err(DashboardError::config_error(
                "top_procedures and top_doctors must be positive",
            ));
        }
        if self.date_formats.datetime_formats.is_empty() && self.date_formats.date_formats.is_empty()
        {
            return Err(DashboardError::config_error(
                "at least one datetime or date format is required",
            ));
        }
        Ok(())
    }
}

/// Helper function to get batch size from environment
#[must_use]
pub fn get_batch_size() -> Option<usize> {
    std::env::var("HOSP_REPORT_BATCH_SIZE")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|&s| s > 0)
}
