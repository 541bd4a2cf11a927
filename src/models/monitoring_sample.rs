//! Vital-sign monitoring sample model

use chrono::NaiveDateTime;
use log::warn;
use rustc_hash::FxHashSet;

use crate::error::Result;
use crate::reader::SourceTable;
use crate::schema::date_utils::DateFormatConfig;
use crate::schema::monitoring;
use crate::utils::arrow::{extract_datetimes, extract_float64, extract_strings};

/// One timestamped reading, nominally every 30 minutes per patient
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonitoringSample {
    pub patient_id: Option<String>,
    pub timestamp: Option<NaiveDateTime>,
    pub heart_rate: Option<f64>,
    pub body_temperature: Option<f64>,
    pub oxygen_saturation: Option<f64>,
    pub systolic_bp: Option<f64>,
    pub diastolic_bp: Option<f64>,
}

impl MonitoringSample {
    #[must_use]
    pub fn new(patient_id: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self {
            patient_id: Some(patient_id.into()),
            timestamp: Some(timestamp),
            ..Default::default()
        }
    }
}

/// The loaded monitoring source
#[derive(Debug, Clone, Default)]
pub struct MonitoringTable {
    pub samples: Vec<MonitoringSample>,
}

impl MonitoringTable {
    #[must_use]
    pub const fn new(samples: Vec<MonitoringSample>) -> Self {
        Self { samples }
    }

    /// Build the table from a raw source, failing if a required column is absent
    pub fn from_source(source: &SourceTable, formats: &DateFormatConfig) -> Result<Self> {
        source.require_columns(monitoring::REQUIRED, "monitoring data")?;

        let mut samples = Vec::with_capacity(source.num_rows());
        for batch in &source.batches {
            let vitals = |name: &str| -> Result<Vec<Option<f64>>> {
                Ok(extract_float64(batch, name, true)?.unwrap_or_default())
            };
            let patient_ids =
                extract_strings(batch, monitoring::PATIENT_ID, true)?.unwrap_or_default();
            let timestamps =
                extract_datetimes(batch, monitoring::TIMESTAMP, true, formats)?.unwrap_or_default();
            let heart_rate = vitals(monitoring::HEART_RATE)?;
            let temperature = vitals(monitoring::BODY_TEMPERATURE)?;
            let oxygen = vitals(monitoring::OXYGEN_SATURATION)?;
            let systolic = vitals(monitoring::SYSTOLIC_BP)?;
            let diastolic = vitals(monitoring::DIASTOLIC_BP)?;

            for row in 0..batch.num_rows() {
                samples.push(MonitoringSample {
                    patient_id: patient_ids[row].clone(),
                    timestamp: timestamps[row],
                    heart_rate: heart_rate[row],
                    body_temperature: temperature[row],
                    oxygen_saturation: oxygen[row],
                    systolic_bp: systolic[row],
                    diastolic_bp: diastolic[row],
                });
            }
        }

        let missing = samples.iter().filter(|s| s.timestamp.is_none()).count();
        if missing > 0 {
            warn!("{missing} rows have a missing or unparsable {}", monitoring::TIMESTAMP);
        }

        Ok(Self::new(samples))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Distinct patient identifiers in order of first appearance
    #[must_use]
    pub fn patient_ids(&self) -> Vec<String> {
        let mut seen = FxHashSet::default();
        self.samples
            .iter()
            .filter_map(|s| s.patient_id.as_deref())
            .filter(|id| seen.insert(*id))
            .map(String::from)
            .collect()
    }
}
