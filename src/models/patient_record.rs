//! Patient admission record model
//!
//! One `PatientRecord` per admission event. A patient may appear in many rows,
//! so `patient_id` is not a key. Every field other than the identifier can be
//! missing in the source and is held as an `Option`.

use chrono::{NaiveDate, NaiveDateTime};
use itertools::Itertools;
use log::warn;

use crate::error::Result;
use crate::models::year_month::YearMonth;
use crate::reader::SourceTable;
use crate::schema::date_utils::DateFormatConfig;
use crate::schema::{OUTCOME_DEATH, OUTCOME_RECOVERED, READMISSION_YES, patient};
use crate::utils::arrow::{extract_datetimes, extract_flags, extract_float64, extract_strings};

const SECONDS_PER_DAY: i64 = 86_400;

/// One hospital stay
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientRecord {
    pub patient_id: Option<String>,
    pub doctor_id: Option<String>,
    /// Anchor for every date-range filter
    pub admission_time: Option<NaiveDateTime>,
    pub discharge_time: Option<NaiveDateTime>,
    pub condition: Option<String>,
    pub procedure: Option<String>,
    pub outcome: Option<String>,
    pub readmission_flag: Option<String>,
    pub medication_name: Option<String>,
    pub cost: Option<f64>,
    /// `Some(false)` records a death
    pub survived_flag: Option<bool>,
    /// 0-100 scale
    pub satisfaction_score: Option<f64>,
}

impl PatientRecord {
    /// Create a record for a patient with every other field missing
    #[must_use]
    pub fn new(patient_id: impl Into<String>) -> Self {
        Self {
            patient_id: Some(patient_id.into()),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_doctor(mut self, doctor_id: impl Into<String>) -> Self {
        self.doctor_id = Some(doctor_id.into());
        self
    }

    #[must_use]
    pub const fn with_admission(mut self, admission: NaiveDateTime) -> Self {
        self.admission_time = Some(admission);
        self
    }

    #[must_use]
    pub const fn with_discharge(mut self, discharge: NaiveDateTime) -> Self {
        self.discharge_time = Some(discharge);
        self
    }

    #[must_use]
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    #[must_use]
    pub fn with_procedure(mut self, procedure: impl Into<String>) -> Self {
        self.procedure = Some(procedure.into());
        self
    }

    #[must_use]
    pub fn with_outcome(mut self, outcome: impl Into<String>) -> Self {
        self.outcome = Some(outcome.into());
        self
    }

    #[must_use]
    pub fn with_readmission(mut self, flag: impl Into<String>) -> Self {
        self.readmission_flag = Some(flag.into());
        self
    }

    #[must_use]
    pub fn with_medication(mut self, medication: impl Into<String>) -> Self {
        self.medication_name = Some(medication.into());
        self
    }

    #[must_use]
    pub const fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }

    #[must_use]
    pub const fn with_survived(mut self, survived: bool) -> Self {
        self.survived_flag = Some(survived);
        self
    }

    #[must_use]
    pub const fn with_satisfaction(mut self, score: f64) -> Self {
        self.satisfaction_score = Some(score);
        self
    }

    /// Calendar date of admission
    #[must_use]
    pub fn admission_date(&self) -> Option<NaiveDate> {
        self.admission_time.map(|dt| dt.date())
    }

    #[must_use]
    pub fn admission_month(&self) -> Option<YearMonth> {
        self.admission_time.as_ref().map(YearMonth::of)
    }

    /// Whole days between admission and discharge, floored.
    ///
    /// A discharge six hours before admission is `-1`, not `0`.
    #[must_use]
    pub fn length_of_stay_days(&self) -> Option<i64> {
        let (admission, discharge) = (self.admission_time?, self.discharge_time?);
        Some(
            (discharge - admission)
                .num_seconds()
                .div_euclid(SECONDS_PER_DAY),
        )
    }

    #[must_use]
    pub fn is_death(&self) -> bool {
        self.survived_flag == Some(false)
    }

    #[must_use]
    pub fn is_recovered(&self) -> bool {
        self.outcome.as_deref() == Some(OUTCOME_RECOVERED)
    }

    #[must_use]
    pub fn is_death_outcome(&self) -> bool {
        self.outcome.as_deref() == Some(OUTCOME_DEATH)
    }

    #[must_use]
    pub fn is_readmission(&self) -> bool {
        self.readmission_flag.as_deref() == Some(READMISSION_YES)
    }
}

/// The loaded patient source
#[derive(Debug, Clone, Default)]
pub struct PatientTable {
    pub records: Vec<PatientRecord>,
    /// `false` when the source has no satisfaction column at all
    pub has_satisfaction_column: bool,
}

impl PatientTable {
    #[must_use]
    pub const fn new(records: Vec<PatientRecord>, has_satisfaction_column: bool) -> Self {
        Self {
            records,
            has_satisfaction_column,
        }
    }

    /// Build the table from a raw source, failing if a required column is absent
    pub fn from_source(source: &SourceTable, formats: &DateFormatConfig) -> Result<Self> {
        source.require_columns(patient::REQUIRED, "patient data")?;
        let has_satisfaction_column = source.has_column(patient::SATISFACTION);

        let mut records = Vec::with_capacity(source.num_rows());
        for batch in &source.batches {
            let required_strings = |name: &str| -> Result<Vec<Option<String>>> {
                Ok(extract_strings(batch, name, true)?.unwrap_or_default())
            };
            let patient_ids = required_strings(patient::PATIENT_ID)?;
            let doctor_ids = required_strings(patient::DOCTOR_ID)?;
            let conditions = required_strings(patient::CONDITION)?;
            let procedures = required_strings(patient::PROCEDURE)?;
            let outcomes = required_strings(patient::OUTCOME)?;
            let readmissions = required_strings(patient::READMISSION)?;
            let medications = required_strings(patient::MEDICATION)?;
            let admissions =
                extract_datetimes(batch, patient::ADMISSION, true, formats)?.unwrap_or_default();
            let discharges =
                extract_datetimes(batch, patient::DISCHARGE, true, formats)?.unwrap_or_default();
            let costs = extract_float64(batch, patient::COST, true)?.unwrap_or_default();
            let survived = extract_flags(batch, patient::SURVIVE, true)?.unwrap_or_default();
            let satisfaction = extract_float64(batch, patient::SATISFACTION, false)?
                .unwrap_or_else(|| vec![None; batch.num_rows()]);

            for row in 0..batch.num_rows() {
                records.push(PatientRecord {
                    patient_id: patient_ids[row].clone(),
                    doctor_id: doctor_ids[row].clone(),
                    admission_time: admissions[row],
                    discharge_time: discharges[row],
                    condition: conditions[row].clone(),
                    procedure: procedures[row].clone(),
                    outcome: outcomes[row].clone(),
                    readmission_flag: readmissions[row].clone(),
                    medication_name: medications[row].clone(),
                    cost: costs[row],
                    survived_flag: survived[row],
                    satisfaction_score: satisfaction[row],
                });
            }
        }

        let table = Self::new(records, has_satisfaction_column);
        table.warn_on_missing_datetimes();
        Ok(table)
    }

    fn warn_on_missing_datetimes(&self) {
        let missing_admissions = self
            .records
            .iter()
            .filter(|r| r.admission_time.is_none())
            .count();
        let missing_discharges = self
            .records
            .iter()
            .filter(|r| r.discharge_time.is_none())
            .count();
        if missing_admissions > 0 {
            warn!("{missing_admissions} rows have a missing or unparsable {}", patient::ADMISSION);
        }
        if missing_discharges > 0 {
            warn!("{missing_discharges} rows have a missing or unparsable {}", patient::DISCHARGE);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest admission dates, ignoring missing values
    #[must_use]
    pub fn admission_date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.records
            .iter()
            .filter_map(PatientRecord::admission_date)
            .minmax()
            .into_option()
    }

    /// Sorted distinct condition labels for the condition selector
    #[must_use]
    pub fn condition_options(&self) -> Vec<String> {
        self.records
            .iter()
            .filter_map(|r| r.condition.clone())
            .sorted()
            .dedup()
            .collect()
    }

    /// All records of one patient, in source order
    pub fn records_for<'a>(
        &'a self,
        patient_id: &'a str,
    ) -> impl Iterator<Item = &'a PatientRecord> + 'a {
        self.records
            .iter()
            .filter(move |r| r.patient_id.as_deref() == Some(patient_id))
    }
}
