//! Per-patient selections for the live monitoring view
//!
//! These ignore every date filter and work on the full tables.

use chrono::NaiveDateTime;

use crate::models::{MonitoringSample, MonitoringTable, PatientRecord, PatientTable};

/// One patient's samples ordered by timestamp; samples without one go last
#[must_use]
pub fn patient_vitals<'a>(table: &'a MonitoringTable, patient_id: &str) -> Vec<&'a MonitoringSample> {
    let mut samples: Vec<&MonitoringSample> = table
        .samples
        .iter()
        .filter(|s| s.patient_id.as_deref() == Some(patient_id))
        .collect();
    samples.sort_by_key(|s| (s.timestamp.is_none(), s.timestamp));
    samples
}

/// Condition recorded on the patient's most recent admission.
///
/// Admissions without a time rank after every dated one. `None` when the
/// patient has no admission rows or the chosen row has no condition.
#[must_use]
pub fn latest_condition(table: &PatientTable, patient_id: &str) -> Option<String> {
    let records: Vec<&PatientRecord> = table.records_for(patient_id).collect();
    let latest = records
        .iter()
        .filter(|r| r.admission_time.is_some())
        .max_by_key(|r| r.admission_time)
        .or_else(|| records.first())?;
    latest.condition.clone()
}

/// Medications given to the patient, oldest admission first.
///
/// Rows missing either the admission time or the medication are skipped.
#[must_use]
pub fn medication_history(table: &PatientTable, patient_id: &str) -> Vec<(NaiveDateTime, String)> {
    let mut history: Vec<(NaiveDateTime, String)> = table
        .records_for(patient_id)
        .filter_map(|r| Some((r.admission_time?, r.medication_name.clone()?)))
        .collect();
    history.sort_by_key(|(admitted, _)| *admitted);
    history
}
