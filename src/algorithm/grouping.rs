//! Grouped summaries over a filtered subset
//!
//! Groups are built in key order (`BTreeMap`) and top-N results are then
//! stably sorted by value, so ties keep ascending key order. Rows whose
//! grouping key is missing are left out of the grouping.

use std::collections::{BTreeMap, BTreeSet};

use crate::algorithm::kpi::mean;
use crate::models::{PatientRecord, YearMonth};

/// Summed cost per admission month, chronological
#[must_use]
pub fn monthly_cost_trend(records: &[&PatientRecord]) -> Vec<(YearMonth, f64)> {
    let mut by_month: BTreeMap<YearMonth, f64> = BTreeMap::new();
    for record in records {
        if let Some(month) = record.admission_month() {
            *by_month.entry(month).or_insert(0.0) += record.cost.unwrap_or(0.0);
        }
    }
    by_month.into_iter().collect()
}

/// Admission count per month, chronological
#[must_use]
pub fn monthly_visits(records: &[&PatientRecord]) -> Vec<(YearMonth, usize)> {
    let mut by_month: BTreeMap<YearMonth, usize> = BTreeMap::new();
    for month in records.iter().filter_map(|r| r.admission_month()) {
        *by_month.entry(month).or_insert(0) += 1;
    }
    by_month.into_iter().collect()
}

/// The `n` procedures with the highest summed cost, descending
#[must_use]
pub fn top_procedures(records: &[&PatientRecord], n: usize) -> Vec<(String, f64)> {
    let mut by_procedure: BTreeMap<&str, f64> = BTreeMap::new();
    for record in records {
        if let Some(procedure) = record.procedure.as_deref() {
            *by_procedure.entry(procedure).or_insert(0.0) += record.cost.unwrap_or(0.0);
        }
    }

    let mut ranked: Vec<(String, f64)> = by_procedure
        .into_iter()
        .map(|(p, cost)| (p.to_string(), cost))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(n);
    ranked
}

/// Distinct patients per doctor, in doctor order
#[must_use]
pub fn patients_per_doctor(records: &[&PatientRecord]) -> Vec<(String, usize)> {
    let mut by_doctor: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for record in records {
        if let Some(doctor) = record.doctor_id.as_deref() {
            let patients = by_doctor.entry(doctor).or_default();
            if let Some(patient) = record.patient_id.as_deref() {
                patients.insert(patient);
            }
        }
    }
    by_doctor
        .into_iter()
        .map(|(doctor, patients)| (doctor.to_string(), patients.len()))
        .collect()
}

/// The `n` doctors who treated the most distinct patients, descending
#[must_use]
pub fn top_doctors(records: &[&PatientRecord], n: usize) -> Vec<(String, usize)> {
    let mut ranked = patients_per_doctor(records);
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);
    ranked
}

/// Mean length of stay in whole days per medication.
///
/// A medication whose stays all lack an admission or discharge time maps to `None`.
#[must_use]
pub fn length_of_stay_by_medication(records: &[&PatientRecord]) -> Vec<(String, Option<f64>)> {
    let mut by_medication: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for record in records {
        if let Some(medication) = record.medication_name.as_deref() {
            let stays = by_medication.entry(medication).or_default();
            if let Some(days) = record.length_of_stay_days() {
                stays.push(days as f64);
            }
        }
    }
    by_medication
        .into_iter()
        .map(|(medication, stays)| (medication.to_string(), mean(stays.into_iter())))
        .collect()
}
