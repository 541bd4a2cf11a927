//! Scalar KPIs over a filtered subset

use rustc_hash::{FxHashMap, FxHashSet};

use crate::algorithm::grouping::{monthly_visits, patients_per_doctor};
use crate::models::PatientRecord;

/// Number of distinct patients. Rows without an identifier are not counted.
#[must_use]
pub fn total_patients(records: &[&PatientRecord]) -> usize {
    records
        .iter()
        .filter_map(|r| r.patient_id.as_deref())
        .collect::<FxHashSet<_>>()
        .len()
}

/// Sum of all known costs
#[must_use]
pub fn total_cost(records: &[&PatientRecord]) -> f64 {
    records.iter().filter_map(|r| r.cost).sum()
}

/// Mean over patients of each patient's summed cost.
///
/// A patient with several admissions contributes one value. `None` when no
/// record carries a patient identifier.
#[must_use]
pub fn avg_cost_per_patient(records: &[&PatientRecord]) -> Option<f64> {
    let mut per_patient: FxHashMap<&str, f64> = FxHashMap::default();
    for record in records {
        if let Some(id) = record.patient_id.as_deref() {
            *per_patient.entry(id).or_insert(0.0) += record.cost.unwrap_or(0.0);
        }
    }
    mean(per_patient.values().copied())
}

/// Rows whose survival flag records a death
#[must_use]
pub fn deaths(records: &[&PatientRecord]) -> usize {
    records.iter().filter(|r| r.is_death()).count()
}

/// Rows with outcome `Recovered`
#[must_use]
pub fn recovered(records: &[&PatientRecord]) -> usize {
    records.iter().filter(|r| r.is_recovered()).count()
}

/// Rows with readmission flag `Yes`
#[must_use]
pub fn readmissions(records: &[&PatientRecord]) -> usize {
    records.iter().filter(|r| r.is_readmission()).count()
}

/// Rows with outcome `Death`
#[must_use]
pub fn deaths_by_outcome(records: &[&PatientRecord]) -> usize {
    records.iter().filter(|r| r.is_death_outcome()).count()
}

/// Mean admissions per calendar month, over the months that have any
#[must_use]
pub fn monthly_visit_rate(records: &[&PatientRecord]) -> f64 {
    mean(monthly_visits(records).into_iter().map(|(_, n)| n as f64)).unwrap_or(0.0)
}

/// Mean number of distinct patients per doctor
#[must_use]
pub fn avg_patients_per_doctor(records: &[&PatientRecord]) -> f64 {
    mean(patients_per_doctor(records).into_iter().map(|(_, n)| n as f64)).unwrap_or(0.0)
}

/// Mean satisfaction rescaled from 0-100 to 0-5. Zero when no score is known.
#[must_use]
pub fn avg_satisfaction(records: &[&PatientRecord]) -> f64 {
    mean(records.iter().filter_map(|r| r.satisfaction_score))
        .map_or(0.0, |score| score / 100.0 * 5.0)
}

pub(crate) fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Headline figures of the revenue view
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialKpis {
    pub total_patients: usize,
    pub total_cost: f64,
    pub avg_cost_per_patient: Option<f64>,
    pub recovered: usize,
    pub deaths: usize,
    pub readmissions: usize,
}

impl FinancialKpis {
    #[must_use]
    pub fn compute(records: &[&PatientRecord]) -> Self {
        Self {
            total_patients: total_patients(records),
            total_cost: total_cost(records),
            avg_cost_per_patient: avg_cost_per_patient(records),
            recovered: recovered(records),
            deaths: deaths(records),
            readmissions: readmissions(records),
        }
    }
}

/// Headline figures of the doctor view
#[derive(Debug, Clone, PartialEq)]
pub struct DoctorKpis {
    pub monthly_visit_rate: f64,
    pub avg_patients_per_doctor: f64,
    /// 0-5 scale
    pub avg_satisfaction: f64,
    pub deaths: usize,
}

impl DoctorKpis {
    #[must_use]
    pub fn compute(records: &[&PatientRecord]) -> Self {
        Self {
            monthly_visit_rate: monthly_visit_rate(records),
            avg_patients_per_doctor: avg_patients_per_doctor(records),
            avg_satisfaction: avg_satisfaction(records),
            deaths: deaths_by_outcome(records),
        }
    }
}
