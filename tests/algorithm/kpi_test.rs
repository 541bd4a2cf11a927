use hosp_report::PatientRecord;
use hosp_report::algorithm::kpi::{
    avg_cost_per_patient, avg_satisfaction, deaths, monthly_visit_rate, readmissions, recovered,
    total_cost, total_patients,
};
use hosp_report::algorithm::{DoctorKpis, FinancialKpis, monthly_cost_trend, top_procedures};
use pretty_assertions::assert_eq;

use crate::utils::{at, three_admissions};

#[test]
fn test_three_admission_scenario() {
    let rows = three_admissions();
    let refs: Vec<&PatientRecord> = rows.iter().collect();

    assert_eq!(total_patients(&refs), 2);
    assert_eq!(total_cost(&refs), 350.0);
    assert_eq!(avg_cost_per_patient(&refs), Some(175.0));

    // A flat mean over rows would be 350 / 3
    let flat = total_cost(&refs) / refs.len() as f64;
    assert!((flat - 175.0).abs() > 1.0);
    assert!(total_patients(&refs) <= refs.len());
}

#[test]
fn test_outcome_counters() {
    let rows = [
        PatientRecord::new("A").with_outcome("Recovered").with_survived(true),
        PatientRecord::new("B").with_outcome("Death").with_survived(false),
        PatientRecord::new("C").with_outcome("Recovered").with_readmission("Yes"),
        PatientRecord::new("D").with_readmission("No"),
    ];
    let refs: Vec<&PatientRecord> = rows.iter().collect();
    assert_eq!(recovered(&refs), 2);
    assert_eq!(deaths(&refs), 1);
    assert_eq!(readmissions(&refs), 1);
}

#[test]
fn test_empty_subset_degrades_to_neutral_values() {
    let kpis = FinancialKpis::compute(&[]);
    assert_eq!(kpis.total_patients, 0);
    assert_eq!(kpis.total_cost, 0.0);
    assert_eq!(kpis.avg_cost_per_patient, None);

    let doctor = DoctorKpis::compute(&[]);
    assert_eq!(doctor.monthly_visit_rate, 0.0);
    assert_eq!(doctor.avg_patients_per_doctor, 0.0);
    assert_eq!(doctor.avg_satisfaction, 0.0);

    assert!(monthly_cost_trend(&[]).is_empty());
    assert!(top_procedures(&[], 7).is_empty());
}

#[test]
fn test_doctor_kpis() {
    let rows = [
        PatientRecord::new("A")
            .with_doctor("D1")
            .with_admission(at(2024, 1, 2, 8))
            .with_satisfaction(80.0),
        PatientRecord::new("B")
            .with_doctor("D1")
            .with_admission(at(2024, 1, 9, 8))
            .with_satisfaction(40.0),
        PatientRecord::new("C")
            .with_doctor("D2")
            .with_admission(at(2024, 3, 1, 8))
            .with_outcome("Death"),
    ];
    let refs: Vec<&PatientRecord> = rows.iter().collect();
    let kpis = DoctorKpis::compute(&refs);

    // Two admissions in January and one in March
    assert_eq!(monthly_visit_rate(&refs), 1.5);
    assert_eq!(kpis.avg_patients_per_doctor, 1.5);
    assert_eq!(avg_satisfaction(&refs), 3.0);
    assert_eq!(kpis.deaths, 1);
}

#[test]
fn test_top_procedures_is_bounded_and_descending() {
    let rows: Vec<PatientRecord> = (0..12)
        .map(|i| {
            PatientRecord::new(format!("P{i}"))
                .with_procedure(format!("Proc{:02}", i % 9))
                .with_cost(f64::from(i * 10))
        })
        .collect();
    let refs: Vec<&PatientRecord> = rows.iter().collect();
    let top = top_procedures(&refs, 7);
    assert_eq!(top.len(), 7);
    assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));
    assert_eq!(top, top_procedures(&refs, 7));
}
