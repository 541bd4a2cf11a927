use std::sync::Arc;

use hosp_report::error::DashboardError;
use hosp_report::{DashboardConfig, DataLoader};
use pretty_assertions::assert_eq;

use crate::utils::{at, fixture_sources, patient_csv, write_file};

fn loader_for(patients: &std::path::Path, monitoring: &std::path::Path) -> DataLoader {
    let config = DashboardConfig {
        patient_data: patients.to_path_buf(),
        monitoring_data: monitoring.to_path_buf(),
        batch_size: 2,
        ..Default::default()
    };
    DataLoader::new(config)
}

#[test]
fn test_load_dataset_parses_day_first_datetimes() {
    let (_dir, patients, monitoring) = fixture_sources();
    let mut loader = loader_for(&patients, &monitoring);
    let dataset = loader.load_dataset().unwrap();

    assert_eq!(dataset.patients.len(), 4);
    assert!(dataset.patients.has_satisfaction_column);

    let first = &dataset.patients.records[0];
    assert_eq!(first.patient_id.as_deref(), Some("A"));
    assert_eq!(
        first.admission_time,
        Some(at(2024, 1, 5, 9) + chrono::Duration::minutes(30))
    );
    assert_eq!(first.cost, Some(100.0));
    assert_eq!(first.survived_flag, Some(true));
    assert_eq!(first.satisfaction_score, Some(80.0));

    // Unparsable datetime and blank cells become missing values
    let last = &dataset.patients.records[3];
    assert_eq!(last.admission_time, None);
    assert_eq!(last.medication_name, None);
    assert_eq!(dataset.patients.records[2].satisfaction_score, None);
    assert_eq!(dataset.patients.records[2].survived_flag, Some(false));

    assert_eq!(dataset.monitoring.len(), 4);
    assert_eq!(dataset.monitoring.patient_ids(), vec!["A", "B"]);
    assert_eq!(dataset.monitoring.samples[3].heart_rate, None);
}

#[test]
fn test_repeated_loads_hit_the_cache() {
    let (dir, patients, monitoring) = fixture_sources();
    let mut loader = loader_for(&patients, &monitoring);

    let first = loader.load_patients(&patients).unwrap();
    // Changing the file on disk is not seen until the cache is invalidated
    write_file(&dir, "patients.csv", "garbage");
    let second = loader.load_patients(&patients).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(loader.cached_sources(), 1);

    loader.invalidate();
    assert_eq!(loader.cached_sources(), 0);
    assert!(loader.load_patients(&patients).is_err());
}

#[test]
fn test_missing_required_column_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let without_cost = patient_csv().replace(",Cost,", ",Price,");
    let patients = write_file(&dir, "patients.csv", &without_cost);
    let mut loader = loader_for(&patients, &patients);

    let err = loader.load_patients(&patients).unwrap_err();
    assert!(
        matches!(&err, DashboardError::ColumnNotFound { column, .. } if column == "Cost"),
        "unexpected error: {err}"
    );
    assert_eq!(loader.cached_sources(), 0);
}

#[test]
fn test_missing_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.csv");
    let mut loader = loader_for(&path, &path);
    let err = loader.load_patients(&path).unwrap_err();
    assert!(matches!(err, DashboardError::Io { .. }));
}

#[test]
fn test_unsupported_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "patients.xlsx", "");
    let mut loader = loader_for(&path, &path);
    let err = loader.load_patients(&path).unwrap_err();
    assert!(matches!(err, DashboardError::UnsupportedFormat(_)));
}

#[test]
fn test_satisfaction_column_is_optional() {
    let dir = tempfile::tempdir().unwrap();
    let content = [
        "Patient_ID,Doctor_ID,Admission_DateTime,Discharge_DateTime,Condition,Procedure,Outcome,Readmission,Medication_Name,Cost,Survive",
        "A,D1,05/01/2024 09:30,08/01/2024 10:00,Flu,X-Ray,Recovered,No,Aspirin,100,1",
    ]
    .join("\n");
    let patients = write_file(&dir, "patients.csv", &content);
    let mut loader = loader_for(&patients, &patients);
    let table = loader.load_patients(&patients).unwrap();
    assert!(!table.has_satisfaction_column);
    assert_eq!(table.records[0].satisfaction_score, None);
}
