use std::fs;
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use hosp_report::{Dataset, MonitoringSample, MonitoringTable, PatientRecord, PatientTable};
use tempfile::TempDir;

/// Header of the patient source, satisfaction column included
pub const PATIENT_HEADER: &str = "Patient_ID,Doctor_ID,Admission_DateTime,Discharge_DateTime,Condition,Procedure,Outcome,Readmission,Medication_Name,Cost,Survive,Customer_Satisfaction_Score";

/// Header of the monitoring source
pub const MONITORING_HEADER: &str = "Patient_ID,Timestamp,Heart Rate,Body Temperature,Oxygen Saturation,Systolic Blood Pressure,Diastolic Blood Pressure";

/// A small admission export: three patients, two doctors, one bad datetime
#[must_use]
pub fn patient_csv() -> String {
    [
        PATIENT_HEADER,
        "A,D1,05/01/2024 09:30,08/01/2024 10:00,Flu,X-Ray,Recovered,No,Aspirin,100,1,80",
        "A,D1,20/02/2024 14:00,22/02/2024 08:00,Flu,MRI,Recovered,Yes,Statin,200,1,60",
        "B,D2,15/01/2024 11:15,16/01/2024 11:15,Asthma,X-Ray,Death,No,Aspirin,50,0,",
        "C,D2,not a date,03/03/2024 12:00,Asthma,CT,Recovered,No,,25,1,40",
    ]
    .join("\n")
}

/// Two patients' vitals, written out of timestamp order
#[must_use]
pub fn monitoring_csv() -> String {
    [
        MONITORING_HEADER,
        "A,01/03/2024 00:30,72,36.8,98,120,80",
        "A,01/03/2024 00:00,70,36.7,97,118,79",
        "B,01/03/2024 00:00,88,37.9,93,135,90",
        "A,01/03/2024 01:00,,36.9,98,121,81",
    ]
    .join("\n")
}

/// Write a file into `dir` and return its path
pub fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Write both fixture sources into a fresh temporary directory
#[must_use]
pub fn fixture_sources() -> (TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let patients = write_file(&dir, "patients.csv", &patient_csv());
    let monitoring = write_file(&dir, "monitoring.csv", &monitoring_csv());
    (dir, patients, monitoring)
}

#[must_use]
pub fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

#[must_use]
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// The A/100, A/200, B/50 subset
#[must_use]
pub fn three_admissions() -> Vec<PatientRecord> {
    vec![
        PatientRecord::new("A")
            .with_doctor("D1")
            .with_admission(at(2024, 1, 5, 9))
            .with_condition("Flu")
            .with_cost(100.0),
        PatientRecord::new("A")
            .with_doctor("D1")
            .with_admission(at(2024, 2, 20, 14))
            .with_condition("Flu")
            .with_cost(200.0),
        PatientRecord::new("B")
            .with_doctor("D2")
            .with_admission(at(2024, 1, 15, 11))
            .with_condition("Asthma")
            .with_cost(50.0),
    ]
}

/// An in-memory dataset with one monitored patient and no medication rows.
///
/// The satisfaction column exists but every score is blank.
#[must_use]
pub fn dataset_without_medication() -> Dataset {
    let patients = PatientTable::new(three_admissions(), true);
    let monitoring = MonitoringTable::new(vec![
        MonitoringSample::new("B", at(2024, 3, 1, 1)),
        MonitoringSample::new("B", at(2024, 3, 1, 0)),
    ]);
    Dataset::new(patients, monitoring)
}
