//! Column layout of the two tabular sources.
//!
//! Column names match the header rows of the hospital exports exactly,
//! including the spaces in the monitoring vital-sign columns.

pub mod date_utils;

pub use date_utils::{DateFormatConfig, parse_date_string, parse_datetime_string};

/// Columns of the patient admission/cost source
pub mod patient {
    pub const PATIENT_ID: &str = "Patient_ID";
    pub const DOCTOR_ID: &str = "Doctor_ID";
    pub const ADMISSION: &str = "Admission_DateTime";
    pub const DISCHARGE: &str = "Discharge_DateTime";
    pub const CONDITION: &str = "Condition";
    pub const PROCEDURE: &str = "Procedure";
    pub const OUTCOME: &str = "Outcome";
    pub const READMISSION: &str = "Readmission";
    pub const MEDICATION: &str = "Medication_Name";
    pub const COST: &str = "Cost";
    pub const SURVIVE: &str = "Survive";
    /// Optional: reports fall back to a neutral score when absent
    pub const SATISFACTION: &str = "Customer_Satisfaction_Score";

    /// Columns that must be present for the source to load
    pub const REQUIRED: &[&str] = &[
        PATIENT_ID,
        DOCTOR_ID,
        ADMISSION,
        DISCHARGE,
        CONDITION,
        PROCEDURE,
        OUTCOME,
        READMISSION,
        MEDICATION,
        COST,
        SURVIVE,
    ];
}

/// Columns of the 30-minute monitoring source
pub mod monitoring {
    pub const PATIENT_ID: &str = "Patient_ID";
    pub const TIMESTAMP: &str = "Timestamp";
    pub const HEART_RATE: &str = "Heart Rate";
    pub const BODY_TEMPERATURE: &str = "Body Temperature";
    pub const OXYGEN_SATURATION: &str = "Oxygen Saturation";
    pub const SYSTOLIC_BP: &str = "Systolic Blood Pressure";
    pub const DIASTOLIC_BP: &str = "Diastolic Blood Pressure";

    pub const REQUIRED: &[&str] = &[
        PATIENT_ID,
        TIMESTAMP,
        HEART_RATE,
        BODY_TEMPERATURE,
        OXYGEN_SATURATION,
        SYSTOLIC_BP,
        DIASTOLIC_BP,
    ];
}

/// Outcome label counted as a recovery
pub const OUTCOME_RECOVERED: &str = "Recovered";

/// Outcome label counted as a death in the doctor view
pub const OUTCOME_DEATH: &str = "Death";

/// Readmission label counted as a readmission
pub const READMISSION_YES: &str = "Yes";
