//! Rendering each dashboard view into display specifications
//!
//! [`render`] is the single entry point an event dispatcher calls on every
//! input change: it filters once, then maps aggregates to cards, charts and
//! tables. No state survives between calls.

use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use serde::Serialize;

use crate::algorithm::grouping::{
    length_of_stay_by_medication, monthly_cost_trend, top_doctors, top_procedures,
};
use crate::algorithm::kpi::{DoctorKpis, FinancialKpis};
use crate::algorithm::monitoring::{latest_condition, medication_history, patient_vitals};
use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};
use crate::filter::{FilterSelection, FilteredSubset};
use crate::loader::Dataset;
use crate::models::{MonitoringSample, PatientRecord};
use crate::report::chart::{Axis, Cell, ChartKind, ChartSpec, DataTable, KpiCard, Series, ValueFormat};
use crate::report::format::{
    format_count, format_currency, format_decimal, format_optional_currency, format_score,
};
use crate::schema::{monitoring, patient};

/// Shown instead of an empty medication table
pub const NO_MEDICATION_MESSAGE: &str = "No medication history available.";

/// Shown on the condition card when the patient has no admission record
pub const NO_CONDITION_DATA: &str = "No data";

/// Shown on the doctor view when the source has no satisfaction column
pub const NO_SATISFACTION_MESSAGE: &str =
    "Customer satisfaction scores are not available; showing a neutral score.";

/// Shown when the monitoring source holds no samples at all
pub const NO_MONITORING_MESSAGE: &str = "No monitoring data available.";

/// Columns of the doctor view detail table
pub const DETAIL_COLUMNS: &[&str] = &[
    patient::PATIENT_ID,
    patient::DOCTOR_ID,
    patient::PROCEDURE,
    patient::ADMISSION,
    patient::DISCHARGE,
    patient::CONDITION,
    patient::OUTCOME,
    patient::COST,
    patient::READMISSION,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    /// Revenue and KPI overview
    Overview,
    /// Doctor performance and patient overview
    Doctors,
    /// 24-hour patient monitoring
    Monitoring,
}

impl View {
    pub const ALL: [Self; 3] = [Self::Overview, Self::Doctors, Self::Monitoring];
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Overview => "overview",
            Self::Doctors => "doctors",
            Self::Monitoring => "monitoring",
        };
        write!(f, "{name}")
    }
}

impl FromStr for View {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overview" | "revenue" | "kpi" => Ok(Self::Overview),
            "doctors" | "doctor" => Ok(Self::Doctors),
            "monitoring" | "live" => Ok(Self::Monitoring),
            other => Err(DashboardError::invalid_argument("view", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewReport {
    pub messages: Vec<String>,
    pub kpis: Vec<KpiCard>,
    pub cost_trend: ChartSpec,
    pub top_procedures: ChartSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoctorReport {
    pub messages: Vec<String>,
    pub kpis: Vec<KpiCard>,
    pub stay_by_medication: ChartSpec,
    pub top_doctors: ChartSpec,
    pub details: DataTable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitoringReport {
    pub messages: Vec<String>,
    pub patient_id: String,
    pub condition: KpiCard,
    pub heart_rate: ChartSpec,
    pub body_temperature: ChartSpec,
    pub oxygen_saturation: ChartSpec,
    pub blood_pressure: ChartSpec,
    /// `None` when the patient has no medication rows
    pub medication_history: Option<DataTable>,
    pub medication_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewReport {
    Overview(OverviewReport),
    Doctors(DoctorReport),
    Monitoring(MonitoringReport),
}

impl ViewReport {
    /// User-facing validation messages of the report
    #[must_use]
    pub fn messages(&self) -> &[String] {
        match self {
            Self::Overview(r) => &r.messages,
            Self::Doctors(r) => &r.messages,
            Self::Monitoring(r) => &r.messages,
        }
    }
}

/// Render one view for the current selection
pub fn render(
    view: View,
    selection: &FilterSelection,
    dataset: &Dataset,
    config: &DashboardConfig,
) -> Result<ViewReport> {
    debug!("Rendering {view} view");
    match view {
        View::Overview => {
            let subset = selection.resolve(&dataset.patients);
            Ok(ViewReport::Overview(render_overview(&subset, config)))
        }
        View::Doctors => {
            let subset = selection.resolve(&dataset.patients);
            Ok(ViewReport::Doctors(render_doctors(
                &subset,
                config,
                dataset.patients.has_satisfaction_column,
            )))
        }
        View::Monitoring => {
            let patient_id = match &selection.patient {
                Some(id) => id.clone(),
                None => match dataset.monitoring.patient_ids().into_iter().next() {
                    Some(id) => id,
                    None => {
                        warn!("Monitoring source has no samples");
                        return Ok(ViewReport::Monitoring(empty_monitoring_report()));
                    }
                },
            };
            render_monitoring(dataset, &patient_id).map(ViewReport::Monitoring)
        }
    }
}

/// Revenue and KPI overview over the financial subset
#[must_use]
pub fn render_overview(subset: &FilteredSubset<'_>, config: &DashboardConfig) -> OverviewReport {
    let records = &subset.financial;
    let kpis = FinancialKpis::compute(records);
    let symbol = config.currency_symbol.as_str();

    let cards = vec![
        KpiCard::new("Total Patients Admitted", format_count(kpis.total_patients)),
        KpiCard::new(
            &format!("Total Cost ({symbol})"),
            format_currency(kpis.total_cost, symbol, 0),
        ),
        KpiCard::new(
            &format!("Avg Cost per Patient ({symbol})"),
            format_optional_currency(kpis.avg_cost_per_patient, symbol, 2),
        ),
        KpiCard::new("Recovered Count", format_count(kpis.recovered)),
        KpiCard::new("Deaths Count", format_count(kpis.deaths)),
        KpiCard::new("Readmissions", format_count(kpis.readmissions)),
    ];

    let money = ValueFormat::Currency {
        symbol: symbol.to_string(),
        decimals: 0,
    };

    let cost_trend = ChartSpec::new(
        "cost_trend",
        "Cost Trends (Monthly)",
        ChartKind::Line,
        Axis::new("Month", "Month"),
        Axis::new(patient::COST, "Cost"),
        money.clone(),
    )
    .with_series(Series::new(
        patient::COST,
        monthly_cost_trend(records)
            .into_iter()
            .map(|(month, cost)| (month, Some(cost))),
    ));

    let procedures = ChartSpec::new(
        "top_procedures",
        "Top Procedures by Revenue",
        ChartKind::Bar,
        Axis::new(patient::PROCEDURE, "Procedure"),
        Axis::new(patient::COST, "Cost"),
        money,
    )
    .with_series(Series::new(
        patient::COST,
        top_procedures(records, config.top_procedures)
            .into_iter()
            .map(|(procedure, cost)| (procedure, Some(cost))),
    ));

    OverviewReport {
        messages: subset.messages.clone(),
        kpis: cards,
        cost_trend,
        top_procedures: procedures,
    }
}

/// Doctor performance over the shared subset.
///
/// Without a satisfaction column the score card shows the neutral `0.0 / 5`
/// and the report says why.
#[must_use]
pub fn render_doctors(
    subset: &FilteredSubset<'_>,
    config: &DashboardConfig,
    has_satisfaction: bool,
) -> DoctorReport {
    let records = &subset.records;
    let kpis = DoctorKpis::compute(records);
    let mut messages = subset.messages.clone();
    if !has_satisfaction {
        messages.push(NO_SATISFACTION_MESSAGE.to_string());
    }

    let cards = vec![
        KpiCard::new(
            "Avg Patient Visits / Month",
            format_decimal(kpis.monthly_visit_rate, 1),
        ),
        KpiCard::new(
            "Avg Patients per Doctor",
            format_decimal(kpis.avg_patients_per_doctor, 1),
        ),
        KpiCard::new("Patient Satisfaction Score", format_score(kpis.avg_satisfaction)),
    ];

    let stay_by_medication = ChartSpec::new(
        "stay_by_medication",
        "Average Patient Stay (Days) by Medication",
        ChartKind::Pie,
        Axis::new(patient::MEDICATION, "Medication"),
        Axis::new("Length_of_Stay", "Length of Stay (days)"),
        ValueFormat::Decimal { places: 1 },
    )
    .with_series(Series::new(
        "Length_of_Stay",
        length_of_stay_by_medication(records),
    ));

    let doctors = ChartSpec::new(
        "top_doctors",
        &format!("Top {} Doctors by Patients Treated", config.top_doctors),
        ChartKind::Bar,
        Axis::new(patient::DOCTOR_ID, "Doctor ID"),
        Axis::new("Patients_Treated", "Patients Treated"),
        ValueFormat::Count,
    )
    .with_series(Series::new(
        "Patients_Treated",
        top_doctors(records, config.top_doctors)
            .into_iter()
            .map(|(doctor, n)| (doctor, Some(n as f64))),
    ));

    DoctorReport {
        messages,
        kpis: cards,
        stay_by_medication,
        top_doctors: doctors,
        details: detail_table(records),
    }
}

/// Patient detail rows, most recent admission first
#[must_use]
pub fn detail_table(records: &[&PatientRecord]) -> DataTable {
    let mut table = DataTable::new(DETAIL_COLUMNS);
    table.rows = records
        .iter()
        .map(|r| {
            vec![
                Cell::text(r.patient_id.as_deref()),
                Cell::text(r.doctor_id.as_deref()),
                Cell::text(r.procedure.as_deref()),
                Cell::datetime(r.admission_time),
                Cell::datetime(r.discharge_time),
                Cell::text(r.condition.as_deref()),
                Cell::text(r.outcome.as_deref()),
                Cell::number(r.cost),
                Cell::text(r.readmission_flag.as_deref()),
            ]
        })
        .collect();
    table.sort_by(patient::ADMISSION, false);
    table
}

/// Live monitoring for one patient. Ignores every date and condition filter.
pub fn render_monitoring(dataset: &Dataset, patient_id: &str) -> Result<MonitoringReport> {
    let samples = patient_vitals(&dataset.monitoring, patient_id);
    if samples.is_empty() {
        return Err(DashboardError::UnknownPatient(patient_id.to_string()));
    }
    Ok(monitoring_report(dataset, patient_id, &samples))
}

/// Monitoring view with nothing to show, for a source without samples
#[must_use]
pub fn empty_monitoring_report() -> MonitoringReport {
    let mut report = monitoring_report(&Dataset::default(), "", &[]);
    report.messages.push(NO_MONITORING_MESSAGE.to_string());
    report
}

fn monitoring_report(
    dataset: &Dataset,
    patient_id: &str,
    samples: &[&MonitoringSample],
) -> MonitoringReport {
    let condition = latest_condition(&dataset.patients, patient_id)
        .unwrap_or_else(|| NO_CONDITION_DATA.to_string());

    let history = medication_history(&dataset.patients, patient_id);
    let (medication_history, medication_message) = if history.is_empty() {
        (None, Some(NO_MEDICATION_MESSAGE.to_string()))
    } else {
        let mut table = DataTable::new(&[patient::ADMISSION, patient::MEDICATION]);
        table.rows = history
            .into_iter()
            .map(|(admitted, medication)| vec![Cell::DateTime(admitted), Cell::Text(medication)])
            .collect();
        (Some(table), None)
    };

    MonitoringReport {
        messages: Vec::new(),
        patient_id: patient_id.to_string(),
        condition: KpiCard::new("Current Condition Status", condition),
        heart_rate: vital_chart("heart_rate", "Heart Rate", monitoring::HEART_RATE, samples, |s| s.heart_rate),
        body_temperature: vital_chart(
            "body_temperature",
            "Body Temperature",
            monitoring::BODY_TEMPERATURE,
            samples,
            |s| s.body_temperature,
        ),
        oxygen_saturation: vital_chart(
            "oxygen_saturation",
            "Oxygen Saturation",
            monitoring::OXYGEN_SATURATION,
            samples,
            |s| s.oxygen_saturation,
        ),
        blood_pressure: blood_pressure_chart(samples),
        medication_history,
        medication_message,
    }
}

fn timestamp_label(sample: &MonitoringSample) -> String {
    sample
        .timestamp
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

fn vital_series(
    name: &str,
    samples: &[&MonitoringSample],
    value: impl Fn(&MonitoringSample) -> Option<f64>,
) -> Series {
    Series::new(name, samples.iter().map(|s| (timestamp_label(s), value(*s))))
}

fn vital_chart(
    id: &str,
    title: &str,
    column: &str,
    samples: &[&MonitoringSample],
    value: impl Fn(&MonitoringSample) -> Option<f64>,
) -> ChartSpec {
    ChartSpec::new(
        id,
        title,
        ChartKind::Line,
        Axis::new(monitoring::TIMESTAMP, "Timestamp"),
        Axis::new(column, column),
        ValueFormat::Decimal { places: 1 },
    )
    .with_series(vital_series(column, samples, value))
}

fn blood_pressure_chart(samples: &[&MonitoringSample]) -> ChartSpec {
    let mut chart = ChartSpec::new(
        "blood_pressure",
        "Blood Pressure",
        ChartKind::Line,
        Axis::new(monitoring::TIMESTAMP, "Timestamp"),
        Axis::new("value", "Blood Pressure (mmHg)"),
        ValueFormat::Decimal { places: 0 },
    )
    .with_series(vital_series(monitoring::SYSTOLIC_BP, samples, |s| s.systolic_bp))
    .with_series(vital_series(monitoring::DIASTOLIC_BP, samples, |s| s.diastolic_bp));
    chart.markers = false;
    chart
}
