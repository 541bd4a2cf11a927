use hosp_report::error::DashboardError;
use hosp_report::filter::INVALID_RANGE_MESSAGE;
use hosp_report::report::{
    Cell, ChartKind, NO_MEDICATION_MESSAGE, NO_MONITORING_MESSAGE, NO_SATISFACTION_MESSAGE,
};
use hosp_report::{DashboardConfig, DataLoader, FilterSelection, PatientTable, View, ViewReport, render};
use pretty_assertions::assert_eq;

use crate::utils::{
    MONITORING_HEADER, date, dataset_without_medication, fixture_sources, patient_csv,
    three_admissions, write_file,
};

fn card<'a>(cards: &'a [hosp_report::report::KpiCard], label: &str) -> &'a str {
    cards
        .iter()
        .find(|c| c.label == label)
        .map(|c| c.value.as_str())
        .unwrap_or_else(|| panic!("no card labelled {label}"))
}

#[test]
fn test_overview_for_three_admissions() {
    let dataset = hosp_report::Dataset::new(
        PatientTable::new(three_admissions(), false),
        Default::default(),
    );
    let config = DashboardConfig::default();
    let selection = FilterSelection::for_table(&dataset.patients);

    let ViewReport::Overview(report) = render(View::Overview, &selection, &dataset, &config).unwrap()
    else {
        panic!("expected overview report");
    };
    assert_eq!(card(&report.kpis, "Total Patients Admitted"), "2");
    assert_eq!(card(&report.kpis, "Total Cost (£)"), "£350");
    assert_eq!(card(&report.kpis, "Avg Cost per Patient (£)"), "£175.00");
    assert_eq!(report.kpis.len(), 6);

    assert_eq!(report.cost_trend.kind, ChartKind::Line);
    let months: Vec<&str> = report.cost_trend.series[0]
        .points
        .iter()
        .map(|p| p.x.as_str())
        .collect();
    assert_eq!(months, vec!["2024-01", "2024-02"]);
    assert_eq!(report.cost_trend.series[0].points[0].y, Some(150.0));
}

#[test]
fn test_inverted_range_renders_empty_charts_with_message() {
    let dataset = dataset_without_medication();
    let config = DashboardConfig::default();
    let selection = FilterSelection::new(date(2024, 6, 1), date(2024, 1, 1));

    for view in [View::Overview, View::Doctors] {
        let report = render(view, &selection, &dataset, &config).unwrap();
        assert_eq!(report.messages().to_vec(), vec![INVALID_RANGE_MESSAGE.to_string()]);
        match report {
            ViewReport::Overview(r) => {
                assert!(r.cost_trend.is_empty());
                assert!(r.top_procedures.is_empty());
                assert_eq!(card(&r.kpis, "Avg Cost per Patient (£)"), "N/A");
            }
            ViewReport::Doctors(r) => {
                assert!(r.top_doctors.is_empty());
                assert!(r.details.is_empty());
                assert_eq!(card(&r.kpis, "Patient Satisfaction Score"), "0.0 / 5");
            }
            ViewReport::Monitoring(_) => unreachable!(),
        }
    }
}

#[test]
fn test_monitoring_without_medication_reports_no_data() {
    let dataset = dataset_without_medication();
    let selection = FilterSelection::for_table(&dataset.patients);
    let ViewReport::Monitoring(report) =
        render(View::Monitoring, &selection, &dataset, &DashboardConfig::default()).unwrap()
    else {
        panic!("expected monitoring report");
    };

    assert_eq!(report.patient_id, "B");
    assert_eq!(report.condition.value, "Asthma");
    assert!(report.medication_history.is_none());
    assert_eq!(report.medication_message.as_deref(), Some(NO_MEDICATION_MESSAGE));
    let text = ViewReport::Monitoring(report).to_text();
    assert!(text.contains(NO_MEDICATION_MESSAGE));
    assert!(text.contains("Current Condition Status"));
}

#[test]
fn test_monitoring_ignores_date_filter() {
    let dataset = dataset_without_medication();
    // A range that excludes every admission and every sample
    let selection = FilterSelection::new(date(2020, 1, 1), date(2020, 1, 2)).with_patient("B");
    let ViewReport::Monitoring(report) =
        render(View::Monitoring, &selection, &dataset, &DashboardConfig::default()).unwrap()
    else {
        panic!("expected monitoring report");
    };
    let xs: Vec<&str> = report.heart_rate.series[0]
        .points
        .iter()
        .map(|p| p.x.as_str())
        .collect();
    assert_eq!(xs, vec!["2024-03-01 00:00", "2024-03-01 01:00"]);
    assert_eq!(report.blood_pressure.series.len(), 2);
}

#[test]
fn test_unknown_patient_is_an_error() {
    let dataset = dataset_without_medication();
    let selection = FilterSelection::for_table(&dataset.patients).with_patient("Z");
    let err = render(View::Monitoring, &selection, &dataset, &DashboardConfig::default())
        .unwrap_err();
    assert!(matches!(err, DashboardError::UnknownPatient(id) if id == "Z"));
}

#[test]
fn test_doctor_view_from_csv_sources() {
    let (_dir, patients, monitoring) = fixture_sources();
    let config = DashboardConfig {
        patient_data: patients,
        monitoring_data: monitoring,
        ..Default::default()
    };
    let mut loader = DataLoader::new(config.clone());
    let dataset = loader.load_dataset().unwrap();
    let selection = FilterSelection::for_table(&dataset.patients);

    let ViewReport::Doctors(mut report) =
        render(View::Doctors, &selection, &dataset, &config).unwrap()
    else {
        panic!("expected doctor report");
    };

    // Row C has no admission time and is filtered out
    assert_eq!(report.details.rows.len(), 3);
    assert_eq!(report.details.rows[0][0], Cell::Text("A".to_string()));
    assert_eq!(report.details.rows[2][3].to_string(), "2024-01-05 09:30:00");

    // (80 + 60) / 2 on a 0-100 scale is 3.5 out of 5
    assert_eq!(card(&report.kpis, "Patient Satisfaction Score"), "3.5 / 5");
    assert_eq!(card(&report.kpis, "Avg Patients per Doctor"), "1.0");

    assert_eq!(report.stay_by_medication.kind, ChartKind::Pie);
    let stays: Vec<(String, Option<f64>)> = report.stay_by_medication.series[0]
        .points
        .iter()
        .map(|p| (p.x.clone(), p.y))
        .collect();
    assert_eq!(
        stays,
        vec![("Aspirin".to_string(), Some(2.0)), ("Statin".to_string(), Some(1.0))]
    );

    assert!(report.details.sort_by("Cost", true));
    assert_eq!(report.details.rows[0][7], Cell::Number(50.0));

    let json = serde_json::to_value(ViewReport::Doctors(report)).unwrap();
    assert_eq!(json["view"], "doctors");
    assert_eq!(json["top_doctors"]["kind"], "bar");
}

#[test]
fn test_all_views_render_with_header_only_monitoring_source() {
    let dir = tempfile::tempdir().unwrap();
    let config = DashboardConfig {
        patient_data: write_file(&dir, "patients.csv", &patient_csv()),
        monitoring_data: write_file(&dir, "monitoring.csv", MONITORING_HEADER),
        ..Default::default()
    };
    let dataset = DataLoader::new(config.clone()).load_dataset().unwrap();
    assert!(dataset.monitoring.is_empty());
    let selection = FilterSelection::for_table(&dataset.patients);

    let reports: Vec<ViewReport> = View::ALL
        .into_iter()
        .map(|view| render(view, &selection, &dataset, &config))
        .collect::<hosp_report::Result<_>>()
        .unwrap();
    assert_eq!(reports.len(), 3);

    let ViewReport::Monitoring(monitoring) = &reports[2] else {
        panic!("expected monitoring report");
    };
    assert_eq!(monitoring.messages, vec![NO_MONITORING_MESSAGE.to_string()]);
    assert!(monitoring.heart_rate.is_empty());
    assert!(monitoring.blood_pressure.is_empty());
    assert_eq!(monitoring.condition.value, "No data");

    // An explicitly requested patient without samples is still an error
    let err = render(View::Monitoring, &selection.with_patient("A"), &dataset, &config)
        .unwrap_err();
    assert!(matches!(err, DashboardError::UnknownPatient(id) if id == "A"));
}

#[test]
fn test_missing_satisfaction_column_is_reported_on_doctor_view() {
    let dataset = hosp_report::Dataset::new(
        PatientTable::new(three_admissions(), false),
        Default::default(),
    );
    let selection = FilterSelection::for_table(&dataset.patients);
    let ViewReport::Doctors(report) =
        render(View::Doctors, &selection, &dataset, &DashboardConfig::default()).unwrap()
    else {
        panic!("expected doctor report");
    };
    assert_eq!(report.messages, vec![NO_SATISFACTION_MESSAGE.to_string()]);
    assert_eq!(card(&report.kpis, "Patient Satisfaction Score"), "0.0 / 5");
}
