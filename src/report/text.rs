//! Plain-text rendering of view reports for terminal output

use crate::report::chart::{ChartKind, ChartSpec, DataTable, KpiCard};
use crate::report::format::format_percentage;
use crate::report::views::{DoctorReport, MonitoringReport, OverviewReport, ViewReport};

impl ViewReport {
    /// Render a plain-text summary of the report
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Overview(r) => overview_text(r),
            Self::Doctors(r) => doctors_text(r),
            Self::Monitoring(r) => monitoring_text(r),
        }
    }
}

fn heading(out: &mut String, title: &str) {
    out.push_str(&format!("{title}\n"));
    out.push_str(&format!("{}\n", "=".repeat(title.chars().count())));
}

fn messages_text(out: &mut String, messages: &[String]) {
    for message in messages {
        out.push_str(&format!("! {message}\n"));
    }
    if !messages.is_empty() {
        out.push('\n');
    }
}

fn cards_text(out: &mut String, cards: &[KpiCard]) {
    let width = cards
        .iter()
        .map(|c| c.label.chars().count())
        .max()
        .unwrap_or(0);
    for card in cards {
        out.push_str(&format!("  {:<width$}  {}\n", card.label, card.value));
    }
    out.push('\n');
}

fn chart_text(out: &mut String, chart: &ChartSpec) {
    out.push_str(&format!("{}\n", chart.title));
    if chart.is_empty() {
        out.push_str("  (no data)\n\n");
        return;
    }

    let multi = chart.series.len() > 1;
    for series in &chart.series {
        if multi {
            out.push_str(&format!("  [{}]\n", series.name));
        }
        // Pie slices also show their share of the total
        let total: f64 = series.points.iter().filter_map(|p| p.y).sum();
        let width = series
            .points
            .iter()
            .map(|p| p.x.chars().count())
            .max()
            .unwrap_or(0);
        for point in &series.points {
            let value = point
                .y
                .map_or_else(|| "-".to_string(), |y| chart.value_format.format(y));
            match (chart.kind, point.y) {
                (ChartKind::Pie, Some(y)) if total > 0.0 => out.push_str(&format!(
                    "  {:<width$}  {value} ({})\n",
                    point.x,
                    format_percentage(y / total)
                )),
                _ => out.push_str(&format!("  {:<width$}  {value}\n", point.x)),
            }
        }
    }
    out.push('\n');
}

fn table_text(out: &mut String, table: &DataTable) {
    let rendered: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect();

    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            rendered
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(column.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        format!("  {}\n", padded.join(" | ").trim_end())
    };

    out.push_str(&line(&table.columns));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&line(&rule));
    for row in &rendered {
        out.push_str(&line(row));
    }
    out.push('\n');
}

fn overview_text(report: &OverviewReport) -> String {
    let mut out = String::new();
    heading(&mut out, "Revenue & KPI Overview");
    messages_text(&mut out, &report.messages);
    cards_text(&mut out, &report.kpis);
    chart_text(&mut out, &report.cost_trend);
    chart_text(&mut out, &report.top_procedures);
    out
}

fn doctors_text(report: &DoctorReport) -> String {
    let mut out = String::new();
    heading(&mut out, "Doctor Performance & Patient Overview");
    messages_text(&mut out, &report.messages);
    cards_text(&mut out, &report.kpis);
    chart_text(&mut out, &report.stay_by_medication);
    chart_text(&mut out, &report.top_doctors);
    out.push_str("Patient Details\n");
    if report.details.is_empty() {
        out.push_str("  (no data)\n\n");
    } else {
        table_text(&mut out, &report.details);
    }
    out
}

fn monitoring_text(report: &MonitoringReport) -> String {
    let mut out = String::new();
    heading(
        &mut out,
        &format!("24-Hour Patient Monitoring: {}", report.patient_id),
    );
    messages_text(&mut out, &report.messages);
    cards_text(&mut out, std::slice::from_ref(&report.condition));
    for chart in [
        &report.heart_rate,
        &report.body_temperature,
        &report.oxygen_saturation,
        &report.blood_pressure,
    ] {
        chart_text(&mut out, chart);
    }
    out.push_str("Medication History\n");
    match (&report.medication_history, &report.medication_message) {
        (Some(table), _) => table_text(&mut out, table),
        (None, Some(message)) => out.push_str(&format!("  {message}\n")),
        (None, None) => {}
    }
    out
}
