//! Presentation adapter
//!
//! Maps filtered aggregates to display specifications: KPI cards, chart
//! specs and detail tables. A surface (terminal, JSON consumer, web UI) only
//! draws what it is handed here.

pub mod chart;
pub mod format;
mod text;
pub mod views;

pub use chart::{Axis, Cell, ChartKind, ChartSpec, DataPoint, DataTable, KpiCard, Series, ValueFormat};
pub use views::{
    DoctorReport, MonitoringReport, NO_MEDICATION_MESSAGE, NO_MONITORING_MESSAGE,
    NO_SATISFACTION_MESSAGE, OverviewReport, View, ViewReport, empty_monitoring_report, render,
};
