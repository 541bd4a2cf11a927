//! Aggregations behind the dashboard views
//!
//! Every function here is pure: it takes an already filtered slice of records
//! and returns plain values. Empty input never errors; grouped results come
//! back empty and scalars fall back to zero or `None`.

pub mod grouping;
pub mod kpi;
pub mod monitoring;

pub use grouping::{
    length_of_stay_by_medication, monthly_cost_trend, monthly_visits, patients_per_doctor,
    top_doctors, top_procedures,
};
pub use kpi::{DoctorKpis, FinancialKpis};
