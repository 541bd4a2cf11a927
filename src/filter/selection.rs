//! Turning raw user filter inputs into the subsets every view reads from

use std::collections::BTreeSet;

use chrono::NaiveDate;
use log::{debug, warn};

use crate::filter::condition::ConditionFilter;
use crate::filter::date::{AdmissionDateFilter, DateRange};
use crate::filter::generic::{AndFilter, Filter};
use crate::models::{PatientRecord, PatientTable};

/// Shown when the sidebar range is inverted
pub const INVALID_RANGE_MESSAGE: &str = "Error: From Date must be before To Date.";

/// Shown when the financial view range is inverted
pub const INVALID_COST_RANGE_MESSAGE: &str =
    "Error: Cost Trend From date must be before To date.";

/// Filter the records admitted within `range` whose condition is in `conditions`.
///
/// An empty `conditions` set applies no condition filter.
#[must_use]
pub fn filter_records<'a>(
    records: &'a [PatientRecord],
    range: &DateRange,
    conditions: &BTreeSet<String>,
) -> Vec<&'a PatientRecord> {
    let filter = AndFilter::default()
        .and(AdmissionDateFilter::new(*range))
        .and(ConditionFilter::new(conditions.clone()));
    let kept: Vec<&PatientRecord> = records.iter().filter(|r| filter.matches(r)).collect();
    debug!(
        "Filter [{}] kept {} of {} records",
        filter.describe(),
        kept.len(),
        records.len()
    );
    kept
}

/// Raw filter inputs as received from the controls. Ranges are not validated yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub conditions: BTreeSet<String>,
    /// Financial view bounds, defaulting to `from`/`to`
    pub cost_from: Option<NaiveDate>,
    pub cost_to: Option<NaiveDate>,
    /// Monitoring view patient
    pub patient: Option<String>,
}

impl FilterSelection {
    #[must_use]
    pub const fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from,
            to,
            conditions: BTreeSet::new(),
            cost_from: None,
            cost_to: None,
            patient: None,
        }
    }

    /// A selection spanning every admission date in the table.
    ///
    /// A table without any admission date gets the widest possible range,
    /// which still matches nothing.
    #[must_use]
    pub fn for_table(table: &PatientTable) -> Self {
        let (from, to) = table
            .admission_date_bounds()
            .unwrap_or((NaiveDate::MIN, NaiveDate::MAX));
        Self::new(from, to)
    }

    #[must_use]
    pub fn with_conditions<I, S>(mut self, conditions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conditions = conditions.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn with_cost_range(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.cost_from = Some(from);
        self.cost_to = Some(to);
        self
    }

    #[must_use]
    pub fn with_patient(mut self, patient: impl Into<String>) -> Self {
        self.patient = Some(patient.into());
        self
    }

    /// Apply the selection to a table.
    ///
    /// An inverted primary range yields an empty subset and one message. An
    /// explicit financial range that is inverted or disjoint yields an empty
    /// financial subset; an inverted one adds its own message.
    #[must_use]
    pub fn resolve<'a>(&self, table: &'a PatientTable) -> FilteredSubset<'a> {
        let mut messages = Vec::new();

        let primary = match DateRange::new(self.from, self.to) {
            Ok(range) => Some(range),
            Err(e) => {
                warn!("{e}");
                messages.push(INVALID_RANGE_MESSAGE.to_string());
                None
            }
        };

        let records = primary
            .map(|range| filter_records(&table.records, &range, &self.conditions))
            .unwrap_or_default();

        let financial = if self.cost_from.is_none() && self.cost_to.is_none() {
            // No financial range of its own: the shared subset as is
            records.clone()
        } else {
            let cost_range = DateRange::new(
                self.cost_from.unwrap_or(self.from),
                self.cost_to.unwrap_or(self.to),
            );
            match (primary, cost_range) {
                (_, Err(e)) => {
                    warn!("{e}");
                    messages.push(INVALID_COST_RANGE_MESSAGE.to_string());
                    Vec::new()
                }
                (None, Ok(_)) => Vec::new(),
                (Some(primary), Ok(cost)) => match primary.intersect(&cost) {
                    Some(narrowed) => AdmissionDateFilter::new(narrowed).apply(&records),
                    None => Vec::new(),
                },
            }
        };

        FilteredSubset {
            records,
            financial,
            messages,
        }
    }
}

/// The filtered views of the patient table for one run
#[derive(Debug, Clone, Default)]
pub struct FilteredSubset<'a> {
    /// Sidebar date range and condition filter applied; shared by every view
    pub records: Vec<&'a PatientRecord>,
    /// `records` further narrowed by the financial view range
    pub financial: Vec<&'a PatientRecord>,
    /// User-facing validation messages
    pub messages: Vec<String>,
}
