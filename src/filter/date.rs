//! Date range filtering on admission time
//!
//! Bounds are inclusive and compare calendar dates only. A record without an
//! admission time never satisfies a bound.

use std::fmt;

use chrono::NaiveDate;

use crate::error::{DashboardError, Result};
use crate::filter::generic::Filter;
use crate::models::PatientRecord;

/// An inclusive, validated date range (`from <= to`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `from > to`. The bounds are never swapped.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if from > to {
            return Err(DashboardError::InvalidDateRange { from, to });
        }
        Ok(Self { from, to })
    }

    #[must_use]
    pub const fn from(&self) -> NaiveDate {
        self.from
    }

    #[must_use]
    pub const fn to(&self) -> NaiveDate {
        self.to
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// The overlap of two ranges, `None` if they are disjoint
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        Self::new(self.from.max(other.from), self.to.min(other.to)).ok()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.from, self.to)
    }
}

/// A filter that keeps records admitted within a date range
#[derive(Debug, Clone, Copy)]
pub struct AdmissionDateFilter {
    range: DateRange,
}

impl AdmissionDateFilter {
    #[must_use]
    pub const fn new(range: DateRange) -> Self {
        Self { range }
    }
}

impl Filter<PatientRecord> for AdmissionDateFilter {
    fn matches(&self, input: &PatientRecord) -> bool {
        input
            .admission_date()
            .is_some_and(|date| self.range.contains(date))
    }

    fn describe(&self) -> String {
        format!("admission {}", self.range)
    }
}
