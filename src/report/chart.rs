//! Display specifications handed to a rendering surface
//!
//! These types carry no business logic. They describe what to draw (chart
//! kind, axis bindings, number format) and the already aggregated values.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::report::format::{format_currency, format_decimal, format_thousands};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
}

/// How values on the y axis (or pie slices) are printed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValueFormat {
    Currency { symbol: String, decimals: usize },
    Count,
    Decimal { places: usize },
}

impl ValueFormat {
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        match self {
            Self::Currency { symbol, decimals } => format_currency(value, symbol, *decimals),
            Self::Count => format_thousands(value, 0),
            Self::Decimal { places } => format_decimal(value, *places),
        }
    }
}

/// A field binding and its axis label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Axis {
    pub field: String,
    pub label: String,
}

impl Axis {
    #[must_use]
    pub fn new(field: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
        }
    }
}

/// One x/y pair. `y` is `None` where the aggregate is undefined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataPoint {
    pub x: String,
    pub y: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<DataPoint>,
}

impl Series {
    #[must_use]
    pub fn new<X: ToString>(name: impl Into<String>, points: impl IntoIterator<Item = (X, Option<f64>)>) -> Self {
        Self {
            name: name.into(),
            points: points
                .into_iter()
                .map(|(x, y)| DataPoint { x: x.to_string(), y })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub id: String,
    pub title: String,
    pub kind: ChartKind,
    pub x: Axis,
    pub y: Axis,
    pub series: Vec<Series>,
    pub value_format: ValueFormat,
    /// Draw point markers on line charts
    pub markers: bool,
}

impl ChartSpec {
    #[must_use]
    pub fn new(id: &str, title: &str, kind: ChartKind, x: Axis, y: Axis, value_format: ValueFormat) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            kind,
            x,
            y,
            series: Vec::new(),
            value_format,
            markers: kind == ChartKind::Line,
        }
    }

    #[must_use]
    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    /// Whether there is nothing to draw
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }
}

/// A single headline figure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiCard {
    pub label: String,
    pub value: String,
}

impl KpiCard {
    #[must_use]
    pub fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

/// A typed table cell, so that tables sort numerically and chronologically
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(f64),
    DateTime(NaiveDateTime),
    Empty,
}

impl Cell {
    #[must_use]
    pub fn text(value: Option<&str>) -> Self {
        value.map_or(Self::Empty, |v| Self::Text(v.to_string()))
    }

    #[must_use]
    pub fn number(value: Option<f64>) -> Self {
        value.map_or(Self::Empty, Self::Number)
    }

    #[must_use]
    pub fn datetime(value: Option<NaiveDateTime>) -> Self {
        value.map_or(Self::Empty, Self::DateTime)
    }

    /// Order of two non-empty cells. Mixed kinds compare by kind.
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::DateTime(a), Self::DateTime(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Number(_) => 0,
            Self::DateTime(_) => 1,
            Self::Text(_) => 2,
            Self::Empty => 3,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Self::Empty => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl DataTable {
    #[must_use]
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(ToString::to_string).collect(),
            rows: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Stable sort on one column. Empty cells always go last.
    ///
    /// Returns `false`, leaving the table untouched, if the column does not exist.
    pub fn sort_by(&mut self, column: &str, ascending: bool) -> bool {
        let Some(idx) = self.columns.iter().position(|c| c == column) else {
            return false;
        };
        self.rows.sort_by(|a, b| match (&a[idx], &b[idx]) {
            (Cell::Empty, Cell::Empty) => Ordering::Equal,
            (Cell::Empty, _) => Ordering::Greater,
            (_, Cell::Empty) => Ordering::Less,
            (x, y) if ascending => x.compare(y),
            (x, y) => y.compare(x),
        });
        true
    }
}
