//! Filtering of admission records
//!
//! Records are narrowed by an inclusive admission date range and an optional
//! set of condition labels. The financial view applies a second range on top
//! of the first, so its subset is always an intersection, never a replacement.

pub mod condition;
pub mod date;
pub mod generic;
pub mod selection;

pub use condition::ConditionFilter;
pub use date::{AdmissionDateFilter, DateRange};
pub use generic::{AndFilter, Filter};
pub use selection::{
    FilterSelection, FilteredSubset, INVALID_COST_RANGE_MESSAGE, INVALID_RANGE_MESSAGE,
    filter_records,
};
