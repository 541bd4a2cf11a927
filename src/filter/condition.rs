//! Condition label filtering

use std::collections::BTreeSet;

use crate::filter::generic::Filter;
use crate::models::PatientRecord;

/// Keeps records whose condition is in a label set. An empty set keeps everything.
#[derive(Debug, Clone, Default)]
pub struct ConditionFilter {
    conditions: BTreeSet<String>,
}

impl ConditionFilter {
    #[must_use]
    pub const fn new(conditions: BTreeSet<String>) -> Self {
        Self { conditions }
    }

    #[must_use]
    pub fn is_pass_all(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl Filter<PatientRecord> for ConditionFilter {
    fn matches(&self, input: &PatientRecord) -> bool {
        self.is_pass_all()
            || input
                .condition
                .as_ref()
                .is_some_and(|c| self.conditions.contains(c))
    }

    fn describe(&self) -> String {
        if self.is_pass_all() {
            "any condition".to_string()
        } else {
            format!(
                "condition in [{}]",
                self.conditions.iter().cloned().collect::<Vec<_>>().join(", ")
            )
        }
    }
}
