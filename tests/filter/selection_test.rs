use std::collections::BTreeSet;

use hosp_report::filter::{
    DateRange, FilterSelection, INVALID_COST_RANGE_MESSAGE, INVALID_RANGE_MESSAGE, filter_records,
};
use hosp_report::{PatientRecord, PatientTable};
use pretty_assertions::assert_eq;

use crate::utils::{at, date, three_admissions};

fn ids(records: &[&PatientRecord]) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| r.patient_id.clone())
        .collect()
}

/// Every kept record lies inside the inclusive range
#[test]
fn test_filtered_records_stay_within_bounds() {
    let records = three_admissions();
    let ranges = [
        (date(2024, 1, 5), date(2024, 1, 5)),
        (date(2024, 1, 6), date(2024, 2, 19)),
        (date(2024, 1, 1), date(2024, 12, 31)),
        (date(2023, 1, 1), date(2023, 12, 31)),
    ];
    for (from, to) in ranges {
        let range = DateRange::new(from, to).unwrap();
        for record in filter_records(&records, &range, &BTreeSet::new()) {
            let admitted = record.admission_date().unwrap();
            assert!(from <= admitted && admitted <= to, "{admitted} outside {range}");
        }
    }
}

#[test]
fn test_bounds_are_inclusive() {
    let records = three_admissions();
    let range = DateRange::new(date(2024, 1, 5), date(2024, 1, 15)).unwrap();
    let kept = filter_records(&records, &range, &BTreeSet::new());
    assert_eq!(ids(&kept), vec!["A", "B"]);
}

#[test]
fn test_empty_condition_set_is_identity() {
    let records = three_admissions();
    let range = DateRange::new(date(2024, 1, 1), date(2024, 12, 31)).unwrap();
    let unfiltered = filter_records(&records, &range, &BTreeSet::new());
    assert_eq!(unfiltered.len(), records.len());

    let asthma: BTreeSet<String> = ["Asthma".to_string()].into_iter().collect();
    assert_eq!(ids(&filter_records(&records, &range, &asthma)), vec!["B"]);
}

#[test]
fn test_missing_admission_never_matches() {
    let records = vec![PatientRecord::new("X").with_condition("Flu")];
    let range = DateRange::new(chrono::NaiveDate::MIN, chrono::NaiveDate::MAX).unwrap();
    assert!(filter_records(&records, &range, &BTreeSet::new()).is_empty());
}

#[test]
fn test_inverted_range_is_reported_not_swapped() {
    let table = PatientTable::new(three_admissions(), false);
    let subset = FilterSelection::new(date(2024, 3, 1), date(2024, 1, 1)).resolve(&table);
    assert!(subset.records.is_empty());
    assert!(subset.financial.is_empty());
    assert_eq!(subset.messages, vec![INVALID_RANGE_MESSAGE.to_string()]);
}

#[test]
fn test_cost_range_intersects_primary_range() {
    let table = PatientTable::new(three_admissions(), false);
    let subset = FilterSelection::new(date(2024, 1, 10), date(2024, 12, 31))
        .with_cost_range(date(2024, 1, 1), date(2024, 1, 31))
        .resolve(&table);

    assert_eq!(ids(&subset.records), vec!["A", "B"]);
    assert_eq!(subset.records[0].admission_time, Some(at(2024, 2, 20, 14)));
    // Only January admissions that also passed the primary range
    assert_eq!(ids(&subset.financial), vec!["B"]);
    assert!(subset.messages.is_empty());
}

#[test]
fn test_inverted_cost_range_only_empties_financial_subset() {
    let table = PatientTable::new(three_admissions(), false);
    let subset = FilterSelection::for_table(&table)
        .with_cost_range(date(2024, 2, 1), date(2024, 1, 1))
        .resolve(&table);
    assert_eq!(subset.records.len(), 3);
    assert!(subset.financial.is_empty());
    assert_eq!(subset.messages, vec![INVALID_COST_RANGE_MESSAGE.to_string()]);
}

#[test]
fn test_selection_for_table_spans_all_admissions() {
    let table = PatientTable::new(three_admissions(), false);
    let selection = FilterSelection::for_table(&table);
    assert_eq!(selection.from, date(2024, 1, 5));
    assert_eq!(selection.to, date(2024, 2, 20));
    assert_eq!(selection.resolve(&table).financial.len(), 3);
}
