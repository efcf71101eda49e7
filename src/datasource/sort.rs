use std::cmp::Ordering;

use serde_json::Value;

use super::request::{SortDescriptor, SortDirection};
use super::value;

/// Compares two records on a sequence of sort keys.
pub fn compare_records(a: &Value, b: &Value, order: &[SortDescriptor]) -> Ordering {
    order
        .iter()
        .map(|sort| {
            let ordering = value::compare(
                value::field_or_null(a, &sort.field),
                value::field_or_null(b, &sort.field),
            );
            match sort.dir {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Stable in-place sort; records equal on every key keep their input order.
pub fn sort_records(records: &mut [&Value], order: &[SortDescriptor]) {
    if order.is_empty() {
        return;
    }
    records.sort_by(|a, b| compare_records(a, b, order));
}
