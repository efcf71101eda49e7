use serde_json::Value;

use super::aggregate;
use super::group;
use super::request::DataSourceRequest;
use super::result::{DataSourceResult, GridData};
use super::sort;

/// Runs a grid query over in-memory records.
///
/// Order of operations: filter, count and aggregate the filtered rows, sort
/// (group fields first), slice the page, then group the page.
pub fn process(records: &[Value], request: &DataSourceRequest) -> DataSourceResult {
    let filtered: Vec<&Value> = records
        .iter()
        .filter(|record| {
            request
                .filter
                .as_ref()
                .is_none_or(|filter| filter.matches(record))
        })
        .collect();

    let total = filtered.len();
    let aggregates = aggregate::calculate(&filtered, &request.aggregate);

    let mut ordered = filtered.clone();
    sort::sort_records(&mut ordered, &request.effective_sort());

    let page: &[&Value] = match request.window() {
        Some((skip, take)) => {
            let start = skip.min(ordered.len());
            let end = start.saturating_add(take).min(ordered.len());
            &ordered[start..end]
        }
        None => &ordered,
    };

    let data = if request.group.is_empty() {
        GridData::Records(page.iter().map(|record| (*record).clone()).collect())
    } else {
        GridData::Groups(group::group_records(page, &request.group, &filtered))
    };

    DataSourceResult {
        data,
        total,
        aggregates,
    }
}
