use serde_json::Value;

use super::aggregate;
use super::request::GroupDescriptor;
use super::result::{GridData, Group};
use super::value;

/// Builds the group tree for one page of rows.
///
/// `page` must already be ordered by the group fields. `scope` holds every
/// filtered row; group aggregates are computed over the rows of `scope`
/// that fall into the group, so they stay correct when a group spans pages.
pub fn group_records(page: &[&Value], descriptors: &[GroupDescriptor], scope: &[&Value]) -> Vec<Group> {
    let Some((descriptor, rest)) = descriptors.split_first() else {
        return Vec::new();
    };

    let mut groups = Vec::new();
    let mut start = 0;
    while start < page.len() {
        let key = value::field_or_null(page[start], &descriptor.field);
        let end = page[start..]
            .iter()
            .position(|record| value::compare(value::field_or_null(record, &descriptor.field), key).is_ne())
            .map_or(page.len(), |offset| start + offset);

        let members = &page[start..end];
        let group_scope: Vec<&Value> = scope
            .iter()
            .copied()
            .filter(|record| value::compare(value::field_or_null(record, &descriptor.field), key).is_eq())
            .collect();

        let items = if rest.is_empty() {
            GridData::Records(members.iter().map(|record| (*record).clone()).collect())
        } else {
            GridData::Groups(group_records(members, rest, &group_scope))
        };

        groups.push(Group {
            field: descriptor.field.clone(),
            value: key.clone(),
            has_subgroups: !rest.is_empty(),
            items,
            aggregates: aggregate::calculate(&group_scope, &descriptor.aggregates),
        });
        start = end;
    }
    groups
}
