use serde::Serialize;
use serde_json::Value;

use super::aggregate::Aggregates;

/// Response payload for a grid query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSourceResult {
    pub data: GridData,
    /// Rows matching the filter, before paging.
    pub total: usize,
    #[serde(skip_serializing_if = "Aggregates::is_empty")]
    pub aggregates: Aggregates,
}

impl DataSourceResult {
    pub fn records(data: Vec<Value>, total: usize) -> Self {
        Self {
            data: GridData::Records(data),
            total,
            aggregates: Aggregates::new(),
        }
    }
}

/// Either flat rows or, for grouped queries, a tree of groups.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GridData {
    Records(Vec<Value>),
    Groups(Vec<Group>),
}

impl GridData {
    pub fn len(&self) -> usize {
        match self {
            GridData::Records(records) => records.len(),
            GridData::Groups(groups) => groups.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub field: String,
    pub value: Value,
    pub has_subgroups: bool,
    pub items: GridData,
    pub aggregates: Aggregates,
}
