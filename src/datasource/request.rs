use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use strum_macros::{Display, EnumString};

/// Implements serde for a strum string enum so the wire format and the
/// form parser share one set of accepted spellings.
macro_rules! serde_via_strum {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(|_| {
                    serde::de::Error::custom(format!(
                        "unknown {} '{}'",
                        stringify!($ty),
                        raw
                    ))
                })
            }
        }
    };
}

/// A grid query: paging, sorting, filtering, grouping and aggregates.
///
/// Paging may be expressed either as `skip`/`take` or as `page`/`pageSize`;
/// see [`DataSourceRequest::window`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataSourceRequest {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub skip: Option<usize>,
    pub take: Option<usize>,
    pub sort: Vec<SortDescriptor>,
    pub filter: Option<FilterDescriptor>,
    pub group: Vec<GroupDescriptor>,
    pub aggregate: Vec<AggregateDescriptor>,
}

impl DataSourceRequest {
    /// Resolves the requested slice as `(skip, take)`.
    ///
    /// `take` wins over `pageSize`. Returns `None` when the request does not
    /// page at all, including an explicit `take` or `pageSize` of zero.
    pub fn window(&self) -> Option<(usize, usize)> {
        if let Some(take) = self.take {
            return (take > 0).then(|| (self.skip.unwrap_or(0), take));
        }

        let size = self.page_size.filter(|size| *size > 0)?;
        let page = self.page.unwrap_or(1).max(1);
        // Saturating: an out-of-range page lands past the end.
        let skip = self
            .skip
            .unwrap_or_else(|| (page - 1).saturating_mul(size));
        Some((skip, size))
    }

    /// Sort order applied before paging: group fields first, then the
    /// explicit sort descriptors that don't repeat a group field.
    pub fn effective_sort(&self) -> Vec<SortDescriptor> {
        let mut order: Vec<SortDescriptor> = self
            .group
            .iter()
            .map(|group| SortDescriptor {
                field: group.field.clone(),
                dir: group.dir,
            })
            .collect();

        for sort in &self.sort {
            if !order.iter().any(|existing| existing.field == sort.field) {
                order.push(sort.clone());
            }
        }
        order
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortDescriptor {
    pub field: String,
    #[serde(default)]
    pub dir: SortDirection,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

serde_via_strum!(SortDirection);

/// Filter expression tree.
///
/// A composite node combines its children with `logic`; a condition tests a
/// single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterDescriptor {
    Composite(CompositeFilter),
    Condition(FilterCondition),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeFilter {
    #[serde(default)]
    pub logic: FilterLogic,
    pub filters: Vec<FilterDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCondition {
    pub field: String,
    pub operator: FilterOperator,
    #[serde(default)]
    pub value: Value,
    #[serde(default = "default_ignore_case")]
    pub ignore_case: bool,
}

fn default_ignore_case() -> bool {
    true
}

impl FilterCondition {
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: Value) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
            ignore_case: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FilterLogic {
    #[default]
    And,
    Or,
}

serde_via_strum!(FilterLogic);

/// Comparison operators understood by the grid widget, including the
/// long-hand aliases it accepts on the client side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum FilterOperator {
    #[strum(to_string = "eq", serialize = "==", serialize = "equals", serialize = "isequalto")]
    Eq,
    #[strum(to_string = "neq", serialize = "!=", serialize = "ne", serialize = "notequals", serialize = "isnotequalto")]
    Neq,
    #[strum(to_string = "lt", serialize = "<", serialize = "islessthan", serialize = "lessthan")]
    Lt,
    #[strum(to_string = "lte", serialize = "<=", serialize = "le", serialize = "islessthanorequalto")]
    Lte,
    #[strum(to_string = "gt", serialize = ">", serialize = "isgreaterthan", serialize = "greaterthan")]
    Gt,
    #[strum(to_string = "gte", serialize = ">=", serialize = "ge", serialize = "isgreaterthanorequalto")]
    Gte,
    #[strum(to_string = "startswith")]
    StartsWith,
    #[strum(to_string = "endswith")]
    EndsWith,
    #[strum(to_string = "contains", serialize = "substringof")]
    Contains,
    #[strum(to_string = "doesnotcontain", serialize = "notsubstringof")]
    DoesNotContain,
    #[strum(to_string = "isnull")]
    IsNull,
    #[strum(to_string = "isnotnull")]
    IsNotNull,
    #[strum(to_string = "isempty")]
    IsEmpty,
    #[strum(to_string = "isnotempty")]
    IsNotEmpty,
}

serde_via_strum!(FilterOperator);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDescriptor {
    pub field: String,
    #[serde(default)]
    pub dir: SortDirection,
    #[serde(default)]
    pub aggregates: Vec<AggregateDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateDescriptor {
    pub field: String,
    pub aggregate: AggregateFunction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AggregateFunction {
    Count,
    Sum,
    #[strum(to_string = "average", serialize = "avg")]
    Average,
    Min,
    Max,
}

serde_via_strum!(AggregateFunction);
