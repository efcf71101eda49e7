//! Binds HTTP requests into [`DataSourceRequest`].
//!
//! Grid widgets post their state as url-encoded forms with bracketed keys:
//!
//! ```text
//! take=10&skip=0&page=1&pageSize=10
//! &sort[0][field]=productName&sort[0][dir]=desc
//! &filter[logic]=and&filter[filters][0][field]=unitPrice
//! &filter[filters][0][operator]=gt&filter[filters][0][value]=10
//! ```
//!
//! Keys are parsed into a tree first and the tree is then read into the
//! typed request. JSON bodies skip the tree and go straight through serde.

use std::collections::BTreeMap;
use std::str::FromStr;

use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header,
};
use serde_json::Value;
use thiserror::Error;

use super::request::{
    AggregateDescriptor, CompositeFilter, DataSourceRequest, FilterCondition, FilterDescriptor,
    GroupDescriptor, SortDescriptor,
};
use crate::error::GridError;

#[derive(Debug, Error)]
pub enum BindError {
    #[error("malformed parameter name '{key}'")]
    MalformedKey { key: String },

    #[error("parameter '{key}' is used both as a value and as a container")]
    ConflictingKey { key: String },

    #[error("parameter '{key}' expects a number, got '{value}'")]
    InvalidNumber { key: String, value: String },

    #[error("parameter '{key}' has unsupported value '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("parameter '{key}' is required")]
    MissingField { key: String },

    #[error("parameter '{key}' must be an indexed list")]
    ExpectedList { key: String },

    #[error("invalid JSON body: {0}")]
    Json(String),

    #[error("failed to read request body: {0}")]
    Body(String),
}

type BindResult<T> = std::result::Result<T, BindError>;

#[derive(Debug, Clone, PartialEq)]
enum FormNode {
    Leaf(String),
    Branch(BTreeMap<String, FormNode>),
}

/// Deepest key accepted, in segments. `filter[filters][0][filters][0][field]`
/// is six; anything near the limit is not a real grid request.
const MAX_KEY_DEPTH: usize = 32;

/// Splits `filter[filters][0].field` into `["filter", "filters", "0", "field"]`.
///
/// List items need explicit indices: `sort[]` is rejected.
fn split_key(key: &str) -> BindResult<Vec<String>> {
    let malformed = || BindError::MalformedKey { key: key.to_string() };

    let head_end = key.find(['[', '.']).unwrap_or(key.len());
    let head = &key[..head_end];
    if head.is_empty() {
        return Err(malformed());
    }

    let mut segments = vec![head.to_string()];
    let mut rest = &key[head_end..];
    while !rest.is_empty() {
        if segments.len() >= MAX_KEY_DEPTH {
            return Err(malformed());
        }
        if let Some(inner) = rest.strip_prefix('[') {
            let close = inner.find(']').ok_or_else(malformed)?;
            if close == 0 {
                return Err(malformed());
            }
            segments.push(inner[..close].to_string());
            rest = &inner[close + 1..];
        } else if let Some(inner) = rest.strip_prefix('.') {
            let end = inner.find(['[', '.']).unwrap_or(inner.len());
            if end == 0 {
                return Err(malformed());
            }
            segments.push(inner[..end].to_string());
            rest = &inner[end..];
        } else {
            return Err(malformed());
        }
    }
    Ok(segments)
}

fn insert(tree: &mut BTreeMap<String, FormNode>, key: &str, path: &[String], value: String) -> BindResult<()> {
    let conflict = || BindError::ConflictingKey { key: key.to_string() };

    let Some((head, rest)) = path.split_first() else {
        return Err(BindError::MalformedKey { key: key.to_string() });
    };

    let head = head.clone();
    if rest.is_empty() {
        return match tree.get(&head) {
            Some(FormNode::Branch(_)) => Err(conflict()),
            _ => {
                tree.insert(head, FormNode::Leaf(value));
                Ok(())
            }
        };
    }

    match tree
        .entry(head)
        .or_insert_with(|| FormNode::Branch(BTreeMap::new()))
    {
        FormNode::Branch(children) => insert(children, key, rest, value),
        FormNode::Leaf(_) => Err(conflict()),
    }
}

fn parse_tree(body: &[u8]) -> BindResult<BTreeMap<String, FormNode>> {
    let mut tree = BTreeMap::new();
    for (key, value) in url::form_urlencoded::parse(body) {
        let path = split_key(&key)?;
        insert(&mut tree, &key, &path, value.into_owned())?;
    }
    Ok(tree)
}

/// Reads a form tree into its typed form, tracking the dotted key for errors.
struct Reader<'a> {
    node: &'a BTreeMap<String, FormNode>,
    prefix: String,
}

impl<'a> Reader<'a> {
    fn new(node: &'a BTreeMap<String, FormNode>, prefix: String) -> Self {
        Self { node, prefix }
    }

    fn key(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}[{}]", self.prefix, name)
        }
    }

    fn leaf(&self, name: &str) -> BindResult<Option<&'a str>> {
        match self.node.get(name) {
            None => Ok(None),
            Some(FormNode::Leaf(value)) => Ok(Some(value.as_str())),
            Some(FormNode::Branch(_)) => Err(BindError::ConflictingKey { key: self.key(name) }),
        }
    }

    fn branch(&self, name: &str) -> BindResult<Option<Reader<'a>>> {
        match self.node.get(name) {
            None => Ok(None),
            Some(FormNode::Branch(children)) => Ok(Some(Reader::new(children, self.key(name)))),
            // An empty `filter=` or `sort=` means "none".
            Some(FormNode::Leaf(value)) if value.is_empty() => Ok(None),
            Some(FormNode::Leaf(_)) => Err(BindError::ConflictingKey { key: self.key(name) }),
        }
    }

    fn required(&self, name: &str) -> BindResult<&'a str> {
        self.leaf(name)?
            .ok_or_else(|| BindError::MissingField { key: self.key(name) })
    }

    fn number(&self, name: &str) -> BindResult<Option<usize>> {
        match self.leaf(name)? {
            None | Some("") => Ok(None),
            Some(raw) => raw.trim().parse().map(Some).map_err(|_| BindError::InvalidNumber {
                key: self.key(name),
                value: raw.to_string(),
            }),
        }
    }

    fn parsed<T: FromStr>(&self, name: &str) -> BindResult<Option<T>> {
        match self.leaf(name)? {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse().map(Some).map_err(|_| BindError::InvalidValue {
                key: self.key(name),
                value: raw.to_string(),
            }),
        }
    }

    fn required_parsed<T: FromStr>(&self, name: &str) -> BindResult<T> {
        self.parsed(name)?
            .ok_or_else(|| BindError::MissingField { key: self.key(name) })
    }

    /// Children of an indexed list, in numeric index order.
    fn list(&self, name: &str) -> BindResult<Vec<Reader<'a>>> {
        let Some(list) = self.branch(name)? else {
            return Ok(Vec::new());
        };

        let mut items = Vec::with_capacity(list.node.len());
        for (index, child) in list.node {
            let position: usize = index
                .parse()
                .map_err(|_| BindError::ExpectedList { key: list.prefix.clone() })?;
            let FormNode::Branch(fields) = child else {
                return Err(BindError::ConflictingKey { key: list.key(index) });
            };
            items.push((position, Reader::new(fields, list.key(index))));
        }
        items.sort_by_key(|(position, _)| *position);
        Ok(items.into_iter().map(|(_, reader)| reader).collect())
    }

    fn sort(&self) -> BindResult<SortDescriptor> {
        Ok(SortDescriptor {
            field: self.required("field")?.to_string(),
            dir: self.parsed("dir")?.unwrap_or_default(),
        })
    }

    fn aggregate(&self) -> BindResult<AggregateDescriptor> {
        Ok(AggregateDescriptor {
            field: self.required("field")?.to_string(),
            aggregate: self.required_parsed("aggregate")?,
        })
    }

    fn group(&self) -> BindResult<GroupDescriptor> {
        Ok(GroupDescriptor {
            field: self.required("field")?.to_string(),
            dir: self.parsed("dir")?.unwrap_or_default(),
            aggregates: self
                .list("aggregates")?
                .iter()
                .map(Reader::aggregate)
                .collect::<BindResult<_>>()?,
        })
    }

    fn filter(&self) -> BindResult<FilterDescriptor> {
        if self.node.contains_key("filters") || self.node.contains_key("logic") {
            return Ok(FilterDescriptor::Composite(CompositeFilter {
                logic: self.parsed("logic")?.unwrap_or_default(),
                filters: self
                    .list("filters")?
                    .iter()
                    .map(Reader::filter)
                    .collect::<BindResult<_>>()?,
            }));
        }

        let mut condition = FilterCondition::new(
            self.required("field")?,
            self.required_parsed("operator")?,
            self.leaf("value")?
                .map_or(Value::Null, |raw| Value::String(raw.to_string())),
        );
        if let Some(ignore_case) = self.parsed::<bool>("ignoreCase")? {
            condition.ignore_case = ignore_case;
        }
        Ok(FilterDescriptor::Condition(condition))
    }

    fn request(&self) -> BindResult<DataSourceRequest> {
        Ok(DataSourceRequest {
            page: self.number("page")?,
            page_size: self.number("pageSize")?,
            skip: self.number("skip")?,
            take: self.number("take")?,
            sort: self.list("sort")?.iter().map(Reader::sort).collect::<BindResult<_>>()?,
            filter: self.branch("filter")?.map(|filter| filter.filter()).transpose()?,
            group: self.list("group")?.iter().map(Reader::group).collect::<BindResult<_>>()?,
            aggregate: self
                .list("aggregate")?
                .iter()
                .map(Reader::aggregate)
                .collect::<BindResult<_>>()?,
        })
    }
}

impl DataSourceRequest {
    /// Binds a url-encoded form body or query string. Unrecognised top-level
    /// parameters are ignored.
    pub fn from_form(body: &[u8]) -> BindResult<Self> {
        let tree = parse_tree(body)?;
        Reader::new(&tree, String::new()).request()
    }

    pub fn from_json(body: &[u8]) -> BindResult<Self> {
        serde_json::from_slice(body).map_err(|e| BindError::Json(e.to_string()))
    }
}

impl<S> FromRequest<S> for DataSourceRequest
where
    S: Send + Sync,
{
    type Rejection = GridError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"));

        if is_json {
            let Json(request) = Json::<DataSourceRequest>::from_request(req, state)
                .await
                .map_err(|rejection| BindError::Json(rejection.body_text()))?;
            return Ok(request);
        }

        let query = req.uri().query().map(str::to_owned);
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| BindError::Body(rejection.body_text()))?;

        let request = if body.is_empty() {
            Self::from_form(query.as_deref().unwrap_or_default().as_bytes())?
        } else {
            Self::from_form(&body)?
        };
        Ok(request)
    }
}
