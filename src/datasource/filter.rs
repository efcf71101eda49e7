use std::cmp::Ordering;

use serde_json::Value;

use super::request::{CompositeFilter, FilterCondition, FilterDescriptor, FilterLogic, FilterOperator};
use super::value;

impl FilterDescriptor {
    pub fn matches(&self, record: &Value) -> bool {
        match self {
            FilterDescriptor::Composite(composite) => composite.matches(record),
            FilterDescriptor::Condition(condition) => condition.matches(record),
        }
    }
}

impl CompositeFilter {
    /// An empty composite places no constraint, whatever its logic.
    pub fn matches(&self, record: &Value) -> bool {
        if self.filters.is_empty() {
            return true;
        }
        match self.logic {
            FilterLogic::And => self.filters.iter().all(|filter| filter.matches(record)),
            FilterLogic::Or => self.filters.iter().any(|filter| filter.matches(record)),
        }
    }
}

impl FilterCondition {
    pub fn matches(&self, record: &Value) -> bool {
        let actual = value::field_or_null(record, &self.field);
        let ordering = || value::compare_operand(actual, &self.value, self.ignore_case);

        match self.operator {
            FilterOperator::Eq => ordering() == Some(Ordering::Equal),
            FilterOperator::Neq => ordering() != Some(Ordering::Equal),
            FilterOperator::Lt => ordering() == Some(Ordering::Less),
            FilterOperator::Lte => matches!(ordering(), Some(Ordering::Less | Ordering::Equal)),
            FilterOperator::Gt => ordering() == Some(Ordering::Greater),
            FilterOperator::Gte => matches!(ordering(), Some(Ordering::Greater | Ordering::Equal)),
            FilterOperator::StartsWith => self.text_test(actual, |haystack, needle| haystack.starts_with(needle)),
            FilterOperator::EndsWith => self.text_test(actual, |haystack, needle| haystack.ends_with(needle)),
            FilterOperator::Contains => self.text_test(actual, |haystack, needle| haystack.contains(needle)),
            FilterOperator::DoesNotContain => {
                !self.text_test(actual, |haystack, needle| haystack.contains(needle))
            }
            FilterOperator::IsNull => actual.is_null(),
            FilterOperator::IsNotNull => !actual.is_null(),
            FilterOperator::IsEmpty => actual.as_str() == Some(""),
            FilterOperator::IsNotEmpty => actual.as_str() != Some(""),
        }
    }

    fn text_test(&self, actual: &Value, test: impl Fn(&str, &str) -> bool) -> bool {
        let haystack = value::as_text(actual);
        let needle = value::as_text(&self.value);
        if self.ignore_case {
            test(&haystack.to_lowercase(), &needle.to_lowercase())
        } else {
            test(&haystack, &needle)
        }
    }
}
