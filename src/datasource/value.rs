//! Field access and ordering over JSON records.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Looks up a possibly dotted field path (`category.name`) in a record.
/// Missing fields resolve to `None`.
pub fn field<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(record, |current, segment| current.get(segment))
}

/// Value of a field with missing fields treated as null.
pub fn field_or_null<'a>(record: &'a Value, path: &str) -> &'a Value {
    field(record, path).unwrap_or(&Value::Null)
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Total order used for sorting and min/max.
///
/// Values of different JSON types order by type
/// (null < bool < number < string < array < object).
pub fn compare(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => x
            .iter()
            .zip(y.iter())
            .map(|(x, y)| compare(x, y))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| x.len().cmp(&y.len())),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// Parses ISO-8601 dates and date-times into a comparable instant.
fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.naive_utc());
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(parsed);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn bool_from(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

fn number_from(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Renders scalars as text for string operators; null renders empty.
pub fn as_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Compares a record value against a filter operand.
///
/// The operand is coerced to the record value's type, since form-bound
/// operands always arrive as strings. Returns `None` when the two cannot be
/// ordered (for example a number against non-numeric text, or null against
/// anything but null).
pub fn compare_operand(record: &Value, operand: &Value, ignore_case: bool) -> Option<Ordering> {
    match record {
        Value::Null => operand.is_null().then_some(Ordering::Equal),
        _ if operand.is_null() => None,
        Value::Number(n) => {
            let left = n.as_f64()?;
            let right = number_from(operand)?;
            left.partial_cmp(&right)
        }
        Value::Bool(b) => bool_from(operand).map(|right| b.cmp(&right)),
        Value::String(left) => {
            let right = as_text(operand);
            if let (Some(l), Some(r)) = (parse_datetime(left), parse_datetime(&right)) {
                return Some(l.cmp(&r));
            }
            if ignore_case {
                Some(left.to_lowercase().cmp(&right.to_lowercase()))
            } else {
                Some(left.as_str().cmp(right.as_str()))
            }
        }
        other => (other == operand).then_some(Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dotted_paths_resolve_nested_fields() {
        let record = json!({ "category": { "name": "Beverages" }, "id": 1 });
        assert_eq!(field(&record, "category.name"), Some(&json!("Beverages")));
        assert_eq!(field(&record, "category.missing"), None);
        assert_eq!(field_or_null(&record, "nope"), &Value::Null);
    }

    #[test]
    fn ordering_ranks_types_then_values() {
        assert_eq!(compare(&Value::Null, &json!(false)), Ordering::Less);
        assert_eq!(compare(&json!(2), &json!(10)), Ordering::Less);
        assert_eq!(compare(&json!(2.5), &json!(2)), Ordering::Greater);
        assert_eq!(compare(&json!("b"), &json!("a")), Ordering::Greater);
        assert_eq!(compare(&json!(100), &json!("1")), Ordering::Less);
    }

    #[test]
    fn string_operands_coerce_to_record_type() {
        assert_eq!(compare_operand(&json!(18.0), &json!("18"), true), Some(Ordering::Equal));
        assert_eq!(compare_operand(&json!(5), &json!("ten"), true), None);
        assert_eq!(compare_operand(&json!(true), &json!("TRUE"), true), Some(Ordering::Equal));
        assert_eq!(compare_operand(&json!("Chai"), &json!("chai"), true), Some(Ordering::Equal));
        assert_eq!(compare_operand(&json!("Chai"), &json!("chai"), false), Some(Ordering::Less));
    }

    #[test]
    fn dates_compare_chronologically() {
        let ordering = compare_operand(
            &json!("1996-07-04T00:00:00Z"),
            &json!("1996-07-04T02:00:00+02:00"),
            true,
        );
        assert_eq!(ordering, Some(Ordering::Equal));
        assert_eq!(
            compare_operand(&json!("1996-07-04"), &json!("1996-12-01"), true),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn null_only_equals_null() {
        assert_eq!(compare_operand(&Value::Null, &Value::Null, true), Some(Ordering::Equal));
        assert_eq!(compare_operand(&Value::Null, &json!(1), true), None);
        assert_eq!(compare_operand(&json!(1), &Value::Null, true), None);
    }
}
