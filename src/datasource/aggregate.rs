use std::collections::BTreeMap;

use serde_json::{Value, json};

use super::request::{AggregateDescriptor, AggregateFunction};
use super::value;

/// `{ field: { function: value } }`, as the grid widget reads it.
pub type Aggregates = BTreeMap<String, BTreeMap<String, Value>>;

pub fn calculate(records: &[&Value], descriptors: &[AggregateDescriptor]) -> Aggregates {
    let mut aggregates = Aggregates::new();
    for descriptor in descriptors {
        let result = evaluate(records, &descriptor.field, descriptor.aggregate);
        aggregates
            .entry(descriptor.field.clone())
            .or_default()
            .insert(descriptor.aggregate.to_string(), result);
    }
    aggregates
}

fn evaluate(records: &[&Value], field: &str, function: AggregateFunction) -> Value {
    let values = records.iter().map(|record| value::field_or_null(record, field));

    match function {
        AggregateFunction::Count => json!(records.len()),
        AggregateFunction::Sum => json!(values.filter_map(Value::as_f64).sum::<f64>()),
        AggregateFunction::Average => {
            let numbers: Vec<f64> = values.filter_map(Value::as_f64).collect();
            if numbers.is_empty() {
                Value::Null
            } else {
                json!(numbers.iter().sum::<f64>() / numbers.len() as f64)
            }
        }
        AggregateFunction::Min => values
            .filter(|v| !v.is_null())
            .min_by(|a, b| value::compare(a, b))
            .cloned()
            .unwrap_or(Value::Null),
        AggregateFunction::Max => values
            .filter(|v| !v.is_null())
            .max_by(|a, b| value::compare(a, b))
            .cloned()
            .unwrap_or(Value::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(field: &str, aggregate: AggregateFunction) -> AggregateDescriptor {
        AggregateDescriptor {
            field: field.to_string(),
            aggregate,
        }
    }

    #[test]
    fn computes_every_function_per_field() {
        let rows = [
            json!({ "price": 10.0, "name": "b" }),
            json!({ "price": 20.0, "name": "a" }),
            json!({ "price": null, "name": "c" }),
        ];
        let refs: Vec<&Value> = rows.iter().collect();

        let aggregates = calculate(
            &refs,
            &[
                descriptor("price", AggregateFunction::Count),
                descriptor("price", AggregateFunction::Sum),
                descriptor("price", AggregateFunction::Average),
                descriptor("price", AggregateFunction::Min),
                descriptor("name", AggregateFunction::Max),
            ],
        );

        let price = &aggregates["price"];
        assert_eq!(price["count"], json!(3));
        assert_eq!(price["sum"], json!(30.0));
        assert_eq!(price["average"], json!(15.0));
        assert_eq!(price["min"], json!(10.0));
        assert_eq!(aggregates["name"]["max"], json!("c"));
    }

    #[test]
    fn empty_input_yields_nulls() {
        let aggregates = calculate(
            &[],
            &[
                descriptor("price", AggregateFunction::Average),
                descriptor("price", AggregateFunction::Max),
                descriptor("price", AggregateFunction::Count),
            ],
        );
        assert_eq!(aggregates["price"]["average"], Value::Null);
        assert_eq!(aggregates["price"]["max"], Value::Null);
        assert_eq!(aggregates["price"]["count"], json!(0));
    }
}
