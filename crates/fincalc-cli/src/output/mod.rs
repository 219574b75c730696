pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Split a result object into its scalar fields and its row-list fields
/// (`yearly_breakdown`, `schedule`, ...). Nested objects are flattened one level.
pub(crate) fn split_result(result: &Value) -> (Vec<(String, &Value)>, Vec<(String, &[Value])>) {
    let mut scalars = Vec::new();
    let mut lists = Vec::new();

    if let Value::Object(map) = result {
        for (key, val) in map {
            match val {
                Value::Array(rows) => lists.push((key.clone(), rows.as_slice())),
                Value::Object(inner) => {
                    for (inner_key, inner_val) in inner {
                        scalars.push((format!("{key}.{inner_key}"), inner_val));
                    }
                }
                _ => scalars.push((key.clone(), val)),
            }
        }
    }

    (scalars, lists)
}

/// Render a scalar for human-facing formats: decimals are shown to cents.
pub(crate) fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => match s.parse::<rust_decimal::Decimal>() {
            Ok(d) if d.scale() > 2 => d.round_dp(2).to_string(),
            _ => s.clone(),
        },
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split_result_separates_rows() {
        let result = json!({
            "final_amount": "16919.1934",
            "yearly_breakdown": [{"year": 1, "balance": "16919.1934"}],
            "summary": {"monthly_payment": "477.53"}
        });
        let (scalars, lists) = split_result(&result);
        let keys: Vec<&str> = scalars.iter().map(|(k, _)| k.as_str()).collect();
        assert!(keys.contains(&"final_amount"));
        assert!(keys.contains(&"summary.monthly_payment"));
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].0, "yearly_breakdown");
    }

    #[test]
    fn test_format_scalar_rounds_long_decimals() {
        assert_eq!(format_scalar(&json!("477.52905429")), "477.53");
        assert_eq!(format_scalar(&json!("100.5")), "100.5");
        assert_eq!(format_scalar(&json!("2025-01-01T00:00:00.000Z")), "2025-01-01T00:00:00.000Z");
        assert_eq!(format_scalar(&json!(5)), "5");
    }
}
