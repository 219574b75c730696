use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{format_scalar, split_result};

/// Summary fields as a two-column table, followed by one table per row list
/// (yearly breakdown, amortization schedule) and any warnings.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) if map.contains_key("result") => {
            let result = &map["result"];
            let (scalars, lists) = split_result(result);

            if !scalars.is_empty() {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                for (key, val) in &scalars {
                    builder.push_record([key.clone(), format_scalar(val)]);
                }
                println!("{}", Table::from(builder));
            }

            for (name, rows) in lists {
                println!("\n{}:", name);
                print_rows(rows);
            }

            if let Some(Value::Array(warnings)) = map.get("warnings") {
                if !warnings.is_empty() {
                    println!("\nWarnings:");
                    for w in warnings.iter().filter_map(Value::as_str) {
                        println!("  - {}", w);
                    }
                }
            }

            if let Some(Value::String(meth)) = map.get("methodology") {
                println!("\nMethodology: {}", meth);
            }
        }
        Value::Array(rows) => print_rows(rows),
        _ => println!("{}", value),
    }
}

fn print_rows(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        println!("(empty)");
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for row in rows {
        if let Value::Object(map) = row {
            builder.push_record(
                headers
                    .iter()
                    .map(|h| map.get(h).map(format_scalar).unwrap_or_default()),
            );
        }
    }
    println!("{}", Table::from(builder));
}
