use colored::Colorize;
use serde_json::Value;
use std::io;

use super::split_result;

/// Write output as CSV to stdout, reporting any write failure on stderr.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_csv(stdout.lock(), value) {
        eprintln!("{}: failed to write CSV output: {}", "error".red().bold(), e);
    }
}

/// A result carrying a row list (yearly breakdown, schedule) is written as
/// that table; otherwise the summary is written as `field,value` pairs.
/// Values keep full decimal precision.
pub(crate) fn write_csv<W: io::Write>(out: W, value: &Value) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    match value {
        Value::Object(map) if map.contains_key("result") => {
            let (scalars, lists) = split_result(&map["result"]);
            if let Some((_, rows)) = lists.first() {
                write_rows(&mut wtr, rows)?;
            } else {
                wtr.write_record(["field", "value"])?;
                for (key, val) in scalars {
                    wtr.write_record([key.as_str(), &csv_value(val)])?;
                }
            }
        }
        Value::Array(rows) => write_rows(&mut wtr, rows)?,
        _ => wtr.write_record([&csv_value(value)])?,
    }

    wtr.flush()?;
    Ok(())
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = rows.first() else {
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    wtr.write_record(&headers)?;
    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(csv_value).unwrap_or_default())
                .collect();
            wtr.write_record(&record)?;
        }
    }
    Ok(())
}

fn csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
