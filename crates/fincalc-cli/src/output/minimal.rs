use serde_json::Value;

use super::format_scalar;

/// Headline figure for each calculator, in priority order.
const HEADLINE_KEYS: [&str; 4] = [
    "total_monthly_payment",
    "monthly_payment",
    "final_amount",
    "monthlyPayment",
];

/// Print just the headline number, rounded to cents.
pub fn print_minimal(value: &Value) {
    let result = value.get("result").unwrap_or(value);
    // Schedule output nests the loan figures under `summary`.
    let result = result.get("summary").unwrap_or(result);

    let target = match result {
        Value::Array(rows) => rows.first().unwrap_or(result),
        _ => result,
    };

    for key in HEADLINE_KEYS {
        if let Some(val) = target.get(key).filter(|v| !v.is_null()) {
            println!("{}", format_scalar(val));
            return;
        }
    }

    println!("{}", format_scalar(target));
}
