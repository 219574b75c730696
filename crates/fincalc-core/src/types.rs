use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates as entered on the calculator forms, in percent units (5.5 = 5.5%).
pub type Percent = Decimal;

/// Months in a year; every model compounds and pays monthly.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Convert an annual percentage into the monthly decimal rate used by the models.
pub fn monthly_rate(annual_percent: Percent) -> Decimal {
    annual_percent / Decimal::ONE_HUNDRED / Decimal::from(MONTHS_PER_YEAR)
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_rate_from_percent() {
        assert_eq!(monthly_rate(dec!(12)), dec!(0.01));
        assert_eq!(monthly_rate(dec!(6)), dec!(0.005));
    }

    #[test]
    fn test_envelope_carries_crate_version() {
        let out = with_metadata("test", &serde_json::json!({}), vec![], 7, dec!(1));
        assert_eq!(out.metadata.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(out.metadata.computation_time_us, 7);
        assert_eq!(out.result, dec!(1));
    }
}
