//! Compound growth with a fixed monthly contribution.
//!
//! Each month the balance first earns `annual_return_percent / 12` and then
//! receives the contribution (end-of-month deposit). The year-by-year
//! breakdown is rebuilt from the inputs on every call.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinCalcError;
use crate::types::{monthly_rate, with_metadata, ComputationOutput, Money, Percent, MONTHS_PER_YEAR};
use crate::validation::validate_investment;
use crate::FinCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Investment calculator inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentParameters {
    pub initial_amount: Money,
    pub monthly_contribution: Money,
    /// Expected annual return in percent (7 = 7%).
    pub annual_return_percent: Percent,
    pub years: u32,
}

/// Balance snapshot at the end of one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyBreakdown {
    pub year: u32,
    pub balance: Money,
    pub cumulative_contributions: Money,
    pub cumulative_earnings: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentResult {
    pub final_amount: Money,
    pub total_contributions: Money,
    pub total_earnings: Money,
    pub yearly_breakdown: Vec<YearlyBreakdown>,
}

/// Breakdowns longer than this are grown on demand rather than pre-sized.
const BREAKDOWN_PRESIZE_LIMIT: u32 = 100;

fn overflow(context: &str) -> FinCalcError {
    FinCalcError::Overflow {
        context: context.into(),
    }
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Project the balance of a recurring-contribution investment.
pub fn compute_growth(
    initial_amount: Money,
    monthly_contribution: Money,
    annual_return_percent: Percent,
    years: u32,
) -> FinCalcResult<InvestmentResult> {
    let growth = Decimal::ONE + monthly_rate(annual_return_percent);
    let annual_contribution = monthly_contribution
        .checked_mul(Decimal::from(MONTHS_PER_YEAR))
        .ok_or_else(|| overflow("annual contribution"))?;

    let mut balance = initial_amount;
    let mut yearly_breakdown = Vec::with_capacity(years.min(BREAKDOWN_PRESIZE_LIMIT) as usize);

    for year in 1..=years {
        for _ in 0..MONTHS_PER_YEAR {
            balance = balance
                .checked_mul(growth)
                .and_then(|b| b.checked_add(monthly_contribution))
                .ok_or_else(|| overflow("investment balance"))?;
        }

        let cumulative_contributions = annual_contribution
            .checked_mul(Decimal::from(year))
            .and_then(|c| c.checked_add(initial_amount))
            .ok_or_else(|| overflow("cumulative contributions"))?;

        yearly_breakdown.push(YearlyBreakdown {
            year,
            balance,
            cumulative_contributions,
            cumulative_earnings: balance - cumulative_contributions,
        });
    }

    let total_contributions = annual_contribution
        .checked_mul(Decimal::from(years))
        .and_then(|c| c.checked_add(initial_amount))
        .ok_or_else(|| overflow("total contributions"))?;

    Ok(InvestmentResult {
        final_amount: balance,
        total_contributions,
        total_earnings: balance - total_contributions,
        yearly_breakdown,
    })
}

/// Validate, compute, and wrap an investment projection in the standard envelope.
pub fn calculate_investment(
    params: &InvestmentParameters,
) -> FinCalcResult<ComputationOutput<InvestmentResult>> {
    let start = Instant::now();
    validate_investment(params)?;

    let result = compute_growth(
        params.initial_amount,
        params.monthly_contribution,
        params.annual_return_percent,
        params.years,
    )?;

    let mut warnings = Vec::new();
    if result.total_earnings > result.total_contributions {
        warnings.push(
            "Projected earnings exceed contributions; results assume a constant return every month"
                .to_string(),
        );
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Monthly compounding, contribution credited after each month's growth",
        params,
        warnings,
        elapsed,
        result,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_one_year_end_of_month_deposits() {
        let r = compute_growth(dec!(10_000), dec!(500), dec!(7), 1).unwrap();
        assert_eq!(r.yearly_breakdown.len(), 1);
        // 10_000 * (1 + 7/1200)^12 + 500 * annuity factor ≈ 16_919.19
        assert!((r.final_amount - dec!(16_919.19)).abs() < dec!(0.01));
        assert_eq!(r.total_contributions, dec!(16_000));
    }

    #[test]
    fn test_breakdown_is_ascending_and_consistent() {
        let r = compute_growth(dec!(10_000), dec!(500), dec!(7), 20).unwrap();
        assert_eq!(r.yearly_breakdown.len(), 20);

        for (i, entry) in r.yearly_breakdown.iter().enumerate() {
            assert_eq!(entry.year, i as u32 + 1);
            assert_eq!(
                entry.cumulative_earnings + entry.cumulative_contributions,
                entry.balance
            );
        }

        let last = r.yearly_breakdown.last().unwrap();
        assert_eq!(last.balance, r.final_amount);
        assert_eq!(last.cumulative_contributions, r.total_contributions);
        assert_eq!(r.total_earnings, r.final_amount - r.total_contributions);
    }

    #[test]
    fn test_no_contributions_is_pure_compounding() {
        // 12% annual => 1% per month, 12 months
        let r = compute_growth(dec!(1_000), Decimal::ZERO, dec!(12), 1).unwrap();
        let mut expected = dec!(1_000);
        for _ in 0..12 {
            expected *= dec!(1.01);
        }
        assert!((r.final_amount - expected).abs() < dec!(0.000001));
        assert_eq!(r.total_contributions, dec!(1_000));
    }

    #[test]
    fn test_higher_contribution_never_lowers_final_amount() {
        let mut previous = Decimal::MIN;
        for contribution in [0, 100, 250, 500, 1_000, 5_000] {
            let r = compute_growth(dec!(5_000), Decimal::from(contribution), dec!(6), 10).unwrap();
            assert!(r.final_amount >= previous);
            previous = r.final_amount;
        }
    }

    #[test]
    fn test_runaway_projection_reports_overflow() {
        let r = compute_growth(dec!(1_000_000_000), dec!(1_000), dec!(1_000), 100);
        assert!(matches!(r, Err(FinCalcError::Overflow { .. })));
    }

    #[test]
    fn test_huge_contribution_reports_overflow() {
        let r = compute_growth(dec!(0), Decimal::MAX, dec!(5), 1);
        assert!(matches!(r, Err(FinCalcError::Overflow { .. })));
    }

    #[test]
    fn test_calculate_investment_warns_when_earnings_dominate() {
        let params = InvestmentParameters {
            initial_amount: dec!(10_000),
            monthly_contribution: dec!(500),
            annual_return_percent: dec!(7),
            years: 40,
        };
        let out = calculate_investment(&params).unwrap();
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.result.yearly_breakdown.len(), 40);
    }
}
