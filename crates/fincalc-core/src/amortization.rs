//! Fixed-rate installment loans: level monthly payment, totals, and the
//! month-by-month amortization schedule.
//!
//! Shared by the loan calculator and the mortgage composite model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinCalcError;
use crate::types::{monthly_rate, with_metadata, ComputationOutput, Money, Percent, MONTHS_PER_YEAR};
use crate::validation::validate_loan;
use crate::FinCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Loan calculator inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    pub principal: Money,
    /// Annual interest rate in percent (5.5 = 5.5%).
    pub annual_rate_percent: Percent,
    pub term_years: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    pub monthly_payment: Money,
    pub total_interest: Money,
    pub total_payment: Money,
}

/// A single month of the amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationPeriod {
    pub period: u32,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    pub remaining_balance: Money,
}

/// Loan result together with its full monthly schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanScheduleOutput {
    pub summary: LoanResult,
    pub schedule: Vec<AmortizationPeriod>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Compute (1 + r)^-n via iterative multiplication (avoids Decimal::powd drift).
///
/// Working with the discount factor keeps the value in (0, 1], so large rates
/// and long terms cannot overflow the decimal range.
/// Schedules longer than this are grown on demand rather than pre-sized.
const SCHEDULE_PRESIZE_LIMIT: u32 = 1_200;

/// Number of monthly payments over `term_years`.
pub(crate) fn payment_count(term_years: u32) -> FinCalcResult<u32> {
    term_years
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or_else(|| FinCalcError::Overflow {
            context: "number of monthly payments".into(),
        })
}

fn discount_factor(rate: Decimal, n: u32) -> Decimal {
    let v = Decimal::ONE / (Decimal::ONE + rate);
    let mut result = Decimal::ONE;
    for _ in 0..n {
        result *= v;
    }
    result
}

/// Level payment that retires `principal` over `n` months at `rate` per month.
///
/// Equivalent to P·r·(1+r)^n / ((1+r)^n − 1). A rate too small to move the
/// discount factor falls back to straight-line repayment.
pub(crate) fn level_payment(principal: Money, rate: Decimal, n: u32) -> FinCalcResult<Money> {
    if n == 0 {
        return Err(FinCalcError::InvalidInput {
            field: "term_years".into(),
            reason: "Number of payments must be > 0".into(),
        });
    }

    let periods = Decimal::from(n);
    if rate.is_zero() {
        return Ok(principal / periods);
    }

    let annuity_denominator = Decimal::ONE - discount_factor(rate, n);
    if annuity_denominator.is_zero() {
        return Ok(principal / periods);
    }

    principal
        .checked_mul(rate)
        .and_then(|x| x.checked_div(annuity_denominator))
        .ok_or_else(|| FinCalcError::Overflow {
            context: "level payment".into(),
        })
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Monthly payment, total paid and total interest for a fixed-rate loan.
///
/// Callers are expected to have run [`validate_loan`] first; the function
/// itself only guards the arithmetic.
pub fn compute_amortization(
    principal: Money,
    annual_rate_percent: Percent,
    term_years: u32,
) -> FinCalcResult<LoanResult> {
    let n = payment_count(term_years)?;
    let monthly_payment = level_payment(principal, monthly_rate(annual_rate_percent), n)?;

    let total_payment = monthly_payment
        .checked_mul(Decimal::from(n))
        .ok_or_else(|| FinCalcError::Overflow {
            context: "total loan payment".into(),
        })?;
    let total_interest = total_payment - principal;

    Ok(LoanResult {
        monthly_payment,
        total_interest,
        total_payment,
    })
}

/// Month-by-month split of each payment into interest and principal.
///
/// Interest is charged on the opening balance of each month. The last period
/// pays off whatever balance remains so the schedule closes at exactly zero.
pub fn amortization_schedule(params: &LoanParameters) -> FinCalcResult<Vec<AmortizationPeriod>> {
    let n = payment_count(params.term_years)?;
    let rate = monthly_rate(params.annual_rate_percent);
    let payment = level_payment(params.principal, rate, n)?;

    let mut schedule = Vec::with_capacity(n.min(SCHEDULE_PRESIZE_LIMIT) as usize);
    let mut balance = params.principal;

    for period in 1..=n {
        let interest = balance * rate;
        let (principal_paid, paid) = if period == n {
            (balance, balance + interest)
        } else {
            (payment - interest, payment)
        };
        balance -= principal_paid;

        schedule.push(AmortizationPeriod {
            period,
            payment: paid,
            interest,
            principal: principal_paid,
            remaining_balance: balance,
        });
    }

    Ok(schedule)
}

/// Validate, compute, and wrap a loan calculation in the standard envelope.
pub fn calculate_loan(params: &LoanParameters) -> FinCalcResult<ComputationOutput<LoanResult>> {
    let start = Instant::now();
    validate_loan(params)?;

    let result = compute_amortization(params.principal, params.annual_rate_percent, params.term_years)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-rate annuity: P·r·(1+r)^n / ((1+r)^n − 1), monthly compounding",
        params,
        Vec::new(),
        elapsed,
        result,
    ))
}

/// Like [`calculate_loan`] but also returns the monthly amortization schedule.
pub fn calculate_loan_schedule(
    params: &LoanParameters,
) -> FinCalcResult<ComputationOutput<LoanScheduleOutput>> {
    let start = Instant::now();
    validate_loan(params)?;

    let summary = compute_amortization(params.principal, params.annual_rate_percent, params.term_years)?;
    let schedule = amortization_schedule(params)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-rate annuity with monthly interest/principal split",
        params,
        Vec::new(),
        elapsed,
        LoanScheduleOutput { summary, schedule },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn default_params() -> LoanParameters {
        LoanParameters {
            principal: dec!(25_000),
            annual_rate_percent: dec!(5.5),
            term_years: 5,
        }
    }

    #[test]
    fn test_reference_loan_payment() {
        let r = compute_amortization(dec!(25_000), dec!(5.5), 5).unwrap();
        assert_eq!(r.monthly_payment.round_dp(2), dec!(477.53));
        assert!((r.total_payment - dec!(28_651.74)).abs() < dec!(0.01));
        assert!((r.total_interest - dec!(3_651.74)).abs() < dec!(0.01));
    }

    #[test]
    fn test_totals_are_exact_multiples_of_payment() {
        let r = compute_amortization(dec!(25_000), dec!(5.5), 5).unwrap();
        assert_eq!(r.total_payment, r.monthly_payment * dec!(60));
        assert_eq!(r.total_interest, r.total_payment - dec!(25_000));
    }

    #[test]
    fn test_thirty_year_mortgage_payment() {
        // 280k at 6.5% over 30 years: ~1769.79 per month
        let r = compute_amortization(dec!(280_000), dec!(6.5), 30).unwrap();
        assert!((r.monthly_payment - dec!(1769.79)).abs() < dec!(0.01));
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let r = compute_amortization(dec!(12_000), Decimal::ZERO, 1).unwrap();
        assert_eq!(r.monthly_payment, dec!(1_000));
        assert_eq!(r.total_interest, Decimal::ZERO);
    }

    #[test]
    fn test_very_high_rate_does_not_overflow() {
        let r = compute_amortization(dec!(10_000), dec!(900), 50).unwrap();
        // Payment converges to interest-only: P * r = 10_000 * 0.75
        assert!((r.monthly_payment - dec!(7_500)).abs() < dec!(0.01));
    }

    #[test]
    fn test_schedule_closes_at_zero() {
        let schedule = amortization_schedule(&default_params()).unwrap();
        assert_eq!(schedule.len(), 60);
        assert_eq!(schedule.last().unwrap().remaining_balance, Decimal::ZERO);

        let principal_paid: Decimal = schedule.iter().map(|p| p.principal).sum();
        assert!((principal_paid - dec!(25_000)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_schedule_interest_declines() {
        let schedule = amortization_schedule(&default_params()).unwrap();
        assert!(schedule[0].interest > schedule[59].interest);
        // First month interest: 25_000 * 0.055 / 12
        assert!((schedule[0].interest - dec!(114.58)).abs() < dec!(0.01));
    }

    #[test]
    fn test_calculate_loan_rejects_invalid() {
        let mut p = default_params();
        p.term_years = 0;
        assert!(matches!(
            calculate_loan(&p),
            Err(FinCalcError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_term_past_u32_months_reports_overflow() {
        let mut p = default_params();
        p.term_years = u32::MAX / MONTHS_PER_YEAR + 1;
        assert!(matches!(calculate_loan(&p), Err(FinCalcError::Overflow { .. })));
        assert!(matches!(
            calculate_loan_schedule(&p),
            Err(FinCalcError::Overflow { .. })
        ));
        assert_eq!(payment_count(30).unwrap(), 360);
    }

    #[test]
    fn test_calculate_loan_envelope() {
        let out = calculate_loan(&default_params()).unwrap();
        assert!(out.warnings.is_empty());
        assert_eq!(out.assumptions["term_years"], 5);
        assert_eq!(out.result.monthly_payment.round_dp(2), dec!(477.53));
    }
}
