//! Home mortgage estimate: principal and interest from the amortization
//! model, plus PMI, property tax and homeowner's insurance.
//!
//! PMI is a flat 0.5% of the loan amount per year whenever the down payment is
//! under 20% of the price, and it is charged for the whole term. Neither the
//! rate nor the drop-off at 20% equity is modelled.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{compute_amortization, payment_count};
use crate::error::FinCalcError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, MONTHS_PER_YEAR};
use crate::validation::validate_mortgage;
use crate::FinCalcResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Annual PMI premium as a fraction of the loan amount.
pub const PMI_ANNUAL_RATE: Decimal = dec!(0.005);

/// Down payment share (in percent) at or above which no PMI is charged.
pub const PMI_EXEMPT_DOWN_PAYMENT_PERCENT: Percent = dec!(20);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Mortgage calculator inputs. Tax and insurance default to zero when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageParameters {
    pub home_price: Money,
    pub down_payment: Money,
    pub term_years: u32,
    pub annual_rate_percent: Percent,
    #[serde(default)]
    pub annual_property_tax: Money,
    #[serde(default)]
    pub annual_insurance: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageResult {
    pub loan_amount: Money,
    pub down_payment_percent: Percent,
    pub monthly_principal_interest: Money,
    pub monthly_pmi: Money,
    pub monthly_property_tax: Money,
    pub monthly_insurance: Money,
    pub total_monthly_payment: Money,
    /// Interest over the term, excluding PMI.
    pub total_interest: Money,
    /// Principal, interest and PMI over the term; tax and insurance excluded.
    pub total_payment: Money,
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

pub fn compute_mortgage(params: &MortgageParameters) -> FinCalcResult<MortgageResult> {
    let months = Decimal::from(MONTHS_PER_YEAR);
    let n = Decimal::from(payment_count(params.term_years)?);
    if params.home_price.is_zero() {
        return Err(FinCalcError::InvalidInput {
            field: "home_price".into(),
            reason: "home_price must be > 0".into(),
        });
    }
    let loan_amount = params.home_price - params.down_payment;

    let loan = compute_amortization(loan_amount, params.annual_rate_percent, params.term_years)?;
    let monthly_principal_interest = loan.monthly_payment;
    let down_payment_percent = params.down_payment / params.home_price * Decimal::ONE_HUNDRED;

    let monthly_pmi = if down_payment_percent < PMI_EXEMPT_DOWN_PAYMENT_PERCENT {
        loan_amount * PMI_ANNUAL_RATE / months
    } else {
        Decimal::ZERO
    };

    let monthly_property_tax = params.annual_property_tax / months;
    let monthly_insurance = params.annual_insurance / months;
    let total_monthly_payment =
        monthly_principal_interest + monthly_pmi + monthly_property_tax + monthly_insurance;

    let principal_interest_total = loan.total_payment;
    let total_payment = principal_interest_total + monthly_pmi * n;
    let total_interest = principal_interest_total - loan_amount;

    Ok(MortgageResult {
        loan_amount,
        down_payment_percent,
        monthly_principal_interest,
        monthly_pmi,
        monthly_property_tax,
        monthly_insurance,
        total_monthly_payment,
        total_interest,
        total_payment,
    })
}

/// Validate, compute, and wrap a mortgage estimate in the standard envelope.
pub fn calculate_mortgage(
    params: &MortgageParameters,
) -> FinCalcResult<ComputationOutput<MortgageResult>> {
    let start = Instant::now();
    validate_mortgage(params)?;

    let result = compute_mortgage(params)?;

    let mut warnings = Vec::new();
    if !result.monthly_pmi.is_zero() {
        warnings.push(format!(
            "Down payment of {}% is below {}%; PMI is assumed for the full {}-year term",
            result.down_payment_percent.round_dp(2),
            PMI_EXEMPT_DOWN_PAYMENT_PERCENT,
            params.term_years,
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-rate amortization plus flat 0.5% PMI, property tax and insurance",
        params,
        warnings,
        elapsed,
        result,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn default_params() -> MortgageParameters {
        MortgageParameters {
            home_price: dec!(350_000),
            down_payment: dec!(70_000),
            term_years: 30,
            annual_rate_percent: dec!(6.5),
            annual_property_tax: dec!(3_500),
            annual_insurance: dec!(1_200),
        }
    }

    #[test]
    fn test_twenty_percent_down_has_no_pmi() {
        let r = compute_mortgage(&default_params()).unwrap();
        assert_eq!(r.down_payment_percent, dec!(20));
        assert_eq!(r.monthly_pmi, Decimal::ZERO);
        assert_eq!(r.loan_amount, dec!(280_000));
    }

    #[test]
    fn test_just_under_twenty_percent_pays_pmi() {
        let mut p = default_params();
        p.down_payment = dec!(69_996.5); // 19.999%
        let r = compute_mortgage(&p).unwrap();
        assert!(r.monthly_pmi > Decimal::ZERO);
    }

    #[test]
    fn test_pmi_is_half_percent_of_loan_per_year() {
        let mut p = default_params();
        p.down_payment = dec!(50_000);
        let r = compute_mortgage(&p).unwrap();
        // 300_000 * 0.005 / 12 = 125
        assert_eq!(r.monthly_pmi, dec!(125));
    }

    #[test]
    fn test_total_monthly_payment_sums_components() {
        let r = compute_mortgage(&default_params()).unwrap();
        assert!((r.monthly_property_tax - dec!(291.67)).abs() < dec!(0.01));
        assert_eq!(r.monthly_insurance, dec!(100));
        assert_eq!(
            r.total_monthly_payment,
            r.monthly_principal_interest + r.monthly_pmi + r.monthly_property_tax + r.monthly_insurance
        );
        // ~1769.79 P&I + 291.67 tax + 100 insurance
        assert!((r.total_monthly_payment - dec!(2_161.46)).abs() < dec!(0.01));
    }

    #[test]
    fn test_total_payment_includes_pmi_for_full_term() {
        let mut p = default_params();
        p.down_payment = dec!(50_000);
        let r = compute_mortgage(&p).unwrap();
        let n = dec!(360);
        assert_eq!(r.total_payment, r.monthly_principal_interest * n + r.monthly_pmi * n);
        assert_eq!(r.total_interest, r.monthly_principal_interest * n - r.loan_amount);
        let pmi_paid = r.total_payment - r.total_interest - r.loan_amount;
        assert!((pmi_paid - dec!(45_000)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_missing_tax_and_insurance_default_to_zero() {
        let json = r#"{"home_price":"200000","down_payment":"40000","term_years":15,"annual_rate_percent":"5"}"#;
        let p: MortgageParameters = serde_json::from_str(json).unwrap();
        let r = compute_mortgage(&p).unwrap();
        assert_eq!(r.total_monthly_payment, r.monthly_principal_interest);
    }

    #[test]
    fn test_calculate_mortgage_warns_on_pmi() {
        let mut p = default_params();
        p.down_payment = dec!(17_500);
        let out = calculate_mortgage(&p).unwrap();
        assert_eq!(out.warnings.len(), 1);

        let out = calculate_mortgage(&default_params()).unwrap();
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_term_past_u32_months_reports_overflow() {
        let mut p = default_params();
        p.term_years = u32::MAX / MONTHS_PER_YEAR + 1;
        assert!(matches!(
            calculate_mortgage(&p),
            Err(FinCalcError::Overflow { .. })
        ));
    }
}
