//! Input range checks run before any model is evaluated.
//!
//! Every check is pure: `Ok(())` means the inputs are valid for the named
//! calculator, `Err(FinCalcError::InvalidInput)` carries the offending field
//! and a message fit to show the user. No partial result is ever produced.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::LoanParameters;
use crate::error::FinCalcError;
use crate::growth::InvestmentParameters;
use crate::mortgage::MortgageParameters;
use crate::types::Money;
use crate::FinCalcResult;

/// Inputs for any of the three calculators, tagged by kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalculatorInput {
    Loan(LoanParameters),
    Mortgage(MortgageParameters),
    Investment(InvestmentParameters),
}

/// Validate inputs for whichever calculator they belong to.
pub fn validate(input: &CalculatorInput) -> FinCalcResult<()> {
    match input {
        CalculatorInput::Loan(p) => validate_loan(p),
        CalculatorInput::Mortgage(p) => validate_mortgage(p),
        CalculatorInput::Investment(p) => validate_investment(p),
    }
}

pub fn validate_loan(params: &LoanParameters) -> FinCalcResult<()> {
    require_positive("principal", params.principal)?;
    require_positive("annual_rate_percent", params.annual_rate_percent)?;
    require_positive_term("term_years", params.term_years)
}

pub fn validate_mortgage(params: &MortgageParameters) -> FinCalcResult<()> {
    require_positive("home_price", params.home_price)?;
    require_non_negative("down_payment", params.down_payment)?;
    if params.down_payment >= params.home_price {
        return Err(invalid(
            "down_payment",
            "Down payment must be less than the home price",
        ));
    }
    require_positive_term("term_years", params.term_years)?;
    require_positive("annual_rate_percent", params.annual_rate_percent)
}

pub fn validate_investment(params: &InvestmentParameters) -> FinCalcResult<()> {
    require_non_negative("initial_amount", params.initial_amount)?;
    require_non_negative("monthly_contribution", params.monthly_contribution)?;
    require_positive("annual_return_percent", params.annual_return_percent)?;
    require_positive_term("years", params.years)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid(field: &str, reason: &str) -> FinCalcError {
    FinCalcError::InvalidInput {
        field: field.into(),
        reason: reason.into(),
    }
}

fn require_positive(field: &str, value: Money) -> FinCalcResult<()> {
    if value <= Decimal::ZERO {
        return Err(invalid(field, &format!("{field} must be > 0")));
    }
    Ok(())
}

fn require_non_negative(field: &str, value: Money) -> FinCalcResult<()> {
    if value < Decimal::ZERO {
        return Err(invalid(field, &format!("{field} must be >= 0")));
    }
    Ok(())
}

fn require_positive_term(field: &str, years: u32) -> FinCalcResult<()> {
    if years == 0 {
        return Err(invalid(field, &format!("{field} must be at least 1 year")));
    }
    Ok(())
}
