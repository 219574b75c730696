//! The calculator facade a form, CLI or binding drives.
//!
//! Each call validates first and never computes on invalid input. Only loan
//! calculations are written to the history.

use chrono::Utc;

use crate::amortization::{self, LoanParameters, LoanResult, LoanScheduleOutput};
use crate::growth::{self, InvestmentParameters, InvestmentResult};
use crate::history::{CalculationHistory, CalculationRecord, HistoryStore, KeyValueStore};
use crate::mortgage::{self, MortgageParameters, MortgageResult};
use crate::types::ComputationOutput;
use crate::FinCalcResult;

#[derive(Debug)]
pub struct CalculatorSession<S: KeyValueStore> {
    history: HistoryStore<S>,
}

impl<S: KeyValueStore> CalculatorSession<S> {
    /// Start a session, loading any persisted history from `storage`.
    pub fn open(storage: S) -> Self {
        Self {
            history: HistoryStore::open(storage),
        }
    }

    pub fn calculate_loan(
        &mut self,
        params: &LoanParameters,
    ) -> FinCalcResult<ComputationOutput<LoanResult>> {
        let output = amortization::calculate_loan(params)?;
        self.record_loan(params, &output.result);
        Ok(output)
    }

    /// Loan calculation including the monthly schedule; recorded like any other.
    pub fn calculate_loan_schedule(
        &mut self,
        params: &LoanParameters,
    ) -> FinCalcResult<ComputationOutput<LoanScheduleOutput>> {
        let output = amortization::calculate_loan_schedule(params)?;
        self.record_loan(params, &output.result.summary);
        Ok(output)
    }

    pub fn calculate_mortgage(
        &self,
        params: &MortgageParameters,
    ) -> FinCalcResult<ComputationOutput<MortgageResult>> {
        let output = mortgage::calculate_mortgage(params)?;
        log::debug!(
            "mortgage calculation: price={} down={} total_monthly={}",
            params.home_price,
            params.down_payment,
            output.result.total_monthly_payment.round_dp(2),
        );
        Ok(output)
    }

    pub fn calculate_investment(
        &self,
        params: &InvestmentParameters,
    ) -> FinCalcResult<ComputationOutput<InvestmentResult>> {
        let output = growth::calculate_investment(params)?;
        log::debug!(
            "investment calculation: years={} final={}",
            params.years,
            output.result.final_amount.round_dp(2),
        );
        Ok(output)
    }

    pub fn history(&self) -> &CalculationHistory {
        self.history.history()
    }

    pub fn into_storage(self) -> S {
        self.history.into_storage()
    }

    fn record_loan(&mut self, params: &LoanParameters, result: &LoanResult) {
        log::debug!(
            "loan calculation: principal={} rate={}% term={}y payment={}",
            params.principal,
            params.annual_rate_percent,
            params.term_years,
            result.monthly_payment.round_dp(2),
        );
        self.history
            .record(CalculationRecord::from_loan(params, result, Utc::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FinCalcError;
    use crate::history::MemoryStore;
    use rust_decimal_macros::dec;

    fn loan() -> LoanParameters {
        LoanParameters {
            principal: dec!(25_000),
            annual_rate_percent: dec!(5.5),
            term_years: 5,
        }
    }

    #[test]
    fn test_loan_calculation_is_recorded() {
        let mut session = CalculatorSession::open(MemoryStore::new());
        let result = session.calculate_loan(&loan()).unwrap().result;

        let head = session.history().latest().unwrap();
        assert_eq!(head.monthly_payment, "477.53");
        assert_eq!(head.principal, dec!(25_000));
        assert_eq!(result.monthly_payment.round_dp(2), dec!(477.53));
        assert!(head.timestamp.ends_with('Z'));
    }

    #[test]
    fn test_invalid_loan_is_not_recorded() {
        let mut session = CalculatorSession::open(MemoryStore::new());
        let mut params = loan();
        params.principal = dec!(0);
        assert!(matches!(
            session.calculate_loan(&params),
            Err(FinCalcError::InvalidInput { .. })
        ));
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_other_calculators_leave_history_alone() {
        let session = CalculatorSession::open(MemoryStore::new());
        session
            .calculate_mortgage(&MortgageParameters {
                home_price: dec!(350_000),
                down_payment: dec!(70_000),
                term_years: 30,
                annual_rate_percent: dec!(6.5),
                annual_property_tax: dec!(0),
                annual_insurance: dec!(0),
            })
            .unwrap();
        session
            .calculate_investment(&InvestmentParameters {
                initial_amount: dec!(10_000),
                monthly_contribution: dec!(500),
                annual_return_percent: dec!(7),
                years: 1,
            })
            .unwrap();
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_schedule_calculation_is_recorded_once() {
        let mut session = CalculatorSession::open(MemoryStore::new());
        let out = session.calculate_loan_schedule(&loan()).unwrap();
        assert_eq!(out.result.schedule.len(), 60);
        assert_eq!(session.history().len(), 1);
    }
}
