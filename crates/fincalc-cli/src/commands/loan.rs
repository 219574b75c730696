use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::amortization::LoanParameters;
use fincalc_core::history::FileStore;
use fincalc_core::CalculatorSession;

use crate::input;

/// Arguments for the loan payment calculator
#[derive(Args)]
pub struct LoanArgs {
    /// Amount borrowed
    #[arg(long, alias = "amount")]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 5.5 for 5.5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in years
    #[arg(long)]
    pub term: Option<u32>,

    /// Include the month-by-month amortization schedule
    #[arg(long)]
    pub schedule: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_loan(
    args: LoanArgs,
    session: &mut CalculatorSession<FileStore>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let params: LoanParameters = match input::read_params(args.input.as_deref())? {
        Some(params) => params,
        None => LoanParameters {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
            term_years: args.term.ok_or("--term is required (or provide --input)")?,
        },
    };

    if args.schedule {
        let result = session.calculate_loan_schedule(&params)?;
        Ok(serde_json::to_value(result)?)
    } else {
        let result = session.calculate_loan(&params)?;
        Ok(serde_json::to_value(result)?)
    }
}
