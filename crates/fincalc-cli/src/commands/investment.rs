use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::growth::InvestmentParameters;
use fincalc_core::history::FileStore;
use fincalc_core::CalculatorSession;

use crate::input;

/// Arguments for the investment growth calculator
#[derive(Args)]
pub struct InvestmentArgs {
    /// Starting balance
    #[arg(long, default_value = "0")]
    pub initial: Decimal,

    /// Amount added at the end of every month
    #[arg(long, default_value = "0")]
    pub monthly: Decimal,

    /// Expected annual return in percent (e.g. 7 for 7%)
    #[arg(long)]
    pub annual_return: Option<Decimal>,

    /// Number of years to project
    #[arg(long)]
    pub years: Option<u32>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_investment(
    args: InvestmentArgs,
    session: &CalculatorSession<FileStore>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let params: InvestmentParameters = match input::read_params(args.input.as_deref())? {
        Some(params) => params,
        None => InvestmentParameters {
            initial_amount: args.initial,
            monthly_contribution: args.monthly,
            annual_return_percent: args
                .annual_return
                .ok_or("--annual-return is required (or provide --input)")?,
            years: args.years.ok_or("--years is required (or provide --input)")?,
        },
    };

    let result = session.calculate_investment(&params)?;
    Ok(serde_json::to_value(result)?)
}
