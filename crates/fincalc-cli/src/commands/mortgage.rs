use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::history::FileStore;
use fincalc_core::mortgage::MortgageParameters;
use fincalc_core::CalculatorSession;

use crate::input;

/// Arguments for the mortgage calculator
#[derive(Args)]
pub struct MortgageArgs {
    /// Purchase price of the home
    #[arg(long)]
    pub home_price: Option<Decimal>,

    /// Cash paid up front
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Loan term in years
    #[arg(long, default_value = "30")]
    pub term: u32,

    /// Annual interest rate in percent (e.g. 6.5 for 6.5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Annual property tax
    #[arg(long, default_value = "0")]
    pub property_tax: Decimal,

    /// Annual homeowner's insurance
    #[arg(long, default_value = "0")]
    pub insurance: Decimal,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_mortgage(
    args: MortgageArgs,
    session: &CalculatorSession<FileStore>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let params: MortgageParameters = match input::read_params(args.input.as_deref())? {
        Some(params) => params,
        None => MortgageParameters {
            home_price: args
                .home_price
                .ok_or("--home-price is required (or provide --input)")?,
            down_payment: args
                .down_payment
                .ok_or("--down-payment is required (or provide --input)")?,
            term_years: args.term,
            annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
            annual_property_tax: args.property_tax,
            annual_insurance: args.insurance,
        },
    };

    let result = session.calculate_mortgage(&params)?;
    Ok(serde_json::to_value(result)?)
}
