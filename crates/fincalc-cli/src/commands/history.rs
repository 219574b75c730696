use clap::Args;
use serde_json::Value;

use fincalc_core::history::FileStore;
use fincalc_core::CalculatorSession;

/// Arguments for listing saved loan calculations
#[derive(Args)]
pub struct HistoryArgs {
    /// Show only the N most recent entries
    #[arg(long)]
    pub limit: Option<usize>,
}

pub fn run_history(
    args: HistoryArgs,
    session: &CalculatorSession<FileStore>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let records = session.history().records();
    let shown = match args.limit {
        Some(n) => &records[..n.min(records.len())],
        None => records,
    };
    Ok(serde_json::to_value(shown)?)
}
