mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process;

use fincalc_core::history::FileStore;
use fincalc_core::CalculatorSession;

use commands::history::HistoryArgs;
use commands::investment::InvestmentArgs;
use commands::loan::LoanArgs;
use commands::mortgage::MortgageArgs;

/// Loan, mortgage and investment growth estimates
#[derive(Parser)]
#[command(
    name = "fincalc",
    version,
    about = "Loan, mortgage and investment growth estimates",
    long_about = "Estimate fixed-rate loan payments, full mortgage costs including PMI, \
                  tax and insurance, and compound growth with monthly contributions. \
                  Loan calculations are kept in a small local history."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Directory holding the saved calculation history
    #[arg(long, env = "FINCALC_HISTORY_DIR", default_value = ".fincalc", global = true)]
    history_dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly payment and total interest for a fixed-rate loan
    Loan(LoanArgs),
    /// Monthly housing cost including PMI, property tax and insurance
    Mortgage(MortgageArgs),
    /// Compound growth with monthly contributions
    Investment(InvestmentArgs),
    /// List the most recent loan calculations
    History(HistoryArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    log::debug!("history directory: {}", cli.history_dir.display());
    let mut session = CalculatorSession::open(FileStore::new(cli.history_dir));

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Loan(args) => commands::loan::run_loan(args, &mut session),
        Commands::Mortgage(args) => commands::mortgage::run_mortgage(args, &session),
        Commands::Investment(args) => commands::investment::run_investment(args, &session),
        Commands::History(args) => commands::history::run_history(args, &session),
        Commands::Version => {
            println!("fincalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
