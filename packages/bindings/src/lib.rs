use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Serialize;

use fincalc_core::amortization::LoanParameters;
use fincalc_core::history::{KeyValueStore, MemoryStore, HISTORY_KEY};
use fincalc_core::validation::CalculatorInput;
use fincalc_core::CalculatorSession;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Calculators
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_loan(input_json: String) -> NapiResult<String> {
    let input: LoanParameters = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fincalc_core::amortization::calculate_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn loan_schedule(input_json: String) -> NapiResult<String> {
    let input: LoanParameters = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        fincalc_core::amortization::calculate_loan_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_mortgage(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::mortgage::MortgageParameters =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fincalc_core::mortgage::calculate_mortgage(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_investment(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::growth::InvestmentParameters =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fincalc_core::growth::calculate_investment(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Check a `{"kind": "loan" | "mortgage" | "investment", ...}` input.
/// Returns `null` when valid, otherwise the user-facing reason.
#[napi]
pub fn validate_input(input_json: String) -> NapiResult<Option<String>> {
    let input: CalculatorInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    Ok(fincalc_core::validation::validate(&input)
        .err()
        .map(|e| e.to_string()))
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct RecordedLoan<T: Serialize> {
    output: T,
    /// JSON to write back under `savedCalculations`.
    history: String,
}

/// Run a loan calculation against the page's current history.
///
/// `history_json` is whatever the page has stored under `savedCalculations`
/// (pass an empty string when nothing is stored). The page owns storage; it
/// writes the returned `history` back itself.
#[napi]
pub fn record_loan_calculation(history_json: String, input_json: String) -> NapiResult<String> {
    let input: LoanParameters = serde_json::from_str(&input_json).map_err(to_napi_error)?;

    let mut storage = MemoryStore::new();
    if !history_json.trim().is_empty() {
        storage.set(HISTORY_KEY, history_json).map_err(to_napi_error)?;
    }

    let mut session = CalculatorSession::open(storage);
    let output = session.calculate_loan(&input).map_err(to_napi_error)?;
    let history = session.history().to_json().map_err(to_napi_error)?;

    serde_json::to_string(&RecordedLoan { output, history }).map_err(to_napi_error)
}
