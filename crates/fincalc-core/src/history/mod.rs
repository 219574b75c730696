//! Bounded, newest-first history of loan calculations.
//!
//! The history is persisted as a JSON array under [`HISTORY_KEY`] in an
//! injected [`KeyValueStore`]. The JSON field names match what the web front
//! end already writes, so either side can read the other's history.

pub mod storage;

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};

use crate::amortization::{LoanParameters, LoanResult};
use crate::error::FinCalcError;
use crate::types::{Money, Percent};
use crate::FinCalcResult;

pub use storage::{FileStore, KeyValueStore, MemoryStore};

/// Storage key the history lives under.
pub const HISTORY_KEY: &str = "savedCalculations";

/// Maximum number of records kept; older ones are dropped.
pub const HISTORY_CAPACITY: usize = 10;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One successful loan calculation as it is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    /// ISO-8601 UTC timestamp with millisecond precision.
    #[serde(rename = "date")]
    pub timestamp: String,
    #[serde(rename = "amount", with = "rust_decimal::serde::float")]
    pub principal: Money,
    #[serde(rename = "rate", with = "rust_decimal::serde::float")]
    pub rate_percent: Percent,
    #[serde(rename = "term")]
    pub term_years: u32,
    /// Payment pre-formatted to two decimals, e.g. `"477.53"`.
    #[serde(rename = "monthlyPayment")]
    pub monthly_payment: String,
}

impl CalculationRecord {
    pub fn from_loan(params: &LoanParameters, result: &LoanResult, at: DateTime<Utc>) -> Self {
        Self {
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            principal: params.principal,
            rate_percent: params.annual_rate_percent,
            term_years: params.term_years,
            monthly_payment: format_payment(result.monthly_payment),
        }
    }
}

/// Two-decimal text form of an amount, rounding halves away from zero.
pub fn format_payment(amount: Money) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Newest-first list of at most [`HISTORY_CAPACITY`] records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalculationHistory {
    records: Vec<CalculationRecord>,
}

impl CalculationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a persisted history. Anything that is not a JSON array is
    /// reported as corrupt. Entries that do not decode as a record (a
    /// fractional `term` written by a browser form, a missing field) are
    /// skipped one by one. The rest are cut to capacity, newest first.
    pub fn from_json(raw: &str) -> FinCalcResult<Self> {
        let entries: Vec<serde_json::Value> = serde_json::from_str(raw)
            .map_err(|e| FinCalcError::CorruptPersistedState(e.to_string()))?;

        let records: Vec<CalculationRecord> = entries
            .into_iter()
            .enumerate()
            .filter_map(|(i, entry)| match serde_json::from_value(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    log::warn!("skipping unreadable history entry {i}: {e}");
                    None
                }
            })
            .take(HISTORY_CAPACITY)
            .collect();
        Ok(Self { records })
    }

    pub fn to_json(&self) -> FinCalcResult<String> {
        Ok(serde_json::to_string(&self.records)?)
    }

    /// New history with `record` at the head, truncated to capacity.
    pub fn prepended(&self, record: CalculationRecord) -> Self {
        let mut records = Vec::with_capacity(HISTORY_CAPACITY);
        records.push(record);
        records.extend(self.records.iter().take(HISTORY_CAPACITY - 1).cloned());
        Self { records }
    }

    pub fn records(&self) -> &[CalculationRecord] {
        &self.records
    }

    pub fn latest(&self) -> Option<&CalculationRecord> {
        self.records.first()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Owns the session's history and writes every change through to storage.
#[derive(Debug)]
pub struct HistoryStore<S: KeyValueStore> {
    storage: S,
    history: CalculationHistory,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// Open over `storage`, reading the persisted history once.
    pub fn open(storage: S) -> Self {
        let history = load_from(&storage);
        Self { storage, history }
    }

    /// Read the persisted history. Missing or corrupt state yields an empty
    /// history; this never fails.
    pub fn load(&self) -> CalculationHistory {
        load_from(&self.storage)
    }

    /// Prepend `entry`, drop anything past capacity, persist, and return the
    /// new history.
    pub fn record(&mut self, entry: CalculationRecord) -> CalculationHistory {
        self.history = self.history.prepended(entry);

        let persisted = self
            .history
            .to_json()
            .and_then(|json| self.storage.set(HISTORY_KEY, json));
        if let Err(e) = persisted {
            log::warn!("failed to persist calculation history: {e}");
        }

        self.history.clone()
    }

    pub fn history(&self) -> &CalculationHistory {
        &self.history
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

fn load_from<S: KeyValueStore>(storage: &S) -> CalculationHistory {
    let raw = match storage.get(HISTORY_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return CalculationHistory::new(),
        Err(e) => {
            log::warn!("could not read calculation history, starting empty: {e}");
            return CalculationHistory::new();
        }
    };

    match CalculationHistory::from_json(&raw) {
        Ok(history) => {
            log::debug!("loaded {} calculation record(s)", history.len());
            history
        }
        Err(e) => {
            log::warn!("discarding calculation history: {e}");
            CalculationHistory::new()
        }
    }
}
