use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinCalcError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Corrupt persisted state: {0}")]
    CorruptPersistedState(String),

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for FinCalcError {
    fn from(e: serde_json::Error) -> Self {
        FinCalcError::SerializationError(e.to_string())
    }
}

impl From<std::io::Error> for FinCalcError {
    fn from(e: std::io::Error) -> Self {
        FinCalcError::Storage(e.to_string())
    }
}
