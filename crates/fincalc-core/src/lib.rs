pub mod amortization;
pub mod error;
pub mod growth;
pub mod history;
pub mod mortgage;
pub mod session;
pub mod types;
pub mod validation;

pub use error::FinCalcError;
pub use session::CalculatorSession;
pub use types::*;

/// Standard result type for all fincalc operations
pub type FinCalcResult<T> = Result<T, FinCalcError>;
