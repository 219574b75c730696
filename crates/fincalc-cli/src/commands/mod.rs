pub mod history;
pub mod investment;
pub mod loan;
pub mod mortgage;
