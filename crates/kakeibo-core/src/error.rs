use kakeibo_domain::{ExpenseId, InvalidExpense, ParseCategoryError, TimeWindowError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Expense not found: {0}")]
    NotFound(ExpenseId),
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl CoreError {
    pub fn storage(err: impl ToString) -> Self {
        CoreError::StorageUnavailable(err.to_string())
    }

    /// Totals that do not fit in an `i64` are rejected rather than wrapped.
    pub fn total_overflow() -> Self {
        CoreError::Validation("total amount exceeds the supported range".into())
    }
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::StorageUnavailable(err.to_string())
    }
}

impl From<InvalidExpense> for CoreError {
    fn from(err: InvalidExpense) -> Self {
        CoreError::Validation(err.to_string())
    }
}

impl From<ParseCategoryError> for CoreError {
    fn from(err: ParseCategoryError) -> Self {
        CoreError::Validation(err.to_string())
    }
}

impl From<TimeWindowError> for CoreError {
    fn from(err: TimeWindowError) -> Self {
        CoreError::Validation(err.to_string())
    }
}
