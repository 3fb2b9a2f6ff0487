use thiserror::Error;

/// User input that fails a precondition. The operation is aborted before
/// touching the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Expense name cannot be empty!")]
    EmptyDescription,

    #[error("Amount must be a number! (got {0:?})")]
    InvalidAmount(String),

    #[error("No item selected to delete!")]
    NoSelection,
}

#[derive(Error, Debug)]
pub enum ExpenseError {
    #[error("Failed to open expense store: {0}")]
    Connection(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Expense store is closed")]
    Closed,
}

impl From<libsql::Error> for ExpenseError {
    fn from(e: libsql::Error) -> Self {
        ExpenseError::Storage(e.to_string())
    }
}

impl ExpenseError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ExpenseError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, ExpenseError>;
