use thiserror::Error;

#[derive(Debug, Error)]
pub enum QcFinanceError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Malformed rate table '{table}': {reason}")]
    MalformedTable { table: String, reason: String },

    #[error("No rate table registered for tax year {0}")]
    UnknownTaxYear(i32),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl QcFinanceError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        QcFinanceError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(table: &str, reason: impl Into<String>) -> Self {
        QcFinanceError::MalformedTable {
            table: table.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for QcFinanceError {
    fn from(e: serde_json::Error) -> Self {
        QcFinanceError::SerializationError(e.to_string())
    }
}
