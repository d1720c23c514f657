use thiserror::Error;

#[derive(Debug, Error)]
pub enum LeasingError {
    /// Term length is not a positive whole number of months.
    #[error("Invalid lease term: {0}")]
    InvalidTerm(String),

    /// Financed principal is negative, an amount is negative, or the
    /// interest rate is negative or non-finite.
    #[error("Invalid lease terms: {field}: {reason}")]
    InvalidTerms { field: String, reason: String },

    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    #[error("Data source '{source_name}' failed: {reason}")]
    DataSource { source_name: String, reason: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl LeasingError {
    pub(crate) fn invalid_terms(field: &str, reason: impl Into<String>) -> Self {
        LeasingError::InvalidTerms {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_input(field: &str, reason: impl Into<String>) -> Self {
        LeasingError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for LeasingError {
    fn from(e: serde_json::Error) -> Self {
        LeasingError::SerializationError(e.to_string())
    }
}
