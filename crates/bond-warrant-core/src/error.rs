use thiserror::Error;

#[derive(Debug, Error)]
pub enum WarrantSimError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Financial impossibility: {0}")]
    FinancialImpossibility(String),

    #[error("Market data error: {0}")]
    MarketData(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl WarrantSimError {
    /// Shorthand for the most common failure: a parameter outside its domain.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        WarrantSimError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for WarrantSimError {
    fn from(e: serde_json::Error) -> Self {
        WarrantSimError::SerializationError(e.to_string())
    }
}
