use thiserror::Error;

use models::errors::ModelError;

/// Business errors for customer workflows
#[derive(Debug, Error)]
pub enum CustomerError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl CustomerError {
    pub fn not_found(customer_id: &str) -> Self { Self::NotFound(format!("customer {} not found", customer_id)) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            CustomerError::NotFound(_) => 2003,
            CustomerError::Repository(_) => 2200,
        }
    }
}

impl From<ModelError> for CustomerError {
    fn from(e: ModelError) -> Self { Self::Repository(e.to_string()) }
}
