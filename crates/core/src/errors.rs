use thiserror::Error;

#[derive(Error, Debug)]
pub enum HubError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Persistence failure: {0}")]
    PersistenceFailure(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl HubError {
    pub fn invalid(message: impl Into<String>) -> Self {
        HubError::InvalidRequest(message.into())
    }
}

pub type HubResult<T> = Result<T, HubError>;
