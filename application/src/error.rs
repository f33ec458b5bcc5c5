use thiserror::Error;

use scribe_domain::DomainError;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
}
