use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{0}")]
    Conflict(String),
    #[error("Incorrect email or password")]
    InvalidCredentials,
    #[error("{0}")]
    Unauthenticated(String),
    #[error("Not enough permissions")]
    Forbidden,
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Internal error: {0}")]
    Internal(String),
}
