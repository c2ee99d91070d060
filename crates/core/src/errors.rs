use thiserror::Error;

#[derive(Error, Debug)]
pub enum DockError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unparsable date/time cell: {0}")]
    ParseFailure(String),

    #[error("Entry has not checked in: {0}")]
    NotCheckedIn(String),

    #[error("Dock unavailable: {0}")]
    DockUnavailable(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type DockResult<T> = Result<T, DockError>;
