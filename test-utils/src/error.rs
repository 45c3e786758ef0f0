use sea_orm::DbErr;
use thiserror::Error;

/// Errors that can occur while preparing a test environment.
#[derive(Error, Debug)]
pub enum TestError {
    /// Failed to connect to the in-memory database or to create a table.
    #[error(transparent)]
    Database(#[from] DbErr),
    /// Failed to set up the session store.
    #[error("Failed to initialize session store: {0}")]
    Session(String),
}
