use thiserror::Error;

/// Errors that can occur while provisioning a test environment.
#[derive(Error, Debug)]
pub enum TestError {
    /// Failed to connect to or initialize the in-memory database.
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),
}
