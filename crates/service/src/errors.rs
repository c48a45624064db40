use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("io error: {0}")]
    Io(String),
    #[error("report error: {0}")]
    Report(String),
    #[error("store error: {0}")]
    Store(#[from] models::errors::StoreError),
}
