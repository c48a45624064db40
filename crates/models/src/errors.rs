use thiserror::Error;

use crate::outcome::ErrorKind;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unreadable: {0}")]
    Unreadable(String),
    #[error("clear failed: {0}")]
    ClearFailed(String),
}

impl StoreError {
    /// Collapse to the observable error kind, dropping the message.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unreadable(_) => ErrorKind::Unreadable,
            Self::ClearFailed(_) => ErrorKind::ClearFailed,
        }
    }
}
