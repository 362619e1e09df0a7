use serde::Serialize;
use thiserror::Error;

use crate::core::store::StoreError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{0}")]
    Validation(String),
    #[error("Cannot follow or unfollow yourself")]
    SelfReference,
    #[error("{0}")]
    NotFound(String),
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

// Client faults are the caller's to fix; server faults are safe to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Fault {
    Client,
    Server,
}

impl EngineError {
    pub fn status_code(&self) -> u16 {
        match self {
            EngineError::Validation(_) => 400,
            EngineError::SelfReference => 400,
            EngineError::NotFound(_) => 404,
            EngineError::Storage(_) => 500,
        }
    }

    pub fn fault(&self) -> Fault {
        match self {
            EngineError::Storage(_) => Fault::Server,
            _ => Fault::Client,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, EngineError::Storage(_))
    }
}
