use crate::auth::RejectReason;
use crate::eval::EvalError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Login rejected: {0}")]
    Authentication(RejectReason),

    #[error("Failed to read notes: {0}")]
    PersistenceRead(String),

    #[error("Failed to save notes after {attempts} attempt(s): {reason}")]
    PersistenceWrite { attempts: u32, reason: String },

    #[error("Invalid expression: {0}")]
    Evaluation(#[from] EvalError),

    #[error("Note not found: {0}")]
    NoteNotFound(usize),

    #[error("Session error: {0}")]
    Session(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, VaultError>;
