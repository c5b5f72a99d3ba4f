use leadflow_core::{CoreError, GatewayError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("sqlite error: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },
    #[error("migration error: {0}")]
    Migration(String),
    #[error("invalid data path: {0}")]
    InvalidDataPath(PathBuf),
    #[error("invalid stored value: {0}")]
    InvalidStoredValue(String),
    #[error("email already exists: {0}")]
    DuplicateEmail(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    Io,
    Sql,
    Core,
    MissingHomeDir,
    NotFound,
    Migration,
    InvalidDataPath,
    InvalidStoredValue,
    DuplicateEmail,
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::Io(_) => StoreErrorKind::Io,
            StoreError::Sql(_) => StoreErrorKind::Sql,
            StoreError::Core(_) => StoreErrorKind::Core,
            StoreError::MissingHomeDir => StoreErrorKind::MissingHomeDir,
            StoreError::NotFound { .. } => StoreErrorKind::NotFound,
            StoreError::Migration(_) => StoreErrorKind::Migration,
            StoreError::InvalidDataPath(_) => StoreErrorKind::InvalidDataPath,
            StoreError::InvalidStoredValue(_) => StoreErrorKind::InvalidStoredValue,
            StoreError::DuplicateEmail(_) => StoreErrorKind::DuplicateEmail,
        }
    }
}

impl From<StoreError> for GatewayError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => GatewayError::NotFound { entity, id },
            StoreError::DuplicateEmail(email) => {
                GatewayError::Conflict(format!("email already exists: {email}"))
            }
            other => GatewayError::backend(other),
        }
    }
}
