use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("not a group: {0}")]
    NotGroup(String),

    #[error("not a dataset: {0}")]
    NotDataset(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("io error: {0}")]
    Io(String),
}

impl StoreError {
    #[must_use]
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound(path.into())
    }

    #[must_use]
    pub fn not_group(path: impl Into<String>) -> Self {
        Self::NotGroup(path.into())
    }

    #[must_use]
    pub fn not_dataset(path: impl Into<String>) -> Self {
        Self::NotDataset(path.into())
    }

    #[must_use]
    pub fn already_exists(path: impl Into<String>) -> Self {
        Self::AlreadyExists(path.into())
    }

    #[must_use]
    pub fn invalid_snapshot(reason: impl Into<String>) -> Self {
        Self::InvalidSnapshot(reason.into())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
