use thiserror::Error;

/// Domain error for every store-backed operation. Each kind carries a stable
/// machine code so the IPC layer can map failures without string matching.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    DuplicateKey(String),

    #[error("{0}")]
    NotFound(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Storage(#[from] rusqlite::Error),
}

impl StoreError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        StoreError::InvalidInput(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        StoreError::NotFound(msg.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            StoreError::InvalidInput(_) => "invalid_input",
            StoreError::DuplicateKey(_) => "duplicate_key",
            StoreError::NotFound(_) => "not_found",
            StoreError::Unavailable(_) => "storage_unavailable",
            StoreError::Storage(_) => "db_failed",
        }
    }

    /// Folds a rusqlite unique-constraint violation into `DuplicateKey`;
    /// everything else stays a storage error.
    pub fn from_write(e: rusqlite::Error, what: &str) -> Self {
        if let rusqlite::Error::SqliteFailure(ffi, _) = &e {
            if ffi.code == rusqlite::ErrorCode::ConstraintViolation {
                return StoreError::DuplicateKey(format!("{} already registered", what));
            }
        }
        StoreError::Storage(e)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
