//! Store error types.

use thiserror::Error;

/// Errors that can occur in the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A value was rejected before it reached disk.
    #[error("{0}")]
    InvalidInput(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Core model error (unknown provider, bad preset slot).
    #[error(transparent)]
    Core(#[from] clipsage_core::CoreError),
}

impl StoreError {
    /// Returns true if the file simply does not exist yet.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

impl From<StoreError> for clipsage_core::CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Core(core) => core,
            other => clipsage_core::CoreError::Persistence(other.to_string()),
        }
    }
}
