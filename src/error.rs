use thiserror::Error;

/// Failure of a Storage Gateway operation.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The requested row does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Table-level name of the missing record, e.g. `"user"`.
        entity: &'static str,
        /// Identifier that was looked up.
        id: i64,
    },
    /// The engine rejected or failed the statement (constraint violation, I/O, ...).
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    /// Returns true for a lookup miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}
