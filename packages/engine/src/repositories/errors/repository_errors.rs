/// Infrastructure failures raised by a storage backend.
#[derive(Debug, Clone, PartialEq)]
pub enum RepositoryError {
    NotFound(String),
    AlreadyExists(String),
    /// Optimistic version check failed; another writer committed first.
    Conflict(String),
    Storage(String),
}

impl std::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepositoryError::NotFound(msg) => write!(f, "Record not found: {}", msg),
            RepositoryError::AlreadyExists(msg) => write!(f, "Record already exists: {}", msg),
            RepositoryError::Conflict(msg) => write!(f, "Write conflict: {}", msg),
            RepositoryError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for RepositoryError {}
