use crate::repositories::errors::repository_errors::RepositoryError;

#[derive(Debug, PartialEq)]
pub enum PoolServiceError {
    ValidationError(String),
    AlreadyExists(String),
    NotFound(String),
    /// The group backs a game that is still running.
    InUse { group_id: String, game_id: String },
    RepositoryError(RepositoryError),
}

impl std::fmt::Display for PoolServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoolServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            PoolServiceError::AlreadyExists(msg) => write!(f, "Already exists: {}", msg),
            PoolServiceError::NotFound(msg) => write!(f, "Not found: {}", msg),
            PoolServiceError::InUse { group_id, game_id } => write!(
                f,
                "Group {} is used by active game {} and cannot be edited",
                group_id, game_id
            ),
            PoolServiceError::RepositoryError(err) => write!(f, "Repository error: {}", err),
        }
    }
}

impl std::error::Error for PoolServiceError {}

impl From<RepositoryError> for PoolServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::AlreadyExists(msg) => PoolServiceError::AlreadyExists(msg),
            RepositoryError::NotFound(msg) => PoolServiceError::NotFound(msg),
            other => PoolServiceError::RepositoryError(other),
        }
    }
}
