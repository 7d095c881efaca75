use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unsupported sort key: {0} (expected one of id, title, created_at, author_name)")]
    UnsupportedSortKey(String),
    #[error("data source error: {0}")]
    DataSource(#[from] sqlx::Error),
    #[error("report sink error: {0}")]
    Sink(#[from] std::io::Error),
    #[error("operation cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    Backend,
    Cancelled,
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::InvalidArgument(_) | DomainError::UnsupportedSortKey(_) => {
                ErrorKind::BadRequest
            }
            DomainError::DataSource(_) | DomainError::Sink(_) => ErrorKind::Backend,
            DomainError::Cancelled => ErrorKind::Cancelled,
        }
    }

    pub fn is_bad_request(&self) -> bool {
        self.kind() == ErrorKind::BadRequest
    }
}
