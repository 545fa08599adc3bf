use repopack_source::SourceError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ContextError>;

#[derive(Error, Debug)]
pub enum ContextError {
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    #[error("invalid pack configuration: {0}")]
    InvalidConfig(String),

    #[error("repository appears to be empty (no files in the tree listing)")]
    EmptyRepository,

    #[error("deadline expired before any file could be packed")]
    DeadlineExpired,
}
