use thiserror::Error;

pub type Result<T> = std::result::Result<T, SourceError>;

/// Terminal source failure: the tree listing or metadata call itself failed.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid repository root: {0}")]
    InvalidRoot(String),

    #[error("{0}")]
    Other(String),
}

/// Recoverable per-file fetch failure.
///
/// Every variant is handled the same way downstream: the file is counted as
/// omitted and the run continues.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailure {
    #[error("file not found")]
    NotFound,
    #[error("content is not valid text")]
    DecodeError,
    #[error("file exceeds the single-file size ceiling")]
    TooLarge,
    #[error("fetch timed out")]
    TimedOut,
}
