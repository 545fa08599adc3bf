//! Repository sources for the repopack pipeline.
//!
//! The packing core consumes two narrow collaborators: a tree source (flat
//! file listing plus per-file content fetch) and a metadata source. Both are
//! traits so the core never knows where bytes come from; this crate ships a
//! local-filesystem implementation that is exercisable without any network.
//!
//! Failure shape matters more than transport: listing/metadata failures are
//! terminal ([`SourceError`]), while a single file that cannot be fetched is
//! a recoverable [`FetchFailure`] the caller counts and moves past.

mod error;
mod language;
mod local;

pub use error::{FetchFailure, Result, SourceError};
pub use language::primary_language;
pub use local::{LocalRepoSource, DEFAULT_MAX_FILE_BYTES};

use async_trait::async_trait;
use repopack_protocol::RepoMetadata;
use serde::{Deserialize, Serialize};

/// One file from the tree listing: repo-relative forward-slash path + size.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepoEntry {
    pub path: String,
    pub size: u64,
}

impl RepoEntry {
    pub fn new(path: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }
}

/// Supplies the file tree and raw file contents for one repository snapshot.
#[async_trait]
pub trait RepoTreeSource: Send + Sync {
    /// Flat listing of every file in the snapshot, path-ordered.
    async fn list_files(&self) -> Result<Vec<RepoEntry>>;

    /// Raw text content of one file. Per-file failures are recoverable and
    /// must never poison the rest of the run.
    async fn fetch_content(&self, path: &str) -> std::result::Result<String, FetchFailure>;
}

/// Supplies repository metadata (name, description, language, topics).
#[async_trait]
pub trait RepoMetadataSource: Send + Sync {
    async fn metadata(&self) -> Result<RepoMetadata>;
}
