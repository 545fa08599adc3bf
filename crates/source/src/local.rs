use crate::error::{FetchFailure, Result, SourceError};
use crate::language::primary_language;
use crate::{RepoEntry, RepoMetadataSource, RepoTreeSource};
use async_trait::async_trait;
use ignore::WalkBuilder;
use repopack_protocol::RepoMetadata;
use std::path::{Path, PathBuf};

/// Largest single file the local source will hand out. Anything bigger is a
/// recoverable `TooLarge`, matching the ceiling remote tree APIs enforce.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 512_000; // 500 KB

const NUL_PROBE_BYTES: usize = 8_192;

/// Tree + metadata source backed by a local checkout.
///
/// Walks the tree gitignore-aware but keeps dotfiles (CI workflows live in
/// hidden directories); only `.git` itself is pruned at walk time, everything
/// else is the classifier's decision.
pub struct LocalRepoSource {
    root: PathBuf,
    max_file_bytes: u64,
}

impl LocalRepoSource {
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(SourceError::InvalidRoot(root.display().to_string()));
        }
        Ok(Self {
            root,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        })
    }

    pub fn with_max_file_bytes(mut self, max_file_bytes: u64) -> Self {
        self.max_file_bytes = max_file_bytes;
        self
    }

    fn scan(&self) -> Vec<RepoEntry> {
        let mut entries = Vec::new();

        let mut builder = WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            // Plain exports have no .git directory; honor .gitignore anyway.
            .require_git(false);
        builder.filter_entry(|entry| entry.file_name() != ".git");

        for result in builder.build() {
            match result {
                Ok(entry) => {
                    let Some(file_type) = entry.file_type() else {
                        continue;
                    };
                    if !file_type.is_file() {
                        continue;
                    }
                    let Some(rel) = normalize_relative_path(&self.root, entry.path()) else {
                        continue;
                    };
                    let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
                    entries.push(RepoEntry::new(rel, size));
                }
                Err(e) => log::warn!("failed to read entry: {e}"),
            }
        }

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        log::info!("scanned {} files under {}", entries.len(), self.root.display());
        entries
    }
}

fn normalize_relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let rel = rel.to_string_lossy().into_owned();
    Some(rel.replace('\\', "/"))
}

#[async_trait]
impl RepoTreeSource for LocalRepoSource {
    async fn list_files(&self) -> Result<Vec<RepoEntry>> {
        Ok(self.scan())
    }

    async fn fetch_content(&self, path: &str) -> std::result::Result<String, FetchFailure> {
        let abs = self.root.join(path);
        let meta = tokio::fs::metadata(&abs)
            .await
            .map_err(|_| FetchFailure::NotFound)?;
        if !meta.is_file() {
            return Err(FetchFailure::NotFound);
        }
        if meta.len() > self.max_file_bytes {
            return Err(FetchFailure::TooLarge);
        }

        let bytes = tokio::fs::read(&abs)
            .await
            .map_err(|_| FetchFailure::NotFound)?;
        // NUL bytes near the start are a reliable binary giveaway even when
        // the file happens to be valid UTF-8.
        if bytes[..bytes.len().min(NUL_PROBE_BYTES)].contains(&0) {
            return Err(FetchFailure::DecodeError);
        }
        String::from_utf8(bytes).map_err(|_| FetchFailure::DecodeError)
    }
}

#[async_trait]
impl RepoMetadataSource for LocalRepoSource {
    async fn metadata(&self) -> Result<RepoMetadata> {
        let name = self
            .root
            .canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "repository".to_string());

        let entries = self.scan();
        let mut metadata = RepoMetadata::named(name);
        metadata.primary_language = primary_language(&entries);
        Ok(metadata)
    }
}
