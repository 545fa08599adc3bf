use crate::error::{ContextError, Result};
use crate::pack::TRUNCATION_MARKER;
use crate::{classify, tier};
use std::time::Duration;

// Roughly 1 token ≈ 4 chars: 200K chars keeps a 128K-token model comfortable
// once the prompt and answer are added on top.
const DEFAULT_MAX_CONTEXT_CHARS: usize = 200_000;
const DEFAULT_MAX_FILES: usize = 50;
const DEFAULT_MIN_EXCERPT_CHARS: usize = 240;
const DEFAULT_MAX_FILE_LINES: usize = 300;
const DEFAULT_MAX_TREE_LINES: usize = 500;
const DEFAULT_FETCH_CONCURRENCY: usize = 10;
const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_DEADLINE: Duration = Duration::from_secs(120);
const DEFAULT_MARKUP_RESERVE_CHARS: usize = 128;

/// Static configuration for one packing run.
///
/// All knobs are fixed up front; `validate` runs before any fetch so a
/// malformed configuration fails the run without touching the collaborators.
#[derive(Debug, Clone)]
pub struct PackConfig {
    /// Character budget for the whole context document.
    pub max_context_chars: usize,
    /// Hard cap on the number of packed files.
    pub max_files: usize,
    /// Below this many remaining characters, truncating a file is not worth
    /// it and the file is omitted instead.
    pub min_excerpt_chars: usize,
    /// Per-file line cap applied before budget accounting.
    pub max_file_lines: usize,
    /// Line cap for the directory-tree section.
    pub max_tree_lines: usize,
    /// Concurrent content fetches in flight.
    pub fetch_concurrency: usize,
    /// Timeout for a single content fetch.
    pub fetch_timeout: Duration,
    /// Aggregate deadline for the whole fetch phase.
    pub deadline: Duration,
    /// Characters reserved per packed file for headers and delimiters.
    pub markup_reserve_chars: usize,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            max_context_chars: DEFAULT_MAX_CONTEXT_CHARS,
            max_files: DEFAULT_MAX_FILES,
            min_excerpt_chars: DEFAULT_MIN_EXCERPT_CHARS,
            max_file_lines: DEFAULT_MAX_FILE_LINES,
            max_tree_lines: DEFAULT_MAX_TREE_LINES,
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            deadline: DEFAULT_DEADLINE,
            markup_reserve_chars: DEFAULT_MARKUP_RESERVE_CHARS,
        }
    }
}

impl PackConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_context_chars == 0 {
            return Err(ContextError::InvalidConfig(
                "character budget must be positive".to_string(),
            ));
        }
        if self.max_files == 0 {
            return Err(ContextError::InvalidConfig(
                "packed-file cap must be positive".to_string(),
            ));
        }
        if self.min_excerpt_chars <= TRUNCATION_MARKER.chars().count() {
            return Err(ContextError::InvalidConfig(
                "minimum excerpt must exceed the truncation marker".to_string(),
            ));
        }
        if self.min_excerpt_chars >= self.max_context_chars {
            return Err(ContextError::InvalidConfig(
                "minimum excerpt must be smaller than the character budget".to_string(),
            ));
        }
        if self.fetch_concurrency == 0 {
            return Err(ContextError::InvalidConfig(
                "fetch concurrency must be positive".to_string(),
            ));
        }
        classify::validate_tables().map_err(ContextError::InvalidConfig)?;
        tier::validate_rules().map_err(ContextError::InvalidConfig)?;
        Ok(())
    }
}
