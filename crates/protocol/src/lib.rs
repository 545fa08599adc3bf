//! Shared types for the repopack pipeline.
//!
//! Everything that crosses a crate seam lives here: repository references
//! and metadata on the way in, budget accounting on the way out. The crate
//! stays dependency-light so every other member can use it.

mod repo_ref;

pub use repo_ref::{RepoRef, RepoRefError};

use serde::{Deserialize, Serialize};

/// Branch assumed when a metadata source does not report one.
pub const DEFAULT_BRANCH: &str = "main";

fn default_branch() -> String {
    DEFAULT_BRANCH.to_string()
}

/// Repository metadata as reported by the metadata collaborator.
///
/// Only `name` is required; absent fields stay absent all the way into the
/// rendered document (never null-labeled).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepoMetadata {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_language: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<String>,
    #[serde(default = "default_branch")]
    pub default_branch: String,
    #[serde(default)]
    pub stars: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl RepoMetadata {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: None,
            description: None,
            primary_language: None,
            topics: Vec::new(),
            default_branch: default_branch(),
            stars: 0,
            url: None,
        }
    }
}

/// Why a packing run stopped short of including everything.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TruncationReason {
    MaxChars,
    MaxFiles,
    Deadline,
}

/// Character-budget accounting for one packing run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackBudget {
    pub max_chars: usize,
    pub used_chars: usize,
    pub truncated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncation: Option<TruncationReason>,
}

impl PackBudget {
    pub fn new(max_chars: usize) -> Self {
        Self {
            max_chars,
            used_chars: 0,
            truncated: false,
            truncation: None,
        }
    }
}
