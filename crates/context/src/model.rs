use crate::tier::Tier;
use repopack_protocol::PackBudget;
use serde::Serialize;

/// An eligible tree entry annotated with its priority tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: String,
    pub size: u64,
    pub tier: Tier,
}

/// A file committed to the context document. Created once by the packer,
/// never mutated afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedFile {
    pub path: String,
    pub tier: Tier,
    pub content: String,
    pub truncated: bool,
}

/// Final pipeline output: the rendered text plus enough accounting for a
/// caller to report what was and was not included.
#[derive(Debug, Clone, Serialize)]
pub struct ContextDocument {
    pub text: String,
    pub packed_files: usize,
    pub omitted_files: usize,
    pub budget: PackBudget,
}
