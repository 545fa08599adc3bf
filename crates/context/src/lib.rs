//! Classification, tiering, and budget packing for repository context.
//!
//! The pipeline turns "flat file listing plus byte content" into one
//! prioritized, size-bounded context string:
//!
//! ```text
//! tree listing -> classify (filter) -> tier (annotate) -> sort (tier, path)
//!              -> bounded concurrent fetch -> greedy pack -> assemble
//! ```
//!
//! [`build_context`] is the single public entry point; everything else is
//! exported for direct use in tests and tooling. Collaborator failures
//! (listing, metadata) are terminal; a single unreadable file never is.

pub mod classify;
pub mod tier;

mod assemble;
mod config;
mod error;
mod model;
mod pack;

pub use assemble::assemble;
pub use config::PackConfig;
pub use error::{ContextError, Result};
pub use model::{Candidate, ContextDocument, PackedFile};
pub use pack::{pack, select_candidates, FetchResults};

use repopack_protocol::{PackBudget, TruncationReason};
use repopack_source::{RepoMetadataSource, RepoTreeSource};
use std::sync::Arc;

/// Run the whole pipeline against a pair of repository collaborators and
/// return the packed context document.
pub async fn build_context(
    tree_source: Arc<dyn RepoTreeSource>,
    metadata_source: Arc<dyn RepoMetadataSource>,
    config: &PackConfig,
) -> Result<ContextDocument> {
    config.validate()?;

    let metadata = metadata_source.metadata().await?;
    let entries = tree_source.list_files().await?;
    if entries.is_empty() {
        return Err(ContextError::EmptyRepository);
    }
    log::info!(
        "packing {}: {} tree entries",
        metadata.name,
        entries.len()
    );

    let candidates = select_candidates(&entries);
    log::info!("{} candidates after classification", candidates.len());

    // Content budget = configured total minus the fixed sections and a
    // per-file markup reserve, so content + markup stays within the budget.
    let overhead = assemble::fixed_overhead(&metadata, &entries, config.max_tree_lines);
    let reserve = config.markup_reserve_chars * config.max_files.min(candidates.len());
    let content_budget = config
        .max_context_chars
        .saturating_sub(overhead + reserve);

    let (fetched, deadline_expired) = pack::fetch_all(&tree_source, &candidates, config).await;
    let (packed, omitted) = pack(&candidates, &fetched, content_budget, config);

    if deadline_expired && packed.is_empty() && !candidates.is_empty() {
        return Err(ContextError::DeadlineExpired);
    }
    log::info!("packed {} files, omitted {}", packed.len(), omitted);

    let text = assemble(&metadata, &entries, &packed, omitted, config.max_tree_lines);
    let budget = budget_report(&text, &packed, omitted, deadline_expired, config);

    Ok(ContextDocument {
        text,
        packed_files: packed.len(),
        omitted_files: omitted,
        budget,
    })
}

fn budget_report(
    text: &str,
    packed: &[PackedFile],
    omitted: usize,
    deadline_expired: bool,
    config: &PackConfig,
) -> PackBudget {
    let mut budget = PackBudget::new(config.max_context_chars);
    budget.used_chars = text.chars().count();

    let truncation = if deadline_expired {
        Some(TruncationReason::Deadline)
    } else if packed.len() >= config.max_files && omitted > 0 {
        Some(TruncationReason::MaxFiles)
    } else if omitted > 0 || packed.iter().any(|f| f.truncated) {
        Some(TruncationReason::MaxChars)
    } else {
        None
    };
    budget.truncated = truncation.is_some();
    budget.truncation = truncation;
    budget
}
