//! Candidate selection, bounded concurrent fetch, and greedy budget packing.
//!
//! The fetch phase is fork-join: workers run in parallel behind a semaphore,
//! results land in a path-keyed map, and every packing decision is then made
//! by a single sequential pass that owns the budget counter exclusively.
//! Parallelism can change how fast content arrives, never what gets packed.

use crate::classify::{classify, Classification};
use crate::config::PackConfig;
use crate::model::{Candidate, PackedFile};
use crate::tier::tier_of;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::time::{timeout, timeout_at, Instant};

use repopack_source::{FetchFailure, RepoEntry, RepoTreeSource};

pub(crate) const TRUNCATION_MARKER: &str = "\n... (truncated)";

/// Per-path fetch outcomes, as handed from the fetch workers to the packer.
pub type FetchResults = HashMap<String, Result<String, FetchFailure>>;

/// Filter the tree listing down to eligible candidates, annotate each with
/// its tier, and order them tier-first then path within a tier.
pub fn select_candidates(entries: &[RepoEntry]) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for entry in entries {
        match classify(&entry.path) {
            Classification::Skipped(reason) => {
                log::debug!("skipping {} ({})", entry.path, reason.as_str());
            }
            Classification::Eligible => candidates.push(Candidate {
                path: entry.path.clone(),
                size: entry.size,
                tier: tier_of(&entry.path),
            }),
        }
    }
    candidates.sort_by(|a, b| a.tier.cmp(&b.tier).then_with(|| a.path.cmp(&b.path)));
    candidates
}

/// Fetch content for every candidate: bounded concurrency, a per-file
/// timeout, and an aggregate deadline over the whole join.
///
/// Returns the path-keyed results and whether the deadline expired before
/// all fetches completed (expired fetches are recorded as `TimedOut`).
pub(crate) async fn fetch_all(
    source: &Arc<dyn RepoTreeSource>,
    candidates: &[Candidate],
    config: &PackConfig,
) -> (FetchResults, bool) {
    let semaphore = Arc::new(Semaphore::new(config.fetch_concurrency));
    let deadline = Instant::now() + config.deadline;

    let mut handles = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let semaphore = semaphore.clone();
        let source = source.clone();
        let path = candidate.path.clone();
        let per_file = config.fetch_timeout;
        let handle = tokio::spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .unwrap_or_else(|_| unreachable!("fetch semaphore closed"));
            match timeout(per_file, source.fetch_content(&path)).await {
                Ok(result) => result,
                Err(_) => Err(FetchFailure::TimedOut),
            }
        });
        handles.push((candidate.path.clone(), handle));
    }

    let mut results = FetchResults::with_capacity(handles.len());
    let mut deadline_expired = false;
    for (path, mut handle) in handles {
        let result = match timeout_at(deadline, &mut handle).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => {
                log::warn!("fetch task for {path} aborted: {join_err}");
                Err(FetchFailure::TimedOut)
            }
            Err(_) => {
                handle.abort();
                deadline_expired = true;
                Err(FetchFailure::TimedOut)
            }
        };
        results.insert(path, result);
    }
    (results, deadline_expired)
}

/// Single greedy pass over the candidates in tier-then-path order.
///
/// The budget counter only ever decreases; a file either fits whole, fits as
/// a truncated excerpt that zeroes the budget, or is omitted. One unreadable
/// file never aborts the pass. `packed.len() + omitted` always equals
/// `candidates.len()`.
pub fn pack(
    candidates: &[Candidate],
    fetched: &FetchResults,
    budget: usize,
    config: &PackConfig,
) -> (Vec<PackedFile>, usize) {
    let marker_chars = TRUNCATION_MARKER.chars().count();
    let mut packed: Vec<PackedFile> = Vec::new();
    let mut omitted = 0usize;
    let mut remaining = budget;

    for (index, candidate) in candidates.iter().enumerate() {
        if packed.len() >= config.max_files {
            omitted += candidates.len() - index;
            break;
        }

        let content = match fetched.get(candidate.path.as_str()) {
            Some(Ok(content)) => content,
            Some(Err(failure)) => {
                log::warn!("omitting {}: {failure}", candidate.path);
                omitted += 1;
                continue;
            }
            None => {
                omitted += 1;
                continue;
            }
        };

        let (content, line_clamped) = clamp_lines(content, config.max_file_lines);
        let content_chars = content.chars().count();

        if content_chars <= remaining {
            remaining -= content_chars;
            packed.push(PackedFile {
                path: candidate.path.clone(),
                tier: candidate.tier,
                content,
                truncated: line_clamped,
            });
        } else if remaining > config.min_excerpt_chars {
            let keep = remaining.saturating_sub(marker_chars);
            let mut excerpt: String = content.chars().take(keep).collect();
            excerpt.push_str(TRUNCATION_MARKER);
            remaining = 0;
            packed.push(PackedFile {
                path: candidate.path.clone(),
                tier: candidate.tier,
                content: excerpt,
                truncated: true,
            });
        } else {
            // No room for a meaningful excerpt; later candidates may still
            // be small enough, so keep scanning.
            omitted += 1;
        }
    }

    (packed, omitted)
}

/// Clamp content to a line cap before budget accounting, so one enormous
/// file cannot monopolize the document even when the budget would allow it.
fn clamp_lines(content: &str, max_lines: usize) -> (String, bool) {
    let total = content.lines().count();
    if total <= max_lines {
        return (content.to_string(), false);
    }
    let kept: Vec<&str> = content.lines().take(max_lines).collect();
    (
        format!(
            "{}\n\n... (truncated, {total} total lines)",
            kept.join("\n")
        ),
        true,
    )
}
