//! Rendering: metadata block, directory tree, file blocks, omission summary.
//!
//! The assembler is a pure formatter. It never reorders blocks and never
//! rewrites content; every inclusion/truncation decision was already made by
//! the packer.

use crate::classify::classify;
use crate::model::PackedFile;
use repopack_protocol::RepoMetadata;
use repopack_source::RepoEntry;
use std::collections::BTreeSet;

const METADATA_HEADER: &str = "=== REPOSITORY METADATA ===";
const TREE_HEADER: &str = "=== DIRECTORY STRUCTURE ===";
const FILES_HEADER: &str = "=== FILE CONTENTS ===";

/// Render the final context document.
pub fn assemble(
    metadata: &RepoMetadata,
    entries: &[RepoEntry],
    packed: &[PackedFile],
    omitted: usize,
    max_tree_lines: usize,
) -> String {
    let mut sections = vec![
        metadata_section(metadata),
        tree_section(entries, max_tree_lines),
        format!("{FILES_HEADER}\n"),
    ];

    for file in packed {
        sections.push(file_block(file));
    }

    if omitted > 0 {
        sections.push(format!(
            "... ({omitted} files omitted due to context budget)\n"
        ));
    }

    sections.join("\n")
}

/// Character length of everything that is not file content, given the packed
/// set: the fixed sections plus per-file headers and separators. Used by the
/// pipeline to reserve markup headroom out of the configured budget.
pub(crate) fn fixed_overhead(
    metadata: &RepoMetadata,
    entries: &[RepoEntry],
    max_tree_lines: usize,
) -> usize {
    let fixed = format!(
        "{}\n{}\n{FILES_HEADER}\n",
        metadata_section(metadata),
        tree_section(entries, max_tree_lines)
    );
    fixed.chars().count()
}

fn metadata_section(metadata: &RepoMetadata) -> String {
    let mut lines = vec![
        METADATA_HEADER.to_string(),
        format!("Name: {}", metadata.name),
    ];
    if let Some(owner) = &metadata.owner {
        lines.push(format!("Owner: {owner}"));
    }
    if let Some(description) = metadata.description.as_deref().filter(|d| !d.is_empty()) {
        lines.push(format!("Description: {description}"));
    }
    if let Some(language) = &metadata.primary_language {
        lines.push(format!("Primary Language: {language}"));
    }
    if !metadata.topics.is_empty() {
        lines.push(format!("Topics: {}", metadata.topics.join(", ")));
    }
    if metadata.stars > 0 {
        lines.push(format!("Stars: {}", metadata.stars));
    }
    lines.push(String::new());
    lines.join("\n")
}

/// One line per directory (indentation = nesting depth) with its eligible
/// files listed underneath, capped at `max_tree_lines` with an explicit
/// truncation tail.
fn tree_section(entries: &[RepoEntry], max_tree_lines: usize) -> String {
    let mut visible: Vec<&RepoEntry> = entries
        .iter()
        .filter(|e| classify(&e.path).is_eligible())
        .collect();
    visible.sort_by(|a, b| a.path.cmp(&b.path));

    let mut lines: Vec<String> = Vec::new();
    let mut seen_dirs: BTreeSet<&str> = BTreeSet::new();
    let mut capped = false;

    'outer: for entry in &visible {
        let mut depth = 0usize;
        // Emit each unseen ancestor directory before the file itself.
        for (offset, _) in entry.path.match_indices('/') {
            let dir = &entry.path[..offset];
            if seen_dirs.insert(dir) {
                if lines.len() >= max_tree_lines {
                    capped = true;
                    break 'outer;
                }
                let name = dir.rsplit('/').next().unwrap_or(dir);
                lines.push(format!("{}{name}/", "  ".repeat(depth)));
            }
            depth += 1;
        }

        if lines.len() >= max_tree_lines {
            capped = true;
            break;
        }
        let name = entry.path.rsplit('/').next().unwrap_or(&entry.path);
        let indent = "  ".repeat(depth);
        if entry.size > 0 {
            lines.push(format!("{indent}{name}  ({})", human_size(entry.size)));
        } else {
            lines.push(format!("{indent}{name}"));
        }
    }

    if capped {
        lines.push(format!(
            "  ... (truncated, {} total entries)",
            visible.len()
        ));
    }

    format!("{TREE_HEADER}\n{}\n", lines.join("\n"))
}

fn file_block(file: &PackedFile) -> String {
    if file.truncated {
        format!("--- {} (truncated) ---\n{}\n", file.path, file.content)
    } else {
        format!("--- {} ---\n{}\n", file.path, file.content)
    }
}

fn human_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
