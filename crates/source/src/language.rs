use crate::RepoEntry;
use std::collections::HashMap;

/// Guess the repository's primary language from a file listing.
///
/// Counts files per recognized source extension and returns the most common
/// language, ties broken alphabetically so the answer is stable across runs.
pub fn primary_language(entries: &[RepoEntry]) -> Option<String> {
    let mut counts: HashMap<&'static str, usize> = HashMap::new();
    for entry in entries {
        let ext = entry.path.rsplit_once('.').map(|(_, ext)| ext);
        let Some(language) = ext.and_then(language_for_extension) else {
            continue;
        };
        *counts.entry(language).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(language, _)| language.to_string())
}

fn language_for_extension(ext: &str) -> Option<&'static str> {
    let language = match ext.to_ascii_lowercase().as_str() {
        "rs" => "Rust",
        "py" | "pyw" => "Python",
        "js" | "mjs" | "cjs" | "jsx" => "JavaScript",
        "ts" | "tsx" => "TypeScript",
        "go" => "Go",
        "java" => "Java",
        "kt" | "kts" => "Kotlin",
        "c" | "h" => "C",
        "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" => "C++",
        "cs" => "C#",
        "rb" => "Ruby",
        "swift" => "Swift",
        "php" => "PHP",
        "scala" => "Scala",
        "ex" | "exs" => "Elixir",
        "lua" => "Lua",
        _ => return None,
    };
    Some(language)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entries(paths: &[&str]) -> Vec<RepoEntry> {
        paths.iter().map(|p| RepoEntry::new(*p, 10)).collect()
    }

    #[test]
    fn picks_most_common_source_extension() {
        let listing = entries(&["src/a.rs", "src/b.rs", "scripts/x.py", "README.md"]);
        assert_eq!(primary_language(&listing), Some("Rust".to_string()));
    }

    #[test]
    fn none_when_no_source_files() {
        let listing = entries(&["README.md", "LICENSE", "docs/guide.txt"]);
        assert_eq!(primary_language(&listing), None);
    }

    #[test]
    fn ties_break_alphabetically() {
        let listing = entries(&["a.rs", "b.py"]);
        assert_eq!(primary_language(&listing), Some("Python".to_string()));
    }
}
