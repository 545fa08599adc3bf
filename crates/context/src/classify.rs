//! Path eligibility: a pure denylist over the path string alone.
//!
//! Rules run in precedence order (vendor directory, binary extension, lock
//! file, IDE artifact); the first hit wins. Anything that matches nothing is
//! eligible, so unknown-but-plausible files are never dropped.

/// Why a path was excluded from packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    VendorDir,
    BinaryExtension,
    LockFile,
    IdeArtifact,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::VendorDir => "vendor-dir",
            SkipReason::BinaryExtension => "binary-extension",
            SkipReason::LockFile => "lock-file",
            SkipReason::IdeArtifact => "ide-artifact",
        }
    }
}

/// Eligibility decision for one repo-relative path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Eligible,
    Skipped(SkipReason),
}

impl Classification {
    pub fn is_eligible(self) -> bool {
        matches!(self, Classification::Eligible)
    }
}

/// Decide whether a path belongs in the context document at all.
pub fn classify(path: &str) -> Classification {
    let mut segments = path.split('/').peekable();
    let mut filename = "";
    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            filename = segment;
            break;
        }
        // Directory segments match whole and case-sensitive: `node_modules`
        // is generated output, `Node_modules` is somebody's source tree.
        if SKIP_DIRS.contains(&segment) {
            return Classification::Skipped(SkipReason::VendorDir);
        }
    }

    let ext = filename
        .rsplit_once('.')
        .map(|(stem, ext)| (stem, ext.to_ascii_lowercase()));

    if let Some((stem, ext)) = &ext {
        if SKIP_EXTENSIONS.contains(&ext.as_str()) {
            return Classification::Skipped(SkipReason::BinaryExtension);
        }
        // Minified bundles hide behind a double extension.
        let stem_lc = stem.to_ascii_lowercase();
        if stem_lc.ends_with(".min") && matches!(ext.as_str(), "js" | "css") {
            return Classification::Skipped(SkipReason::BinaryExtension);
        }
    }

    if LOCK_FILES.contains(&filename) || matches!(&ext, Some((_, e)) if e == "lock") {
        return Classification::Skipped(SkipReason::LockFile);
    }

    if IDE_FILENAMES
        .iter()
        .any(|candidate| filename.eq_ignore_ascii_case(candidate))
        || matches!(&ext, Some((_, e)) if IDE_EXTENSIONS.contains(&e.as_str()))
    {
        return Classification::Skipped(SkipReason::IdeArtifact);
    }

    Classification::Eligible
}

/// Sanity check on the static tables, run once at pipeline start.
pub(crate) fn validate_tables() -> Result<(), String> {
    for (name, table) in [
        ("skip directories", SKIP_DIRS),
        ("binary extensions", SKIP_EXTENSIONS),
        ("lock files", LOCK_FILES),
        ("ide artifacts", IDE_FILENAMES),
    ] {
        if table.is_empty() {
            return Err(format!("classifier table is empty: {name}"));
        }
    }
    Ok(())
}

/// Generated, vendored, or cache directories that never carry signal.
const SKIP_DIRS: &[&str] = &[
    // Dependency caches / vendored trees
    "node_modules",
    "vendor",
    "third_party",
    "third-party",
    "site-packages",
    "bower_components",
    // Build output
    "dist",
    "build",
    "out",
    "bin",
    "obj",
    "target",
    ".next",
    ".nuxt",
    ".output",
    // VCS internals
    ".git",
    ".hg",
    ".svn",
    // Caches
    "__pycache__",
    ".cache",
    ".tox",
    ".nox",
    ".mypy_cache",
    ".ruff_cache",
    ".pytest_cache",
    ".eggs",
    "eggs",
    ".gradle",
    ".terraform",
    // Virtualenvs
    ".venv",
    "venv",
    "env",
    ".env",
    // Coverage output
    "coverage",
    "htmlcov",
    // IDE state
    ".idea",
    ".vscode",
];

/// Binary / media / archive / compiled-artifact extensions (lowercase).
const SKIP_EXTENSIONS: &[&str] = &[
    // Images
    "png", "jpg", "jpeg", "gif", "ico", "svg", "bmp", "webp", "tiff",
    // Fonts
    "woff", "woff2", "ttf", "otf", "eot",
    // Compiled artifacts
    "pyc", "pyo", "pyd", "so", "dll", "exe", "o", "a", "lib", "class", "jar", "war", "ear",
    "wasm",
    // Archives
    "zip", "tar", "gz", "bz2", "xz", "rar", "7z",
    // Media
    "mp3", "mp4", "avi", "mov", "wav", "flac",
    // Binary documents
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx",
    // Databases
    "sqlite", "sqlite3", "db",
    // Source maps
    "map",
];

/// Dependency lock manifests, matched by exact filename.
const LOCK_FILES: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "bun.lockb",
    "Pipfile.lock",
    "poetry.lock",
    "uv.lock",
    "Cargo.lock",
    "composer.lock",
    "Gemfile.lock",
    "go.sum",
    "flake.lock",
];

const IDE_FILENAMES: &[&str] = &[
    ".editorconfig",
    ".gitattributes",
    ".browserslistrc",
    ".DS_Store",
    "Thumbs.db",
];

const IDE_EXTENSIONS: &[&str] = &["iml", "swp", "swo", "suo"];
