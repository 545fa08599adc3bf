//! Priority tiers for eligible paths.
//!
//! Six ordered classes; lower ranks pack first. Assignment is an ordered
//! rule table evaluated most-specific-first, ending in a catch-all, so the
//! precedence between rules is explicit and each rule is testable on its own.

/// Priority class for an eligible file. Lower rank = higher priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// Root-level README variants.
    Readme = 1,
    /// Package / dependency manifests.
    Manifest = 2,
    /// Build, tooling, and CI configuration.
    BuildConfig = 3,
    /// Recognized entry-point source files at shallow depth.
    EntryPoint = 4,
    /// Any other eligible file.
    Source = 5,
    /// Supplementary documentation (contributing, changelog, license).
    SupplementaryDoc = 6,
}

impl Tier {
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Readme => "readme",
            Tier::Manifest => "manifest",
            Tier::BuildConfig => "build-config",
            Tier::EntryPoint => "entry-point",
            Tier::Source => "source",
            Tier::SupplementaryDoc => "supplementary-doc",
        }
    }
}

/// Path features every rule predicate works from, computed once.
struct PathFacts<'a> {
    path: &'a str,
    filename_lc: String,
    stem_lc: String,
    ext_lc: Option<String>,
    /// Number of directory segments above the file (0 = repository root).
    depth: usize,
}

impl<'a> PathFacts<'a> {
    fn of(path: &'a str) -> Self {
        let filename = path.rsplit('/').next().unwrap_or(path);
        let filename_lc = filename.to_ascii_lowercase();
        let (stem_lc, ext_lc) = match filename_lc.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem.to_string(), Some(ext.to_string())),
            _ => (filename_lc.clone(), None),
        };
        Self {
            path,
            filename_lc,
            stem_lc,
            ext_lc,
            depth: path.matches('/').count(),
        }
    }

    fn is_root(&self) -> bool {
        self.depth == 0
    }
}

type TierRule = (fn(&PathFacts) -> bool, Tier);

/// Ordered most-specific-first. Supplementary docs are tested before the
/// catch-all even though their rank is lower, so `CHANGELOG.md` lands in
/// tier 6 rather than tier 5.
const TIER_RULES: &[TierRule] = &[
    (is_root_readme, Tier::Readme),
    (is_manifest, Tier::Manifest),
    (is_build_config, Tier::BuildConfig),
    (is_entry_point, Tier::EntryPoint),
    (is_supplementary_doc, Tier::SupplementaryDoc),
    (matches_everything, Tier::Source),
];

/// Assign the priority tier for an eligible path. Total and deterministic:
/// the rule table ends in a catch-all.
pub fn tier_of(path: &str) -> Tier {
    let facts = PathFacts::of(path);
    for (matches, tier) in TIER_RULES {
        if matches(&facts) {
            return *tier;
        }
    }
    Tier::Source
}

/// Sanity check on the rule table, run once at pipeline start.
pub(crate) fn validate_rules() -> Result<(), String> {
    let Some((catch_all, _)) = TIER_RULES.last() else {
        return Err("tier rule table is empty".to_string());
    };
    for probe in ["zz.unknownext", "deep/nested/dir/file", "x"] {
        if !catch_all(&PathFacts::of(probe)) {
            return Err("tier rule table must end in a catch-all".to_string());
        }
    }
    Ok(())
}

fn matches_everything(_: &PathFacts) -> bool {
    true
}

fn is_root_readme(facts: &PathFacts) -> bool {
    facts.is_root()
        && matches!(
            facts.filename_lc.as_str(),
            "readme.md" | "readme.rst" | "readme.txt" | "readme"
        )
}

fn is_manifest(facts: &PathFacts) -> bool {
    MANIFEST_FILES.contains(&facts.filename_lc.as_str())
}

fn is_build_config(facts: &PathFacts) -> bool {
    if BUILD_CONFIG_FILES.contains(&facts.filename_lc.as_str()) {
        return true;
    }
    is_ci_workflow(facts)
}

fn is_ci_workflow(facts: &PathFacts) -> bool {
    if facts.filename_lc == ".gitlab-ci.yml" {
        return true;
    }
    facts.path.starts_with(".github/workflows/")
        && matches!(facts.ext_lc.as_deref(), Some("yml") | Some("yaml"))
}

fn is_entry_point(facts: &PathFacts) -> bool {
    if facts.path == "__init__.py" {
        return true;
    }
    if facts.depth > ENTRY_POINT_MAX_DEPTH {
        return false;
    }
    let Some(ext) = facts.ext_lc.as_deref() else {
        return false;
    };
    ENTRY_POINT_STEMS.contains(&facts.stem_lc.as_str()) && SOURCE_EXTENSIONS.contains(&ext)
}

fn is_supplementary_doc(facts: &PathFacts) -> bool {
    if !facts.is_root() {
        return false;
    }
    SUPPLEMENTARY_DOC_FILES.contains(&facts.filename_lc.as_str())
        || facts.ext_lc.as_deref() == Some("md")
}

const ENTRY_POINT_MAX_DEPTH: usize = 2;

const MANIFEST_FILES: &[&str] = &[
    "package.json",
    "pyproject.toml",
    "setup.py",
    "setup.cfg",
    "requirements.txt",
    "requirements-dev.txt",
    "pipfile",
    "environment.yml",
    "cargo.toml",
    "go.mod",
    "pom.xml",
    "build.gradle",
    "build.gradle.kts",
    "gemfile",
    "composer.json",
    "mix.exs",
    "project.clj",
];

const BUILD_CONFIG_FILES: &[&str] = &[
    "dockerfile",
    "docker-compose.yml",
    "docker-compose.yaml",
    "compose.yml",
    "compose.yaml",
    ".env.example",
    ".env.sample",
    "makefile",
    "justfile",
    "taskfile.yml",
    "procfile",
    "tsconfig.json",
    "webpack.config.js",
    "vite.config.ts",
    "vite.config.js",
    "next.config.js",
    "next.config.mjs",
    "rollup.config.js",
    "babel.config.js",
    ".babelrc",
    "jest.config.js",
    "jest.config.ts",
    "vitest.config.ts",
    "tox.ini",
    "noxfile.py",
    "vercel.json",
    "netlify.toml",
    "fly.toml",
    "render.yaml",
    "app.yaml",
    "serverless.yml",
    "cdk.json",
];

const ENTRY_POINT_STEMS: &[&str] = &[
    "main", "app", "index", "server", "cli", "run", "manage", "__main__", "wsgi", "asgi",
];

const SOURCE_EXTENSIONS: &[&str] = &[
    "py", "js", "mjs", "cjs", "ts", "jsx", "tsx", "go", "rs", "rb", "java", "kt", "c", "cpp",
    "h", "hpp", "cs", "swift", "scala", "clj", "ex", "exs", "php", "lua", "r", "jl", "sh",
    "bash", "zsh", "fish", "sql", "graphql", "gql", "proto",
];

const SUPPLEMENTARY_DOC_FILES: &[&str] = &[
    "contributing.md",
    "changelog.md",
    "changes.md",
    "history.md",
    "authors.md",
    "code_of_conduct.md",
    "security.md",
    "license",
    "license.md",
    "license.txt",
    "notice",
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn root_readme_is_tier_one_nested_is_not() {
        assert_eq!(tier_of("README.md"), Tier::Readme);
        assert_eq!(tier_of("readme.rst"), Tier::Readme);
        assert_eq!(tier_of("docs/README.md"), Tier::Source);
    }

    #[test]
    fn manifests_match_at_any_depth() {
        assert_eq!(tier_of("package.json"), Tier::Manifest);
        assert_eq!(tier_of("backend/Cargo.toml"), Tier::Manifest);
        assert_eq!(tier_of("go.mod"), Tier::Manifest);
    }

    #[test]
    fn build_and_ci_config_is_tier_three() {
        assert_eq!(tier_of("Dockerfile"), Tier::BuildConfig);
        assert_eq!(tier_of("Makefile"), Tier::BuildConfig);
        assert_eq!(tier_of("tsconfig.json"), Tier::BuildConfig);
        assert_eq!(tier_of(".github/workflows/ci.yml"), Tier::BuildConfig);
        assert_eq!(tier_of(".gitlab-ci.yml"), Tier::BuildConfig);
        // Non-workflow yaml under .github stays general-purpose.
        assert_eq!(tier_of(".github/dependabot.yml"), Tier::Source);
    }

    #[test]
    fn entry_points_require_shallow_depth_and_source_extension() {
        assert_eq!(tier_of("main.py"), Tier::EntryPoint);
        assert_eq!(tier_of("src/index.ts"), Tier::EntryPoint);
        assert_eq!(tier_of("cmd/app/main.go"), Tier::EntryPoint);
        assert_eq!(tier_of("__init__.py"), Tier::EntryPoint);
        assert_eq!(tier_of("a/b/c/main.py"), Tier::Source);
        assert_eq!(tier_of("main.txt"), Tier::Source);
    }

    #[test]
    fn supplementary_docs_are_tier_six_at_root_only() {
        assert_eq!(tier_of("CONTRIBUTING.md"), Tier::SupplementaryDoc);
        assert_eq!(tier_of("LICENSE"), Tier::SupplementaryDoc);
        assert_eq!(tier_of("ARCHITECTURE.md"), Tier::SupplementaryDoc);
        assert_eq!(tier_of("docs/CONTRIBUTING.md"), Tier::Source);
    }

    #[test]
    fn everything_else_is_tier_five() {
        assert_eq!(tier_of("src/lib.rs"), Tier::Source);
        assert_eq!(tier_of("scripts/deploy"), Tier::Source);
        assert_eq!(tier_of("docs/guide.txt"), Tier::Source);
    }

    #[test]
    fn assignment_is_idempotent_and_order_independent() {
        let paths = ["README.md", "src/lib.rs", "package.json", "LICENSE"];
        let first: Vec<Tier> = paths.iter().map(|p| tier_of(p)).collect();
        let second: Vec<Tier> = paths.iter().rev().map(|p| tier_of(p)).collect();
        let second_reversed: Vec<Tier> = second.into_iter().rev().collect();
        assert_eq!(first, second_reversed);
        for path in paths {
            assert_eq!(tier_of(path), tier_of(path));
        }
    }

    #[test]
    fn rule_table_is_well_formed() {
        validate_rules().unwrap();
    }
}
