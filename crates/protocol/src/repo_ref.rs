use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A validated `owner/name` repository reference.
///
/// Parses the forms users actually paste:
/// `https://github.com/{owner}/{repo}`, with or without a trailing slash or
/// `.git` suffix, plus the bare `owner/repo` slug.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RepoRefError {
    #[error("expected a github.com repository URL or an owner/name slug, got: {0}")]
    Unrecognized(String),
    #[error("invalid owner or repository name: {0}")]
    InvalidName(String),
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self, RepoRefError> {
        let owner = owner.into();
        let name = name.into();
        for part in [&owner, &name] {
            if !valid_name(part) {
                return Err(RepoRefError::InvalidName(format!("{owner}/{name}")));
            }
        }
        Ok(Self { owner, name })
    }
}

fn valid_name(part: &str) -> bool {
    !part.is_empty()
        && part
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

impl FromStr for RepoRef {
    type Err = RepoRefError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut rest = raw.trim().trim_end_matches('/');
        if let Some(stripped) = rest.strip_suffix(".git") {
            rest = stripped;
        }

        let mut had_scheme = false;
        for prefix in ["https://", "http://"] {
            if let Some(stripped) = rest.strip_prefix(prefix) {
                rest = stripped;
                had_scheme = true;
            }
        }

        let mut had_host = false;
        for host in ["www.github.com/", "github.com/"] {
            if let Some(stripped) = rest.strip_prefix(host) {
                rest = stripped;
                had_host = true;
            }
        }
        // A URL for any other host is an error, not a slug.
        if had_scheme && !had_host {
            return Err(RepoRefError::Unrecognized(raw.to_string()));
        }

        let parts: Vec<&str> = rest.split('/').filter(|p| !p.is_empty()).collect();
        let (owner, name) = match (had_host, parts.as_slice()) {
            // URL form: ignore trailing path segments such as /tree/main.
            (true, [owner, name, ..]) => (*owner, *name),
            // Bare slug: exactly owner/name.
            (false, [owner, name]) => (*owner, *name),
            _ => return Err(RepoRefError::Unrecognized(raw.to_string())),
        };
        RepoRef::new(owner, name)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(raw: &str) -> Result<RepoRef, RepoRefError> {
        raw.parse()
    }

    #[test]
    fn parses_canonical_url() {
        let r = parse("https://github.com/psf/requests").unwrap();
        assert_eq!(r.to_string(), "psf/requests");
    }

    #[test]
    fn parses_url_variants() {
        for raw in [
            "https://github.com/psf/requests/",
            "https://github.com/psf/requests.git",
            "http://github.com/psf/requests",
            "https://www.github.com/psf/requests",
            "psf/requests",
        ] {
            let r = parse(raw).unwrap_or_else(|e| panic!("{raw}: {e}"));
            assert_eq!(r.to_string(), "psf/requests", "{raw}");
        }
    }

    #[test]
    fn url_form_ignores_trailing_path_segments() {
        let r = parse("https://github.com/psf/requests/tree/main/src").unwrap();
        assert_eq!(r.to_string(), "psf/requests");
    }

    #[test]
    fn rejects_other_hosts() {
        assert!(parse("https://gitlab.com/a/b").is_err());
        assert!(parse("https://example.com/a/b").is_err());
    }

    #[test]
    fn rejects_missing_parts() {
        assert!(parse("https://github.com/onlyowner").is_err());
        assert!(parse("").is_err());
        assert!(parse("   ").is_err());
    }

    #[test]
    fn rejects_invalid_names() {
        assert_eq!(
            parse("owner/bad name"),
            Err(RepoRefError::InvalidName("owner/bad name".to_string()))
        );
    }
}
