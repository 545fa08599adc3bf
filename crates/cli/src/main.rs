use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Parser;
use repopack_context::{build_context, PackConfig};
use repopack_protocol::{RepoMetadata, RepoRef};
use repopack_source::{LocalRepoSource, RepoMetadataSource, RepoTreeSource, SourceError};
use std::path::PathBuf;
use std::sync::Arc;

/// Pack a repository checkout into one bounded context document for an LLM.
#[derive(Parser)]
#[command(name = "repopack", version)]
#[command(about = "Pack a repository into a bounded LLM context document", long_about = None)]
struct Cli {
    /// Path to the repository checkout to pack
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Repository this checkout came from (URL or owner/name), used to
    /// label the document
    #[arg(long)]
    repo: Option<RepoRef>,

    /// Character budget for the final document
    #[arg(long)]
    budget: Option<usize>,

    /// Maximum number of files to include
    #[arg(long)]
    max_files: Option<usize>,

    /// Emit a JSON report (document plus accounting) instead of plain text
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Metadata source that overlays a known repository reference on top of
/// whatever the local checkout can tell us about itself.
struct LabeledMetadata {
    inner: Arc<LocalRepoSource>,
    repo: RepoRef,
}

#[async_trait]
impl RepoMetadataSource for LabeledMetadata {
    async fn metadata(&self) -> Result<RepoMetadata, SourceError> {
        let mut metadata = self.inner.metadata().await?;
        metadata.name = self.repo.name.clone();
        metadata.owner = Some(self.repo.owner.clone());
        metadata.url = Some(format!("https://github.com/{}", self.repo));
        Ok(metadata)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut config = PackConfig::default();
    if let Some(budget) = cli.budget {
        config.max_context_chars = budget;
    }
    if let Some(max_files) = cli.max_files {
        config.max_files = max_files;
    }

    let source = Arc::new(
        LocalRepoSource::new(&cli.path)
            .with_context(|| format!("open repository root {}", cli.path.display()))?,
    );
    let tree: Arc<dyn RepoTreeSource> = source.clone();
    let metadata: Arc<dyn RepoMetadataSource> = match cli.repo {
        Some(repo) => Arc::new(LabeledMetadata {
            inner: source,
            repo,
        }),
        None => source,
    };

    let document = build_context(tree, metadata, &config).await?;
    log::info!(
        "packed {} files ({} omitted, {} chars)",
        document.packed_files,
        document.omitted_files,
        document.budget.used_chars
    );

    // stdout carries only the document (or the JSON report); logs go to stderr.
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        print!("{}", document.text);
    }
    Ok(())
}
