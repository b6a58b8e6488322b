//! Generation-run orchestration.
//!
//! This module keeps `main` minimal by providing a single entry point: scan
//! the library and test directories, assemble the build graph, serialize it,
//! and write the result. Nothing is written unless every earlier step
//! succeeds.

mod error;
mod output;

pub use error::RunnerError;

use crate::classify::{CapStdListing, ClassifyError, DirListing, classify};
use crate::cli::{Cli, OutputFormat};
use crate::ir::BuildGraph;
use crate::layout::ProjectLayout;
use crate::{json_gen, ninja_gen};
use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, info};

/// Wrapper around a serialized build description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContent(String);

impl BuildContent {
    /// Store the provided build description.
    #[must_use]
    pub const fn new(content: String) -> Self {
        Self(content)
    }

    /// Borrow the underlying text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Execute one generation run described by `cli`.
///
/// # Errors
///
/// Returns an error if a source directory cannot be read, the graph cannot
/// be assembled, or the output cannot be written.
pub fn run(cli: &Cli) -> Result<()> {
    let layout = cli.layout();
    let base = resolve_base_dir(cli)?;
    let listing = CapStdListing::open(&base)
        .map_err(|source| ClassifyError::DirectoryUnreadable {
            dir: base.clone(),
            source,
        })
        .context("opening project directory")?;

    let content = generate(&listing, &layout, cli.format)?;

    if output::is_stdout_path(&cli.output) {
        output::write_stdout(&content).context("writing build description to stdout")?;
    } else {
        let path = resolve_output_path(cli, &cli.output);
        output::write_atomic(&path, &content)?;
    }
    Ok(())
}

/// Scan the layout's directories through `listing` and serialize the graph.
///
/// # Errors
///
/// Returns an error if classification or graph assembly fails, or if JSON
/// serialization fails.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use ninjaconf::classify::{DirEntryInfo, DirListing};
/// use ninjaconf::cli::OutputFormat;
/// use ninjaconf::layout::ProjectLayout;
/// use ninjaconf::runner::generate;
///
/// struct Tree;
/// impl DirListing for Tree {
///     fn list(&self, dir: &Utf8Path) -> std::io::Result<Vec<DirEntryInfo>> {
///         Ok(match dir.as_str() {
///             "." => vec![DirEntryInfo::file("a.cpp"), DirEntryInfo::other("test")],
///             _ => vec![DirEntryInfo::file("t1.cpp")],
///         })
///     }
/// }
///
/// let ninja = generate(&Tree, &ProjectLayout::default(), OutputFormat::Ninja)?;
/// assert!(ninja.as_str().contains("build build/test/t1: link build/test/t1.o"));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn generate(
    listing: &dyn DirListing,
    layout: &ProjectLayout,
    format: OutputFormat,
) -> Result<BuildContent> {
    let library = classify(listing, layout, &layout.source_dir).with_context(|| {
        format!("classifying library sources in '{}'", layout.source_dir)
    })?;
    let tests = classify(listing, layout, &layout.test_dir)
        .with_context(|| format!("classifying test sources in '{}'", layout.test_dir))?;
    let graph =
        BuildGraph::from_sources(layout, &library, &tests).context("building graph")?;

    let text = match format {
        OutputFormat::Ninja => ninja_gen::generate(&graph),
        OutputFormat::Json => json_gen::generate(&graph).context("serialising build graph")?,
    };
    debug!(bytes = text.len(), ?format, "serialized build description");
    Ok(BuildContent::new(text))
}

/// Directory that relative source directories resolve against.
fn resolve_base_dir(cli: &Cli) -> Result<Utf8PathBuf, RunnerError> {
    let Some(dir) = &cli.directory else {
        return Ok(Utf8PathBuf::from("."));
    };
    let base = Utf8PathBuf::from_path_buf(dir.clone())
        .map_err(|path| RunnerError::NonUtf8Directory { path })?;
    info!(directory = %base, "using project directory");
    Ok(base)
}

/// Resolve an output path relative to the CLI working directory.
fn resolve_output_path<'a>(cli: &Cli, path: &'a Path) -> Cow<'a, Path> {
    match &cli.directory {
        Some(dir) if path.is_relative() => Cow::Owned(dir.join(path)),
        _ => Cow::Borrowed(path),
    }
}
