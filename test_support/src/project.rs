//! Temporary project trees.

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A temporary directory laid out like a library project.
///
/// The directory is removed when the value is dropped.
#[derive(Debug)]
pub struct ProjectTree {
    dir: TempDir,
    root: Utf8PathBuf,
}

impl ProjectTree {
    /// Create an empty project.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created or its
    /// path is not valid UTF-8.
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("create project temp dir")?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow!("temp dir {} is not UTF-8", path.display()))?;
        Ok(Self { dir, root })
    }

    /// Create a project holding `library` sources in its root and `tests`
    /// under `test/`.
    ///
    /// # Errors
    ///
    /// Returns an error if any file cannot be written.
    pub fn with_sources(library: &[&str], tests: &[&str]) -> Result<Self> {
        let tree = Self::new()?;
        for name in library {
            tree.file(name, "")?;
        }
        tree.dir("test")?;
        for name in tests {
            tree.file(&format!("test/{name}"), "")?;
        }
        Ok(tree)
    }

    /// Root of the project.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.root
    }

    /// Root of the project as a standard path.
    #[must_use]
    pub fn std_path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `rel`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its parents cannot be created.
    pub fn file(&self, rel: &str, content: &str) -> Result<Utf8PathBuf> {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        fs::write(&path, content).with_context(|| format!("write {path}"))?;
        Ok(path)
    }

    /// Create the directory `rel` and its parents.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn dir(&self, rel: &str) -> Result<Utf8PathBuf> {
        let path = self.root.join(rel);
        fs::create_dir_all(&path).with_context(|| format!("create {path}"))?;
        Ok(path)
    }

    /// Read `rel` as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn read(&self, rel: &str) -> Result<String> {
        let path = self.root.join(rel);
        fs::read_to_string(&path).with_context(|| format!("read {path}"))
    }

    /// Whether `rel` exists inside the project.
    #[must_use]
    pub fn exists(&self, rel: &str) -> bool {
        self.root.join(rel).exists()
    }
}
