//! Directory listing abstraction used by the classifier.
//!
//! The classifier only needs the names of the entries directly inside a
//! directory and whether each one is a regular file. Hiding that behind
//! [`DirListing`] lets tests feed listings without touching the disk.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::{fs, io};
use tracing::debug;

/// One entry returned by a [`DirListing`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    /// File name, without any directory component.
    pub name: String,
    /// Whether the entry is (or resolves to) a regular file.
    pub is_file: bool,
}

impl DirEntryInfo {
    /// Describe a regular file called `name`.
    #[must_use]
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_file: true,
        }
    }

    /// Describe a directory (or other non-file entry) called `name`.
    #[must_use]
    pub fn other(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_file: false,
        }
    }
}

/// Source of directory listings.
pub trait DirListing {
    /// List the entries directly inside `dir`, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns an [`io::Error`] when `dir` is missing or cannot be read.
    fn list(&self, dir: &Utf8Path) -> io::Result<Vec<DirEntryInfo>>;
}

/// [`DirListing`] backed by a `cap-std` directory handle.
///
/// Relative directories resolve against the base directory the listing was
/// opened with; absolute directories are opened directly. Symlinked entries
/// are resolved outside the capability handle, so links to shared sources
/// elsewhere on disk are still listed as files.
#[derive(Debug)]
pub struct CapStdListing {
    base: Dir,
    root: Utf8PathBuf,
}

impl CapStdListing {
    /// Open `base` as the root for relative lookups.
    ///
    /// # Errors
    ///
    /// Returns an [`io::Error`] when `base` cannot be opened.
    pub fn open(base: &Utf8Path) -> io::Result<Self> {
        Ok(Self {
            base: Dir::open_ambient_dir(base, ambient_authority())?,
            root: base.to_owned(),
        })
    }

    /// Whether the symlink `name` inside `dir` resolves to a regular file.
    ///
    /// Dangling links are reported as non-files; any other failure to
    /// resolve the target is an error.
    fn link_is_file(&self, dir: &Utf8Path, name: &str) -> io::Result<bool> {
        let path = if dir.is_absolute() {
            dir.join(name)
        } else {
            self.root.join(dir).join(name)
        };
        match fs::metadata(&path) {
            Ok(meta) => Ok(meta.is_file()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(%path, "skipping dangling symlink");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    fn open_dir(&self, dir: &Utf8Path) -> io::Result<Dir> {
        if dir.is_absolute() {
            Dir::open_ambient_dir(dir, ambient_authority())
        } else if dir.as_str().is_empty() || dir.as_str() == "." {
            self.base.try_clone()
        } else {
            self.base.open_dir(dir)
        }
    }
}

impl DirListing for CapStdListing {
    fn list(&self, dir: &Utf8Path) -> io::Result<Vec<DirEntryInfo>> {
        let handle = self.open_dir(dir)?;
        let mut entries = Vec::new();
        for next in handle.entries()? {
            let entry = next?;
            let Ok(name) = entry.file_name() else {
                debug!(%dir, "skipping entry with a non-UTF-8 name");
                continue;
            };
            let file_type = entry.file_type()?;
            let is_file = if file_type.is_symlink() {
                self.link_is_file(dir, &name)?
            } else {
                file_type.is_file()
            };
            entries.push(DirEntryInfo { name, is_file });
        }
        Ok(entries)
    }
}
