//! Source classification.
//!
//! Scans a single directory (without descending into subdirectories) for
//! files ending in the layout's source suffix and derives the object path each
//! one compiles to. Object paths are re-rooted under the build directory while
//! keeping the directory the source was found in, so `test/foo.cpp` becomes
//! `build/test/foo.o`.
//!
//! # Examples
//!
//! ```
//! use camino::Utf8Path;
//! use ninjaconf::classify::{DirEntryInfo, DirListing, classify};
//! use ninjaconf::layout::ProjectLayout;
//!
//! struct Fixed;
//! impl DirListing for Fixed {
//!     fn list(&self, _dir: &Utf8Path) -> std::io::Result<Vec<DirEntryInfo>> {
//!         Ok(vec![DirEntryInfo::file("t1.cpp"), DirEntryInfo::file("notes.txt")])
//!     }
//! }
//!
//! let set = classify(&Fixed, &ProjectLayout::default(), Utf8Path::new("test"))?;
//! assert_eq!(set.sources(), ["test/t1.cpp"]);
//! assert_eq!(set.objects(), ["build/test/t1.o"]);
//! # Ok::<(), ninjaconf::classify::ClassifyError>(())
//! ```

mod error;
mod listing;

pub use error::ClassifyError;
pub use listing::{CapStdListing, DirEntryInfo, DirListing};

use crate::layout::{ProjectLayout, join_dir};
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashMap;
use tracing::debug;

/// Sources discovered in one directory with their object paths.
///
/// The two sequences are parallel: `objects()[i]` is compiled from
/// `sources()[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSet {
    sources: Vec<Utf8PathBuf>,
    objects: Vec<Utf8PathBuf>,
}

impl SourceSet {
    /// Source paths in discovery order.
    #[must_use]
    pub fn sources(&self) -> &[Utf8PathBuf] {
        &self.sources
    }

    /// Object paths, parallel to [`Self::sources`].
    #[must_use]
    pub fn objects(&self) -> &[Utf8PathBuf] {
        &self.objects
    }

    /// Number of sources discovered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the directory held no matching sources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Iterate over `(source, object)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (&Utf8PathBuf, &Utf8PathBuf)> {
        self.sources.iter().zip(&self.objects)
    }
}

/// Scan `dir` for sources and derive their object paths.
///
/// Entries are sorted by name so repeated runs over an unchanged tree yield
/// identical results. Non-file entries and names not ending in the source
/// suffix are ignored.
///
/// # Errors
///
/// Returns [`ClassifyError::DirectoryUnreadable`] when `dir` cannot be
/// listed, and [`ClassifyError::NamingCollision`] if two sources would share
/// an object path.
pub fn classify(
    listing: &dyn DirListing,
    layout: &ProjectLayout,
    dir: &Utf8Path,
) -> Result<SourceSet, ClassifyError> {
    let mut entries = listing
        .list(dir)
        .map_err(|source| ClassifyError::DirectoryUnreadable {
            dir: dir.to_owned(),
            source,
        })?;
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    let mut set = SourceSet::default();
    let mut claimed: HashMap<Utf8PathBuf, Utf8PathBuf> = HashMap::new();
    for entry in entries {
        if !entry.is_file {
            debug!(%dir, name = %entry.name, "skipping non-file entry");
            continue;
        }
        let Some(object) = derive_object_path(layout, dir, &entry.name) else {
            continue;
        };
        let source = join_dir(dir, &entry.name);
        if let Some(first) = claimed.get(&object) {
            return Err(ClassifyError::NamingCollision {
                object,
                first: first.clone(),
                second: source,
            });
        }
        claimed.insert(object.clone(), source.clone());
        set.sources.push(source);
        set.objects.push(object);
    }
    debug!(%dir, count = set.len(), "classified sources");
    Ok(set)
}

/// Derive the object path for `file_name` found in `dir`.
///
/// Returns `None` unless the name ends with the source suffix and has a
/// non-empty stem.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use ninjaconf::classify::derive_object_path;
/// use ninjaconf::layout::ProjectLayout;
///
/// let layout = ProjectLayout::default();
/// let object = derive_object_path(&layout, Utf8Path::new("test"), "foo.cpp");
/// assert_eq!(object.as_deref().map(|p| p.as_str()), Some("build/test/foo.o"));
/// assert!(derive_object_path(&layout, Utf8Path::new("."), "foo.hpp").is_none());
/// ```
#[must_use]
pub fn derive_object_path(
    layout: &ProjectLayout,
    dir: &Utf8Path,
    file_name: &str,
) -> Option<Utf8PathBuf> {
    let stem = file_name
        .strip_suffix(layout.source_suffix.as_str())
        .filter(|stem| !stem.is_empty())?;
    let object_name = format!("{stem}{}", layout.object_suffix);
    Some(join_dir(&layout.output_dir_for(dir), &object_name))
}

/// Derive the executable path for a test object by stripping its suffix.
///
/// Paths that do not end in the object suffix are returned unchanged.
#[must_use]
pub fn binary_path(layout: &ProjectLayout, object: &Utf8Path) -> Utf8PathBuf {
    object
        .as_str()
        .strip_suffix(layout.object_suffix.as_str())
        .map_or_else(|| object.to_owned(), Utf8PathBuf::from)
}
