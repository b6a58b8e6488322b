//! Project layout configuration.
//!
//! A [`ProjectLayout`] names the directories scanned for sources, the build
//! output root, and the naming conventions used to derive artifact paths. The
//! defaults describe the conventional layout: library sources in the project
//! root, tests under `test/`, and artefacts under `build/`.
//!
//! # Examples
//!
//! ```
//! use ninjaconf::layout::ProjectLayout;
//!
//! let layout = ProjectLayout::default();
//! assert_eq!(layout.library_artifact(), "build/libwsdl2.so");
//! assert_eq!(layout.test_build_dir(), "build/test");
//! ```

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

/// Default library root, scanned non-recursively.
pub const DEFAULT_SOURCE_DIR: &str = ".";
/// Default test directory.
pub const DEFAULT_TEST_DIR: &str = "test";
/// Default build-output root.
pub const DEFAULT_BUILD_DIR: &str = "build";
/// Default library name, giving `lib<name>.so`.
pub const DEFAULT_LIBRARY: &str = "wsdl2";
/// Default rule-template file included by the generated manifest.
pub const DEFAULT_RULES: &str = "ninja/rules.ninja";
/// Default suffix identifying compilable sources.
pub const DEFAULT_SOURCE_SUFFIX: &str = ".cpp";
/// Default suffix given to compiled objects.
pub const DEFAULT_OBJECT_SUFFIX: &str = ".o";
/// Default name of the generated build file.
pub const DEFAULT_OUTPUT: &str = "build.ninja";

/// Directory names and naming conventions for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Directory scanned for library sources.
    pub source_dir: Utf8PathBuf,
    /// Directory scanned for test sources.
    pub test_dir: Utf8PathBuf,
    /// Root of all build outputs.
    pub build_dir: Utf8PathBuf,
    /// Library name without the `lib` prefix or `.so` extension.
    pub library: String,
    /// Rule-template file referenced by the `include` directive.
    pub rules: Utf8PathBuf,
    /// Suffix a file name must end with to be compiled.
    pub source_suffix: String,
    /// Suffix replacing [`Self::source_suffix`] in object paths.
    pub object_suffix: String,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            source_dir: Utf8PathBuf::from(DEFAULT_SOURCE_DIR),
            test_dir: Utf8PathBuf::from(DEFAULT_TEST_DIR),
            build_dir: Utf8PathBuf::from(DEFAULT_BUILD_DIR),
            library: DEFAULT_LIBRARY.to_owned(),
            rules: Utf8PathBuf::from(DEFAULT_RULES),
            source_suffix: DEFAULT_SOURCE_SUFFIX.to_owned(),
            object_suffix: DEFAULT_OBJECT_SUFFIX.to_owned(),
        }
    }
}

impl ProjectLayout {
    /// Normalized build-output root.
    #[must_use]
    pub fn build_root(&self) -> Utf8PathBuf {
        join_dir(&self.build_dir, "")
    }

    /// Path of the shared library produced from the library sources.
    #[must_use]
    pub fn library_artifact(&self) -> Utf8PathBuf {
        join_dir(&self.build_dir, &format!("lib{}.so", self.library))
    }

    /// Build-output directory mirroring [`Self::test_dir`].
    #[must_use]
    pub fn test_build_dir(&self) -> Utf8PathBuf {
        join_dir(&self.build_dir, self.test_dir.as_str())
    }

    /// Build-output directory mirroring `dir`.
    #[must_use]
    pub fn output_dir_for(&self, dir: &Utf8Path) -> Utf8PathBuf {
        join_dir(&self.build_dir, dir.as_str())
    }
}

/// Join `name` onto `dir`, eliding `.` and empty components.
///
/// Keeps `build/./a.o` from leaking into the generated file; both the
/// directory and the name may contain several segments.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use ninjaconf::layout::join_dir;
///
/// assert_eq!(join_dir(Utf8Path::new("build"), "./a.o"), "build/a.o");
/// assert_eq!(join_dir(Utf8Path::new("."), "a.cpp"), "a.cpp");
/// ```
#[must_use]
pub fn join_dir(dir: &Utf8Path, name: &str) -> Utf8PathBuf {
    let segments = dir
        .as_str()
        .split('/')
        .chain(name.split('/'))
        .filter(|segment| !segment.is_empty() && *segment != ".");
    let mut joined = String::new();
    if dir.as_str().starts_with('/') {
        joined.push('/');
    }
    for (idx, segment) in segments.enumerate() {
        if idx > 0 {
            joined.push('/');
        }
        joined.push_str(segment);
    }
    if joined.is_empty() {
        joined.push('.');
    }
    Utf8PathBuf::from(joined)
}

/// Validate a suffix supplied on the command line or environment.
///
/// # Errors
///
/// Returns a message when the suffix is empty, lacks a leading `.`, or
/// contains a path separator.
pub fn validate_suffix(raw: &str) -> Result<String, String> {
    if raw.len() < 2 || !raw.starts_with('.') {
        return Err(format!("suffix '{raw}' must start with '.' and name an extension"));
    }
    if raw.contains('/') {
        return Err(format!("suffix '{raw}' must not contain '/'"));
    }
    Ok(raw.to_owned())
}

/// Validate a directory supplied on the command line or environment.
///
/// Directories are mirrored under the build root, so a `..` component would
/// place outputs outside it.
///
/// # Errors
///
/// Returns a message when the path contains a `..` component.
pub fn validate_dir(raw: &str) -> Result<Utf8PathBuf, String> {
    let path = Utf8Path::new(raw);
    if path
        .components()
        .any(|component| matches!(component, Utf8Component::ParentDir))
    {
        return Err(format!("directory '{raw}' must not contain '..'"));
    }
    Ok(path.to_owned())
}

/// Validate a library name supplied on the command line or environment.
///
/// # Errors
///
/// Returns a message when the name is empty or contains a path separator.
pub fn validate_library(raw: &str) -> Result<String, String> {
    if raw.is_empty() {
        return Err("library name must not be empty".to_owned());
    }
    if raw.contains('/') {
        return Err(format!("library name '{raw}' must not contain '/'"));
    }
    Ok(raw.to_owned())
}
