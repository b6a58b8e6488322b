//! Error types for source classification.

use camino::Utf8PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while scanning a directory for sources.
#[derive(Debug, Error, Diagnostic)]
pub enum ClassifyError {
    /// The directory could not be opened or listed.
    #[error("cannot read source directory '{dir}': {source}")]
    #[diagnostic(
        code(ninjaconf::classify::directory_unreadable),
        help("check that the directory exists and is readable")
    )]
    DirectoryUnreadable {
        /// Directory that failed to list.
        dir: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Two sources derived the same object path.
    #[error("sources '{first}' and '{second}' both map to object '{object}'")]
    #[diagnostic(code(ninjaconf::classify::naming_collision))]
    NamingCollision {
        /// Object path claimed twice.
        object: Utf8PathBuf,
        /// Source discovered first.
        first: Utf8PathBuf,
        /// Source that collided with it.
        second: Utf8PathBuf,
    },
}
