//! Error types for the runner module.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while preparing or writing the build description.
#[derive(Debug, Error, Diagnostic)]
pub enum RunnerError {
    /// The destination file could not be created, written, or moved into
    /// place. Any temporary file has already been removed.
    #[error("cannot write build description to '{}': {source}", path.display())]
    #[diagnostic(code(ninjaconf::runner::output_write_failure))]
    OutputWriteFailure {
        /// Destination that was being written.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The `-C` directory is not valid UTF-8.
    #[error("directory '{}' is not valid UTF-8", path.display())]
    #[diagnostic(code(ninjaconf::runner::non_utf8_directory))]
    NonUtf8Directory {
        /// Offending path.
        path: PathBuf,
    },
}
