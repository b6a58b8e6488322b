//! Output helpers for the runner.
//!
//! Files are replaced atomically: content goes to a temporary file in the
//! destination directory, which is synced and then renamed over the target.
//! A failed run therefore never leaves a truncated build file behind.

use super::{BuildContent, RunnerError};
use std::io::{self, Write};
use std::path::Path;
use tempfile::{Builder, NamedTempFile};
use tracing::{debug, info};

/// Return `true` when `path` is the CLI sentinel indicating "write to stdout".
#[must_use]
pub(super) fn is_stdout_path(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Atomically replace `path` with `content`.
///
/// # Errors
///
/// Returns [`RunnerError::OutputWriteFailure`] when the temporary file
/// cannot be created, written, or renamed into place.
pub(super) fn write_atomic(path: &Path, content: &BuildContent) -> Result<(), RunnerError> {
    let failure = |source: io::Error| RunnerError::OutputWriteFailure {
        path: path.to_path_buf(),
        source,
    };
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = Builder::new()
        .prefix(".ninjaconf.")
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(failure)?;
    fill(&mut tmp, content).map_err(failure)?;
    debug!(tmp = %tmp.path().display(), "wrote temporary build description");
    tmp.persist(path).map_err(|err| failure(err.error))?;
    info!("Wrote build description to {}", path.display());
    Ok(())
}

fn fill(tmp: &mut NamedTempFile, content: &BuildContent) -> io::Result<()> {
    let handle = tmp.as_file_mut();
    handle.write_all(content.as_str().as_bytes())?;
    handle.flush()?;
    // Temporary files are created owner-only; the build file should carry
    // ordinary permissions.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        handle.set_permissions(std::fs::Permissions::from_mode(0o644))?;
    }
    handle.sync_all()
}

fn is_broken_pipe(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::BrokenPipe
}

/// Write `content` to standard output, treating a closed pipe as success.
///
/// # Errors
///
/// Returns an [`io::Error`] for failures other than a broken pipe.
pub(super) fn write_stdout(content: &BuildContent) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    match stdout
        .write_all(content.as_str().as_bytes())
        .and_then(|()| stdout.flush())
    {
        Err(err) if is_broken_pipe(&err) => Ok(()),
        other => other,
    }
}
