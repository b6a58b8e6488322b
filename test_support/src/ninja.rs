//! Helpers for validating generated files with a real `ninja`.

use anyhow::{Context, Result, ensure};
use std::path::Path;
use std::process::Command;

use crate::ProjectTree;

/// Rule templates matching the names the generator references.
///
/// Each rule only creates its output, so a build needs no compiler.
pub const STUB_RULES: &str = concat!(
    "lflags =\n\n",
    "rule mkdir\n",
    "  command = mkdir -p $out\n\n",
    "rule compile\n",
    "  command = cp $in $out\n\n",
    "rule link-shared\n",
    "  command = cat $in > $out\n\n",
    "rule link\n",
    "  command = cat $in $lflags > $out\n\n",
);

/// Whether a working `ninja` executable is on `PATH`.
#[must_use]
pub fn ninja_available() -> bool {
    Command::new("ninja")
        .arg("--version")
        .output()
        .is_ok_and(|out| out.status.success())
}

/// Write [`STUB_RULES`] to `ninja/rules.ninja` inside `tree`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_stub_rules(tree: &ProjectTree) -> Result<()> {
    tree.file("ninja/rules.ninja", STUB_RULES)?;
    Ok(())
}

/// Run `ninja` in `dir` with `args`, returning its standard output.
///
/// # Errors
///
/// Returns an error if `ninja` cannot be spawned or exits unsuccessfully.
pub fn run_ninja(dir: &Path, args: &[&str]) -> Result<String> {
    let out = Command::new("ninja")
        .args(args)
        .current_dir(dir)
        .output()
        .context("spawn ninja")?;
    ensure!(
        out.status.success(),
        "ninja {args:?} failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8(out.stdout).context("ninja stdout is not UTF-8")
}
