//! End-to-end validation of Ninja file generation.
//!
//! These tests generate a Ninja file from a project tree on disk, snapshot
//! the output using `insta`, and validate it with the real `ninja`
//! executable when one is installed. The stub rules only copy files, so the
//! build is fast and deterministic.

use anyhow::{Context, Result, ensure};
use insta::{Settings, assert_snapshot};
use ninjaconf::classify::CapStdListing;
use ninjaconf::cli::OutputFormat;
use ninjaconf::layout::ProjectLayout;
use ninjaconf::runner;
use std::fs;
use test_support::{ProjectTree, ninja_available, run_ninja, write_stub_rules};

fn project() -> Result<(ProjectTree, String)> {
    let tree = ProjectTree::with_sources(
        &["video.cpp", "event.cpp", "ttf.cpp"],
        &["window_test.cpp", "threaded_window_test.cpp"],
    )?;
    tree.file("debug.hpp", "")?;
    tree.file("include/wsdl2.hpp", "")?;
    let listing = CapStdListing::open(tree.path()).context("open project")?;
    let content = runner::generate(&listing, &ProjectLayout::default(), OutputFormat::Ninja)?;
    Ok((tree, content.into_string()))
}

#[test]
fn default_layout_snapshot() -> Result<()> {
    let (_tree, ninja_content) = project()?;

    let mut settings = Settings::new();
    settings.set_snapshot_path(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/snapshots/ninja"
    ));
    settings.bind(|| {
        assert_snapshot!("default_layout_ninja", ninja_content);
    });
    Ok(())
}

#[test]
fn generated_file_builds_with_ninja() -> Result<()> {
    if !ninja_available() {
        eprintln!("skipping test: ninja must be installed for integration tests");
        return Ok(());
    }
    let (tree, ninja_content) = project()?;
    write_stub_rules(&tree)?;
    fs::write(tree.std_path().join("build.ninja"), &ninja_content).context("write ninja")?;

    run_ninja(tree.std_path(), &["-t", "query", "build/test/window_test"])?;
    run_ninja(tree.std_path(), &[])?;
    ensure!(tree.exists("build/libwsdl2.so"), "library should be linked");
    ensure!(tree.exists("build/test/window_test"), "test should be linked");

    let second = run_ninja(tree.std_path(), &["-n", "-d", "explain", "-v"])?;
    ensure!(
        second.contains("no work to do"),
        "expected no-op second pass, got:\n{second}"
    );
    Ok(())
}
