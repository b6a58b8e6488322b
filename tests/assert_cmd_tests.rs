//! Integration tests for CLI execution using `assert_cmd`.
//!
//! These tests invoke the compiled binary against temporary project trees
//! and verify the written build description, stdout streaming, and failure
//! behaviour.

use anyhow::{Context, Result, ensure};
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use test_support::ProjectTree;

fn ninjaconf() -> Result<Command> {
    let mut cmd = Command::cargo_bin("ninjaconf").context("locate ninjaconf binary")?;
    for var in [
        "NINJACONF_DIRECTORY",
        "NINJACONF_OUTPUT",
        "NINJACONF_FORMAT",
        "NINJACONF_SOURCE_DIR",
        "NINJACONF_TEST_DIR",
        "NINJACONF_BUILD_DIR",
        "NINJACONF_LIBRARY",
        "NINJACONF_RULES",
        "NINJACONF_SOURCE_SUFFIX",
        "NINJACONF_OBJECT_SUFFIX",
    ] {
        cmd.env_remove(var);
    }
    Ok(cmd)
}

#[test]
fn default_run_writes_build_ninja() -> Result<()> {
    let tree = ProjectTree::with_sources(&["a.cpp", "b.cpp", "debug.hpp"], &["t1.cpp"])?;
    ninjaconf()?.current_dir(tree.std_path()).assert().success();

    let ninja = tree.read("build.ninja")?;
    ensure!(
        ninja.starts_with("include ninja/rules.ninja\n"),
        "rules include should come first, got:\n{ninja}"
    );
    for line in [
        "build build: mkdir",
        "build build/test: mkdir",
        "build build/a.o: compile a.cpp",
        "build build/b.o: compile b.cpp",
        "build build/libwsdl2.so: link-shared build/a.o build/b.o",
        "build build/test/t1.o: compile test/t1.cpp",
        "build build/test/t1: link build/test/t1.o | build/libwsdl2.so",
        "  lflags = $lflags build/libwsdl2.so",
    ] {
        ensure!(ninja.contains(line), "missing `{line}` in:\n{ninja}");
    }
    ensure!(!ninja.contains("debug"), "headers must not be compiled");
    Ok(())
}

#[test]
fn dash_output_streams_to_stdout() -> Result<()> {
    let tree = ProjectTree::with_sources(&["a.cpp"], &[])?;
    ninjaconf()?
        .current_dir(tree.std_path())
        .args(["-o", "-"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "build build/libwsdl2.so: link-shared build/a.o",
        ));
    ensure!(!tree.exists("-"), "`-o -` must not create a file named '-'");
    ensure!(!tree.exists("build.ninja"), "`-o -` must not write build.ninja");
    Ok(())
}

#[test]
fn directory_flag_resolves_sources_and_output() -> Result<()> {
    let outer = ProjectTree::new()?;
    outer.file("work/a.cpp", "")?;
    outer.file("work/test/t1.cpp", "")?;

    ninjaconf()?
        .current_dir(outer.std_path())
        .args(["-C", "work", "-o", "out.ninja"])
        .assert()
        .success();

    ensure!(outer.exists("work/out.ninja"), "output should land under -C");
    ensure!(!outer.exists("out.ninja"), "output must not escape -C");
    let ninja = outer.read("work/out.ninja")?;
    ensure!(ninja.contains("build build/a.o: compile a.cpp"), "got:\n{ninja}");
    Ok(())
}

#[test]
fn environment_configures_layout() -> Result<()> {
    let tree = ProjectTree::new()?;
    tree.file("main.cc", "")?;
    tree.file("tests/smoke.cc", "")?;

    ninjaconf()?
        .current_dir(tree.std_path())
        .env("NINJACONF_TEST_DIR", "tests")
        .env("NINJACONF_SOURCE_SUFFIX", ".cc")
        .env("NINJACONF_LIBRARY", "engine")
        .args(["--build-dir", "out"])
        .assert()
        .success();

    let ninja = tree.read("build.ninja")?;
    for line in [
        "build out/tests: mkdir",
        "build out/main.o: compile main.cc",
        "build out/libengine.so: link-shared out/main.o",
        "build out/tests/smoke: link out/tests/smoke.o | out/libengine.so",
    ] {
        ensure!(ninja.contains(line), "missing `{line}` in:\n{ninja}");
    }
    Ok(())
}

#[test]
fn json_format_writes_structured_graph() -> Result<()> {
    let tree = ProjectTree::with_sources(&["a.cpp"], &["t1.cpp"])?;
    ninjaconf()?
        .current_dir(tree.std_path())
        .args(["--format", "json", "-o", "graph.json"])
        .assert()
        .success();

    let value: serde_json::Value =
        serde_json::from_str(&tree.read("graph.json")?).context("parse graph.json")?;
    ensure!(value["include"] == "ninja/rules.ninja", "got {value}");
    let last = &value["edges"][5];
    ensure!(last["rule"] == "link", "got {last}");
    ensure!(last["variables"]["lflags"] == "$lflags build/libwsdl2.so", "got {last}");
    Ok(())
}

#[test]
fn missing_test_directory_fails_without_output() -> Result<()> {
    let tree = ProjectTree::new()?;
    tree.file("a.cpp", "")?;
    tree.file("build.ninja", "previous\n")?;

    ninjaconf()?
        .current_dir(tree.std_path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read source directory 'test'"));

    ensure!(
        tree.read("build.ninja")? == "previous\n",
        "a failed run must leave the existing build file untouched"
    );
    Ok(())
}

#[test]
fn unwritable_destination_fails() -> Result<()> {
    let tree = ProjectTree::with_sources(&["a.cpp"], &[])?;
    ninjaconf()?
        .current_dir(tree.std_path())
        .args(["-o", "missing/dir/build.ninja"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot write build description"));
    ensure!(!tree.exists("missing"), "no directories should be created");
    Ok(())
}

#[test]
fn invalid_suffix_is_rejected() -> Result<()> {
    let tree = ProjectTree::with_sources(&[], &[])?;
    ninjaconf()?
        .current_dir(tree.std_path())
        .args(["--source-suffix", "cpp"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must start with '.'"));
    ensure!(
        !tree.std_path().join("build.ninja").exists(),
        "argument errors must not write output"
    );
    Ok(())
}

#[test]
fn parent_directory_options_are_rejected() -> Result<()> {
    let outer = ProjectTree::new()?;
    outer.file("lib/x.cpp", "")?;
    outer.file("proj/test/t1.cpp", "")?;
    ninjaconf()?
        .current_dir(outer.std_path().join("proj"))
        .env("NINJACONF_SOURCE_DIR", "../lib")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not contain '..'"));
    ensure!(
        !outer.exists("proj/build.ninja"),
        "argument errors must not write output"
    );
    Ok(())
}

#[test]
fn rerun_produces_identical_file() -> Result<()> {
    let tree = ProjectTree::with_sources(&["b.cpp", "a.cpp"], &["t2.cpp", "t1.cpp"])?;
    ninjaconf()?.current_dir(tree.std_path()).assert().success();
    let first = fs::read(tree.std_path().join("build.ninja")).context("read first")?;
    ninjaconf()?.current_dir(tree.std_path()).assert().success();
    let second = fs::read(tree.std_path().join("build.ninja")).context("read second")?;
    ensure!(first == second, "output must be byte-identical across runs");
    Ok(())
}
