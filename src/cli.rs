//! Command line interface definition using clap.
//!
//! This module defines the [`Cli`] structure. Every option defaults to the
//! conventional project layout, so running `ninjaconf` with no arguments in
//! the project root writes `build.ninja`. Each option may also be supplied
//! through a `NINJACONF_*` environment variable; explicit flags win.

use crate::layout::{
    DEFAULT_BUILD_DIR, DEFAULT_LIBRARY, DEFAULT_OBJECT_SUFFIX, DEFAULT_OUTPUT, DEFAULT_RULES,
    DEFAULT_SOURCE_DIR, DEFAULT_SOURCE_SUFFIX, DEFAULT_TEST_DIR, ProjectLayout, validate_dir,
    validate_library, validate_suffix,
};
use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Serialization used for the generated build description.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// A Ninja build file.
    #[default]
    Ninja,
    /// The build graph as JSON.
    Json,
}

/// Generate a Ninja build file for a native library and its tests.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if started in this directory.
    ///
    /// Source directories and relative output paths resolve against it.
    #[arg(short = 'C', long, value_name = "DIR", env = "NINJACONF_DIRECTORY")]
    pub directory: Option<PathBuf>,

    /// Write the build description here; `-` writes to standard output.
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = DEFAULT_OUTPUT,
        env = "NINJACONF_OUTPUT"
    )]
    pub output: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t, env = "NINJACONF_FORMAT")]
    pub format: OutputFormat,

    /// Directory scanned for library sources.
    #[arg(
        long,
        value_name = "DIR",
        default_value = DEFAULT_SOURCE_DIR,
        value_parser = validate_dir,
        env = "NINJACONF_SOURCE_DIR"
    )]
    pub source_dir: Utf8PathBuf,

    /// Directory scanned for test sources.
    #[arg(
        long,
        value_name = "DIR",
        default_value = DEFAULT_TEST_DIR,
        value_parser = validate_dir,
        env = "NINJACONF_TEST_DIR"
    )]
    pub test_dir: Utf8PathBuf,

    /// Root directory for build outputs.
    #[arg(
        long,
        value_name = "DIR",
        default_value = DEFAULT_BUILD_DIR,
        value_parser = validate_dir,
        env = "NINJACONF_BUILD_DIR"
    )]
    pub build_dir: Utf8PathBuf,

    /// Library name; the artifact is `lib<NAME>.so`.
    #[arg(
        long,
        value_name = "NAME",
        default_value = DEFAULT_LIBRARY,
        value_parser = validate_library,
        env = "NINJACONF_LIBRARY"
    )]
    pub library: String,

    /// Rule-template file included by the generated build file.
    #[arg(
        long,
        value_name = "FILE",
        default_value = DEFAULT_RULES,
        env = "NINJACONF_RULES"
    )]
    pub rules: Utf8PathBuf,

    /// Suffix identifying compilable sources.
    #[arg(
        long,
        value_name = "SUFFIX",
        default_value = DEFAULT_SOURCE_SUFFIX,
        value_parser = validate_suffix,
        env = "NINJACONF_SOURCE_SUFFIX"
    )]
    pub source_suffix: String,

    /// Suffix given to compiled objects.
    #[arg(
        long,
        value_name = "SUFFIX",
        default_value = DEFAULT_OBJECT_SUFFIX,
        value_parser = validate_suffix,
        env = "NINJACONF_OBJECT_SUFFIX"
    )]
    pub object_suffix: String,

    /// Enable verbose diagnostic logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Project layout described by the parsed options.
    #[must_use]
    pub fn layout(&self) -> ProjectLayout {
        ProjectLayout {
            source_dir: self.source_dir.clone(),
            test_dir: self.test_dir.clone(),
            build_dir: self.build_dir.clone(),
            library: self.library.clone(),
            rules: self.rules.clone(),
            source_suffix: self.source_suffix.clone(),
            object_suffix: self.object_suffix.clone(),
        }
    }
}

impl Default for Cli {
    fn default() -> Self {
        let layout = ProjectLayout::default();
        Self {
            directory: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
            format: OutputFormat::default(),
            source_dir: layout.source_dir,
            test_dir: layout.test_dir,
            build_dir: layout.build_dir,
            library: layout.library,
            rules: layout.rules,
            source_suffix: layout.source_suffix,
            object_suffix: layout.object_suffix,
            verbose: false,
        }
    }
}
