//! Ninjaconf core library.
//!
//! Scans a native library project for sources, derives object and binary
//! paths, and emits a Ninja build description that compiles the library,
//! links it as a shared object, and builds one executable per test source.

pub mod classify;
pub mod cli;
pub mod ir;
pub mod json_gen;
pub mod layout;
pub mod ninja_gen;
pub mod runner;
