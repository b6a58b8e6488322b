//! Test utilities for ninjaconf.
//!
//! Provides a builder for throwaway project trees and helpers for checking
//! generated build files with a real `ninja` when one is installed.

pub mod ninja;
pub mod project;

pub use ninja::{ninja_available, run_ninja, write_stub_rules};
pub use project::ProjectTree;
