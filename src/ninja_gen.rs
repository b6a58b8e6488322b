//! Ninja file generator.
//!
//! This module converts a [`crate::ir::BuildGraph`] into the textual
//! representation expected by the Ninja build system. Statements are written
//! in graph order; the graph builder already guarantees that order respects
//! dependencies, so the output is deterministic for an unchanged tree.

use crate::ir::{BuildEdge, BuildGraph};
use camino::Utf8PathBuf;
use itertools::Itertools;
use std::fmt::{self, Display, Formatter};

/// Generate a Ninja build file as a string.
///
/// # Examples
///
/// ```
/// use ninjaconf::classify::SourceSet;
/// use ninjaconf::ir::BuildGraph;
/// use ninjaconf::layout::ProjectLayout;
/// use ninjaconf::ninja_gen::generate;
///
/// let layout = ProjectLayout::default();
/// let graph = BuildGraph::from_sources(&layout, &SourceSet::default(), &SourceSet::default())?;
/// let ninja = generate(&graph);
/// assert!(ninja.starts_with("include ninja/rules.ninja\n"));
/// assert!(ninja.contains("build build/libwsdl2.so: link-shared\n"));
/// # Ok::<(), ninjaconf::ir::IrGenError>(())
/// ```
#[must_use]
pub fn generate(graph: &BuildGraph) -> String {
    DisplayGraph(graph).to_string()
}

/// Convert a slice of paths into a space-separated string.
fn join(paths: &[Utf8PathBuf]) -> String {
    paths.iter().map(|p| escape_path(p.as_str())).join(" ")
}

/// Escape characters Ninja treats specially in paths.
///
/// `$`, spaces and colons must be prefixed with `$` inside `build` lines.
fn escape_path(path: &str) -> String {
    let mut escaped = String::with_capacity(path.len());
    for ch in path.chars() {
        if matches!(ch, '$' | ' ' | ':') {
            escaped.push('$');
        }
        escaped.push(ch);
    }
    escaped
}

/// Wrapper struct to display a whole graph.
struct DisplayGraph<'a>(&'a BuildGraph);

impl Display for DisplayGraph<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "include {}", escape_path(self.0.include.as_str()))?;
        writeln!(f)?;
        for edge in &self.0.edges {
            write!(f, "{}", DisplayEdge(edge))?;
        }
        Ok(())
    }
}

/// Wrapper struct to display a build edge.
struct DisplayEdge<'a>(&'a BuildEdge);

impl Display for DisplayEdge<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let edge = self.0;
        write!(f, "build {}: {}", escape_path(edge.output.as_str()), edge.rule)?;
        if !edge.inputs.is_empty() {
            write!(f, " {}", join(&edge.inputs))?;
        }
        if !edge.implicit_inputs.is_empty() {
            write!(f, " | {}", join(&edge.implicit_inputs))?;
        }
        writeln!(f)?;
        for (key, value) in &edge.variables {
            writeln!(f, "  {key} = {value}")?;
        }
        writeln!(f)
    }
}
