//! Core build-graph types.

use camino::Utf8PathBuf;
use indexmap::IndexMap;
use miette::Diagnostic;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Name of the variable carrying extra linker flags for test binaries.
pub const LINK_FLAGS_VAR: &str = "lflags";

/// Rule templates referenced by the generated graph.
///
/// Rule bodies live in the included rules file; the graph only needs their
/// names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    /// Create a build-output directory.
    Mkdir,
    /// Compile one source into one object.
    Compile,
    /// Link objects into a shared library.
    LinkShared,
    /// Link an object into an executable.
    Link,
}

impl Rule {
    /// Name of the rule as defined in the included rules file.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mkdir => "mkdir",
            Self::Compile => "compile",
            Self::LinkShared => "link-shared",
            Self::Link => "link",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One build statement: a rule producing `output` from `inputs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildEdge {
    /// Rule used to produce the output.
    pub rule: Rule,
    /// Path produced by this edge.
    pub output: Utf8PathBuf,
    /// Explicit inputs, in order.
    pub inputs: Vec<Utf8PathBuf>,
    /// Dependencies that are not passed to the rule as `$in`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub implicit_inputs: Vec<Utf8PathBuf>,
    /// Edge-scoped variables, in insertion order.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub variables: IndexMap<String, String>,
}

impl BuildEdge {
    /// Create an edge without variables.
    #[must_use]
    pub fn new(rule: Rule, output: Utf8PathBuf, inputs: Vec<Utf8PathBuf>) -> Self {
        Self {
            rule,
            output,
            inputs,
            implicit_inputs: Vec::new(),
            variables: IndexMap::new(),
        }
    }

    /// Add a dependency that is not part of `$in`.
    #[must_use]
    pub fn with_implicit_input(mut self, path: Utf8PathBuf) -> Self {
        self.implicit_inputs.push(path);
        self
    }

    /// Explicit and implicit inputs together.
    pub fn dependencies(&self) -> impl Iterator<Item = &Utf8PathBuf> {
        self.inputs.iter().chain(&self.implicit_inputs)
    }

    /// Attach an edge-scoped variable.
    #[must_use]
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }
}

/// The complete, ordered build graph for one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildGraph {
    /// Rules file included before any statement.
    pub include: Utf8PathBuf,
    /// Build statements in emission order.
    pub edges: Vec<BuildEdge>,
}

impl BuildGraph {
    /// Edges using `rule`, in emission order.
    pub fn edges_for(&self, rule: Rule) -> impl Iterator<Item = &BuildEdge> {
        self.edges.iter().filter(move |edge| edge.rule == rule)
    }

    /// Find the edge producing `output`.
    #[must_use]
    pub fn edge_for_output(&self, output: &str) -> Option<&BuildEdge> {
        self.edges.iter().find(|edge| edge.output == output)
    }
}

/// Errors produced while assembling a [`BuildGraph`].
#[derive(Debug, Error, Diagnostic)]
pub enum IrGenError {
    /// Two edges claim the same output path.
    #[error("output '{output}' is produced by more than one build statement")]
    #[diagnostic(
        code(ninjaconf::ir::duplicate_output),
        help("the library and test directories must not derive the same object path")
    )]
    DuplicateOutput {
        /// Output claimed twice.
        output: Utf8PathBuf,
    },

    /// An edge was emitted before something it depends on.
    #[error("'{dependent}' is emitted before its dependency '{dependency}'")]
    #[diagnostic(code(ninjaconf::ir::out_of_order))]
    OutOfOrder {
        /// Output of the edge emitted too early.
        dependent: Utf8PathBuf,
        /// Input or directory that is only produced later.
        dependency: Utf8PathBuf,
    },
}
