//! Classified-sources-to-IR conversion.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, warn};

use crate::classify::{SourceSet, binary_path};
use crate::layout::ProjectLayout;

use super::{
    graph::{BuildEdge, BuildGraph, IrGenError, LINK_FLAGS_VAR, Rule},
    ordering,
};

impl BuildGraph {
    /// Assemble the build graph for a library and its tests.
    ///
    /// Statements are emitted in dependency order: output directories, the
    /// library compiles, the shared-library link, then a compile and link
    /// pair for each test. Every test link carries the library artifact in
    /// its extra link flags and depends on it implicitly, so the downstream
    /// tool links tests only after the library exists.
    ///
    /// The library link is emitted even when `library` is empty.
    ///
    /// # Errors
    ///
    /// Returns [`IrGenError`] when two statements would share an output or a
    /// statement precedes one of its dependencies.
    pub fn from_sources(
        layout: &ProjectLayout,
        library: &SourceSet,
        tests: &SourceSet,
    ) -> Result<Self, IrGenError> {
        let mut graph = Self {
            include: layout.rules.clone(),
            edges: Vec::with_capacity(3 + library.len() + 2 * tests.len()),
        };

        graph.push_directories(layout);
        graph.push_compiles(library);
        let artifact = graph.push_library(layout, library);
        graph.push_tests(layout, tests, artifact.as_path());

        ordering::validate(&graph.edges)?;
        debug!(
            edges = graph.edges.len(),
            library_sources = library.len(),
            test_sources = tests.len(),
            "assembled build graph"
        );
        Ok(graph)
    }

    fn push_directories(&mut self, layout: &ProjectLayout) {
        let root = layout.build_root();
        let test_root = layout.test_build_dir();
        let same = root == test_root;
        self.edges.push(BuildEdge::new(Rule::Mkdir, root, Vec::new()));
        // A test directory of `.` shares the build root.
        if !same {
            self.edges
                .push(BuildEdge::new(Rule::Mkdir, test_root, Vec::new()));
        }
    }

    fn push_compiles(&mut self, sources: &SourceSet) {
        self.edges.extend(sources.pairs().map(|(source, object)| {
            BuildEdge::new(Rule::Compile, object.clone(), vec![source.clone()])
        }));
    }

    fn push_library(&mut self, layout: &ProjectLayout, library: &SourceSet) -> Utf8PathBuf {
        let artifact = layout.library_artifact();
        if library.is_empty() {
            warn!(%artifact, "no library sources found; linking an empty library");
        }
        self.edges.push(BuildEdge::new(
            Rule::LinkShared,
            artifact.clone(),
            library.objects().to_vec(),
        ));
        artifact
    }

    fn push_tests(&mut self, layout: &ProjectLayout, tests: &SourceSet, artifact: &Utf8Path) {
        let flags = format!("${LINK_FLAGS_VAR} {}", escape_value(artifact.as_str()));
        for (source, object) in tests.pairs() {
            self.edges.push(BuildEdge::new(
                Rule::Compile,
                object.clone(),
                vec![source.clone()],
            ));
            self.edges.push(
                BuildEdge::new(
                    Rule::Link,
                    binary_path(layout, object),
                    vec![object.clone()],
                )
                .with_implicit_input(artifact.to_owned())
                .with_variable(LINK_FLAGS_VAR, flags.clone()),
            );
        }
    }
}

/// Escape `$` so a path survives Ninja's variable expansion.
fn escape_value(raw: &str) -> String {
    raw.replace('$', "$$")
}
