//! Emission-order validation for the IR edge list.
//!
//! The downstream tool does not care about statement order, but the graph is
//! built so that every statement follows whatever it depends on. This module
//! checks that guarantee, and that no output is claimed twice, before the
//! graph is serialized.

use std::collections::HashSet;

use camino::Utf8Path;

use super::graph::{BuildEdge, IrGenError, Rule};

/// Check that `edges` are uniquely owned and dependency-ordered.
///
/// Inputs that no edge produces are sources on disk and need no ordering.
pub(crate) fn validate(edges: &[BuildEdge]) -> Result<(), IrGenError> {
    let produced: HashSet<&Utf8Path> = edges.iter().map(|e| e.output.as_path()).collect();
    let directories: HashSet<&Utf8Path> = edges
        .iter()
        .filter(|e| e.rule == Rule::Mkdir)
        .map(|e| e.output.as_path())
        .collect();

    let mut seen: HashSet<&Utf8Path> = HashSet::with_capacity(edges.len());
    for edge in edges {
        for dep in edge.dependencies() {
            if produced.contains(dep.as_path()) && !seen.contains(dep.as_path()) {
                return Err(IrGenError::OutOfOrder {
                    dependent: edge.output.clone(),
                    dependency: dep.clone(),
                });
            }
        }
        if let Some(dir) = edge
            .output
            .ancestors()
            .skip(1)
            .find(|dir| directories.contains(dir) && !seen.contains(dir))
        {
            return Err(IrGenError::OutOfOrder {
                dependent: edge.output.clone(),
                dependency: dir.to_owned(),
            });
        }
        if !seen.insert(edge.output.as_path()) {
            return Err(IrGenError::DuplicateOutput {
                output: edge.output.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rstest::rstest;

    fn edge(rule: Rule, output: &str, inputs: &[&str]) -> BuildEdge {
        BuildEdge::new(
            rule,
            Utf8PathBuf::from(output),
            inputs.iter().map(Utf8PathBuf::from).collect(),
        )
    }

    #[rstest]
    fn accepts_dependency_ordered_edges() {
        let edges = vec![
            edge(Rule::Mkdir, "build", &[]),
            edge(Rule::Compile, "build/a.o", &["a.cpp"]),
            edge(Rule::LinkShared, "build/liba.so", &["build/a.o"]),
        ];
        assert!(validate(&edges).is_ok());
    }

    #[rstest]
    fn rejects_input_produced_later() {
        let edges = vec![
            edge(Rule::LinkShared, "liba.so", &["a.o"]),
            edge(Rule::Compile, "a.o", &["a.cpp"]),
        ];
        let err = validate(&edges).expect_err("out of order");
        assert!(matches!(
            err,
            IrGenError::OutOfOrder { ref dependent, ref dependency }
                if dependent == "liba.so" && dependency == "a.o"
        ));
    }

    #[rstest]
    fn rejects_implicit_input_produced_later() {
        let edges = vec![
            edge(Rule::Link, "t1", &["t1.o"]).with_implicit_input(Utf8PathBuf::from("liba.so")),
            edge(Rule::LinkShared, "liba.so", &[]),
        ];
        assert!(matches!(
            validate(&edges),
            Err(IrGenError::OutOfOrder { ref dependency, .. }) if dependency == "liba.so"
        ));
    }

    #[rstest]
    fn rejects_output_before_its_directory() {
        let edges = vec![
            edge(Rule::Compile, "build/test/t1.o", &["test/t1.cpp"]),
            edge(Rule::Mkdir, "build/test", &[]),
        ];
        assert!(matches!(
            validate(&edges),
            Err(IrGenError::OutOfOrder { ref dependency, .. }) if dependency == "build/test"
        ));
    }

    #[rstest]
    fn rejects_duplicate_outputs() {
        let edges = vec![
            edge(Rule::Compile, "build/a.o", &["a.cpp"]),
            edge(Rule::Compile, "build/a.o", &["other/a.cpp"]),
        ];
        assert!(matches!(
            validate(&edges),
            Err(IrGenError::DuplicateOutput { ref output }) if output == "build/a.o"
        ));
    }
}
