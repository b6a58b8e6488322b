//! JSON serialization of the build graph.
//!
//! Emits the same statements as [`crate::ninja_gen`] as structured data for
//! tools that prefer not to parse Ninja syntax.

use crate::ir::BuildGraph;

/// Render `graph` as pretty-printed JSON followed by a newline.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] if serialization fails.
///
/// # Examples
///
/// ```
/// use ninjaconf::classify::SourceSet;
/// use ninjaconf::ir::BuildGraph;
/// use ninjaconf::layout::ProjectLayout;
///
/// let layout = ProjectLayout::default();
/// let graph = BuildGraph::from_sources(&layout, &SourceSet::default(), &SourceSet::default())?;
/// let json = ninjaconf::json_gen::generate(&graph)?;
/// assert!(json.contains("\"include\": \"ninja/rules.ninja\""));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn generate(graph: &BuildGraph) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(graph)?;
    json.push('\n');
    Ok(json)
}
