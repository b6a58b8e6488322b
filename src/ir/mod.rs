//! Intermediate Representation structures.
//!
//! This module defines the structured build graph assembled from classified
//! sources. The IR mirrors the statements of a Ninja file without embedding
//! any Ninja-specific syntax, so it can be serialized either as Ninja text or
//! as JSON for other tools.
//!
//! # Examples
//!
//! ```
//! use ninjaconf::classify::SourceSet;
//! use ninjaconf::ir::{BuildGraph, Rule};
//! use ninjaconf::layout::ProjectLayout;
//!
//! let layout = ProjectLayout::default();
//! let graph = BuildGraph::from_sources(&layout, &SourceSet::default(), &SourceSet::default())?;
//! assert_eq!(graph.edges_for(Rule::Mkdir).count(), 2);
//! assert_eq!(graph.edges_for(Rule::LinkShared).count(), 1);
//! # Ok::<(), ninjaconf::ir::IrGenError>(())
//! ```

mod from_sources;
mod graph;
mod ordering;

pub use graph::{BuildEdge, BuildGraph, IrGenError, LINK_FLAGS_VAR, Rule};
