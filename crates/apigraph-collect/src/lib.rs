//! Cross-package edge collection for graph rendering.
//!
//! This crate turns the edge stream of the exported-surface traversal into
//! format-agnostic render nodes and edges, and hands them to any
//! [`RenderSink`] (DOT, a plain `Vec`, ...).
//!
//! # Module Structure
//!
//! - [`types`]: RenderNode, RenderEdge, LabelMode and the RenderSink trait
//! - [`projection`]: the cross-boundary filter and [`project_exported`]

mod projection;
mod types;

pub use projection::{CrossBoundaryProjection, ProjectionReport, project_exported};
pub use types::{
    LabelMode, ProjectionOptions, ProjectionStats, RenderEdge, RenderNode, RenderSink,
};
