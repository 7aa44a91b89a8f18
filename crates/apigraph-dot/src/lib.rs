//! Graph rendering module for producing DOT format output.
//!
//! [`DotSink`] plugs into the cross-package projection as a
//! [`RenderSink`](apigraph_collect::RenderSink) and prints the collected edges
//! as a Graphviz digraph, optionally clustered by package.
//!
//! # Module Structure
//!
//! - [`dot`]: DOT format utilities and helpers
//! - [`sink`]: The rendering sink and its options

mod dot;
mod sink;

use apigraph_collect::{RenderEdge, RenderSink};
use apigraph_core::Result;

pub use dot::{DotBuilder, escape_label, sanitize_id};
pub use sink::{DEFAULT_TITLE, DotOptions, DotSink};

// ============================================================================
// Public API
// ============================================================================

/// Render an already collected edge list to DOT.
///
/// For library callers that gathered edges into a `Vec<RenderEdge>` sink
/// instead of streaming into a [`DotSink`].
pub fn render_edges(edges: &[RenderEdge], options: &DotOptions) -> Result<String> {
    let mut sink = DotSink::with_options(options.clone());
    for edge in edges {
        sink.add_edge(edge)?;
    }
    Ok(sink.render())
}
