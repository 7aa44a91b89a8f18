//! Core types for graph rendering.

use std::fmt;

use apigraph_core::Result;

// Label Mode

/// How a symbol is keyed and labelled once it becomes a render node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelMode {
    /// Key and label are the qualified name (`pkg.Name`, `pkg.(Recv).Name`)
    #[default]
    Qualified,
    /// Key and label are the simple name. Same-named symbols share one node.
    Simple,
    /// Keyed by qualified name, labelled by simple name for in-scope packages
    Scoped,
}

impl LabelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Qualified => "qualified",
            Self::Simple => "simple",
            Self::Scoped => "scoped",
        }
    }
}

// Projection Options

#[derive(Debug, Clone, Default)]
pub struct ProjectionOptions {
    pub label_mode: LabelMode,
}

impl ProjectionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label_mode(mut self, label_mode: LabelMode) -> Self {
        self.label_mode = label_mode;
        self
    }
}

// Render Node & Edge

/// Node representation for rendering.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RenderNode {
    /// Identity used for node dedup in the sink
    pub key: String,
    /// Display name (e.g., "example.com/a.Foo", "Foo")
    pub label: String,
    /// Package path, for clustering
    pub package: String,
}

impl RenderNode {
    pub fn new(key: impl Into<String>, label: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            package: package.into(),
        }
    }
}

/// One cross-package call, caller first.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RenderEdge {
    pub from: RenderNode,
    pub to: RenderNode,
    /// Call-site line, when the graph recorded one
    pub line: Option<u32>,
}

impl fmt::Display for RenderEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from.key, self.to.key)
    }
}

// Render Sink

/// Rendering backend fed by the projection.
///
/// A sink creates each node once per key and keeps every edge it is given, so
/// repeated call sites arrive as repeated edges.
pub trait RenderSink {
    fn add_edge(&mut self, edge: &RenderEdge) -> Result<()>;
}

impl<S: RenderSink + ?Sized> RenderSink for &mut S {
    fn add_edge(&mut self, edge: &RenderEdge) -> Result<()> {
        (**self).add_edge(edge)
    }
}

/// Collects edges in arrival order.
impl RenderSink for Vec<RenderEdge> {
    fn add_edge(&mut self, edge: &RenderEdge) -> Result<()> {
        self.push(edge.clone());
        Ok(())
    }
}

// Stats

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectionStats {
    /// Edges handed to the sink
    pub forwarded: usize,
    pub self_loops: usize,
    pub same_package: usize,
}

impl ProjectionStats {
    pub fn dropped(&self) -> usize {
        self.self_loops + self.same_package
    }
}
