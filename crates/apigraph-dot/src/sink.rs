//! DOT rendering sink with optional package clustering.

use std::collections::{BTreeMap, HashMap};

use tracing::trace;

use apigraph_collect::{RenderEdge, RenderNode, RenderSink};
use apigraph_core::{Error, Result};

use crate::dot::DotBuilder;

pub const DEFAULT_TITLE: &str = "apigraph";

const NODE_STYLE: &str = "shape=box, style=\"rounded\"";

#[derive(Debug, Clone)]
pub struct DotOptions {
    /// Graph name, sanitized into a DOT identifier
    pub title: String,
    /// Wrap the nodes of each package in a `cluster_<n>` subgraph, labelled with its path
    pub cluster_by_package: bool,
}

impl Default for DotOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            cluster_by_package: false,
        }
    }
}

impl DotOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_cluster_by_package(mut self, cluster_by_package: bool) -> Self {
        self.cluster_by_package = cluster_by_package;
        self
    }
}

/// Accumulates render edges and prints them as a DOT digraph.
///
/// Nodes are created once per key and numbered `n0, n1, ...` in first-seen order.
/// Every edge is kept, duplicates included.
#[derive(Debug, Default)]
pub struct DotSink {
    options: DotOptions,
    index: HashMap<String, usize>,
    nodes: Vec<RenderNode>,
    edges: Vec<(usize, usize)>,
}

impl DotSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DotOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    fn check_key(node: &RenderNode) -> Result<()> {
        if node.key.is_empty() {
            return Err(Error::render_failed("render node key is empty")
                .with_operation("dot::add_node")
                .with_context("label", node.label.clone()));
        }
        Ok(())
    }

    fn ensure_node(&mut self, node: &RenderNode) -> usize {
        if let Some(&idx) = self.index.get(&node.key) {
            return idx;
        }
        let idx = self.nodes.len();
        trace!(key = %node.key, idx, "new dot node");
        self.index.insert(node.key.clone(), idx);
        self.nodes.push(node.clone());
        idx
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Render everything added so far.
    pub fn render(&self) -> String {
        let mut dot = DotBuilder::new(&self.options.title);
        dot.node_style(NODE_STYLE);

        if self.options.cluster_by_package {
            let mut packages: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
            for (idx, node) in self.nodes.iter().enumerate() {
                packages.entry(node.package.as_str()).or_default().push(idx);
            }
            // Sanitized paths can collide, so clusters are numbered in path order.
            for (cluster, (package, members)) in packages.into_iter().enumerate() {
                dot.start_cluster(&cluster.to_string(), package);
                for idx in members {
                    dot.node(&node_id(idx), &self.nodes[idx].label);
                }
                dot.end_cluster();
            }
        } else {
            for (idx, node) in self.nodes.iter().enumerate() {
                dot.node(&node_id(idx), &node.label);
            }
        }

        for &(from, to) in &self.edges {
            dot.edge(&node_id(from), &node_id(to));
        }
        dot.build()
    }
}

impl RenderSink for DotSink {
    fn add_edge(&mut self, edge: &RenderEdge) -> Result<()> {
        // Both keys are checked first so a rejected edge leaves no node behind.
        Self::check_key(&edge.from)?;
        Self::check_key(&edge.to)?;
        let from = self.ensure_node(&edge.from);
        let to = self.ensure_node(&edge.to);
        self.edges.push((from, to));
        Ok(())
    }
}

fn node_id(idx: usize) -> String {
    format!("n{idx}")
}
