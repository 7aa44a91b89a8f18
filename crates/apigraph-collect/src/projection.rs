//! Cross-package projection of the exported traversal.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use apigraph_core::{
    CallEdgeRef, CallGraph, EdgeVisitor, PackageSet, Result, Symbol, TraversalOptions,
    TraversalStats, traverse_exported,
};

use crate::types::{
    LabelMode, ProjectionOptions, ProjectionStats, RenderEdge, RenderNode, RenderSink,
};

/// Edge visitor that keeps only calls crossing a package boundary and forwards
/// them to a [`RenderSink`].
///
/// Self-loops and calls within one package are dropped. Everything else is
/// forwarded as-is, including repeated call sites between the same pair.
pub struct CrossBoundaryProjection<'s, S: RenderSink + ?Sized> {
    sink: &'s mut S,
    options: ProjectionOptions,
    /// In-scope package paths, for [`LabelMode::Scoped`]
    scope: BTreeSet<String>,
    stats: ProjectionStats,
}

impl<'s, S: RenderSink + ?Sized> CrossBoundaryProjection<'s, S> {
    pub fn new(sink: &'s mut S) -> Self {
        Self {
            sink,
            options: ProjectionOptions::default(),
            scope: BTreeSet::new(),
            stats: ProjectionStats::default(),
        }
    }

    pub fn with_options(mut self, options: ProjectionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_scope(mut self, packages: &PackageSet) -> Self {
        self.scope = packages.paths().map(str::to_string).collect();
        self
    }

    pub fn stats(&self) -> ProjectionStats {
        self.stats
    }

    fn render_node(&self, symbol: &Symbol) -> RenderNode {
        let package = symbol.package();
        match self.options.label_mode {
            LabelMode::Qualified => {
                let name = symbol.qualified_name();
                RenderNode::new(name.clone(), name, package)
            }
            LabelMode::Simple => RenderNode::new(symbol.name(), symbol.name(), package),
            LabelMode::Scoped => {
                let key = symbol.qualified_name();
                let label = if self.scope.contains(package) {
                    symbol.name().to_string()
                } else {
                    key.clone()
                };
                RenderNode::new(key, label, package)
            }
        }
    }
}

impl<S: RenderSink + ?Sized> EdgeVisitor for CrossBoundaryProjection<'_, S> {
    fn visit_edge(&mut self, edge: CallEdgeRef<'_>) -> Result<()> {
        if edge.is_self_loop() {
            self.stats.self_loops += 1;
            return Ok(());
        }

        let caller = edge.caller_symbol()?;
        let callee = edge.callee_symbol()?;
        if caller.package() == callee.package() {
            trace!(%edge, "same package");
            self.stats.same_package += 1;
            return Ok(());
        }

        let render = RenderEdge {
            from: self.render_node(caller),
            to: self.render_node(callee),
            line: edge.edge.line,
        };
        trace!(%render, "forward");
        self.sink
            .add_edge(&render)
            .map_err(|e| e.with_context("render_edge", render.to_string()))?;
        self.stats.forwarded += 1;
        Ok(())
    }
}

/// Counters from one [`project_exported`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectionReport {
    pub traversal: TraversalStats,
    pub projection: ProjectionStats,
}

/// Traverse the exported surface of `packages` and feed the cross-package
/// calls into `sink`.
pub fn project_exported<S>(
    graph: &CallGraph,
    packages: &PackageSet,
    traversal: &TraversalOptions,
    options: &ProjectionOptions,
    sink: &mut S,
) -> Result<ProjectionReport>
where
    S: RenderSink + ?Sized,
{
    let mut projection = CrossBoundaryProjection::new(sink)
        .with_options(options.clone())
        .with_scope(packages);
    let traversal = traverse_exported(graph, packages, traversal, &mut projection)?;
    let projection = projection.stats();

    debug!(
        forwarded = projection.forwarded,
        self_loops = projection.self_loops,
        same_package = projection.same_package,
        "projection done"
    );
    Ok(ProjectionReport {
        traversal,
        projection,
    })
}
