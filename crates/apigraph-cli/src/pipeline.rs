//! Core pipeline: load graph → resolve scope → traverse + project → render.

use std::path::Path;
use std::time::Instant;

use tracing::info;

use apigraph_collect::{ProjectionReport, project_exported};
use apigraph_core::{LoadedGraph, Result, load_graph};
use apigraph_dot::DotSink;

use crate::ApigraphOptions;

/// Run every phase against the graph file at `path` and return the DOT text.
pub fn process_graph(opts: &ApigraphOptions, path: &Path) -> Result<String> {
    // 1. Load
    let load_start = Instant::now();
    let loaded = load_graph(path)?;
    info!(
        nodes = loaded.graph.node_count(),
        edges = loaded.graph.edge_count(),
        packages = loaded.packages.len(),
        "Loading call graph: {:.2}s",
        load_start.elapsed().as_secs_f64()
    );

    // 2. Traverse + project
    let traverse_start = Instant::now();
    let mut sink = DotSink::with_options(opts.render.dot());
    let report = render_into(opts, &loaded, &mut sink)?;
    info!(
        seeds = report.traversal.seeds,
        delivered = report.traversal.delivered,
        forwarded = report.projection.forwarded,
        "Exported traversal: {:.2}s",
        traverse_start.elapsed().as_secs_f64()
    );

    // 3. Render
    let render_start = Instant::now();
    let dot = sink.render();
    info!(
        nodes = sink.node_count(),
        edges = sink.edge_count(),
        "Graph rendering: {:.2}s",
        render_start.elapsed().as_secs_f64()
    );

    Ok(dot)
}

/// Feed the cross-package calls of the in-scope packages into `sink`.
pub fn render_into(
    opts: &ApigraphOptions,
    loaded: &LoadedGraph,
    sink: &mut DotSink,
) -> Result<ProjectionReport> {
    let scope = loaded.in_scope(&opts.scope.packages)?;
    let paths: Vec<&str> = scope.paths().collect();
    info!(packages = ?paths, "analysing {} package(s)", scope.len());

    project_exported(
        &loaded.graph,
        &scope,
        &opts.scope.traversal(),
        &opts.render.projection(),
        sink,
    )
}
