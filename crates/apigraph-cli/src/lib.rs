//! apigraph command-line interface.
//!
pub mod discovery;
pub mod options;
pub mod output;
pub mod pipeline;

use std::path::PathBuf;

use apigraph_core::Result;

pub use options::{LabelArg, MatchArg, RenderArgs, ScopeOptions};
pub use pipeline::process_graph;

/// Options for running apigraph.
#[derive(Debug, Clone)]
pub struct ApigraphOptions {
    /// Directory the graph file is resolved against
    pub dir: PathBuf,
    /// Interchange file, relative to `dir` unless absolute
    pub graph: PathBuf,
    pub scope: ScopeOptions,
    pub render: RenderArgs,
    pub output: Option<PathBuf>,
}

impl Default for ApigraphOptions {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            graph: PathBuf::from("callgraph.json"),
            scope: ScopeOptions::default(),
            render: RenderArgs::default(),
            output: None,
        }
    }
}

/// Main entry point. Returns the rendered DOT text.
pub fn run_main(opts: &ApigraphOptions) -> Result<String> {
    let path = discovery::resolve_graph_path(&opts.dir, &opts.graph)?;
    process_graph(opts, &path)
}
