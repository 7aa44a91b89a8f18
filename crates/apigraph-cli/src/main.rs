use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[cfg(target_env = "msvc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use apigraph::output::write_output;
use apigraph::{ApigraphOptions, RenderArgs, ScopeOptions, run_main};
use apigraph_core::Result;

#[derive(Parser, Debug)]
#[command(
    name = "apigraph",
    about = "apigraph: how your exported API calls across package boundaries",
    version
)]
pub struct Cli {
    /// Directory the graph file is resolved against
    #[arg(short = 'd', long = "dir", value_name = "DIR", default_value = ".")]
    dir: PathBuf,

    /// Call graph in JSON interchange format
    #[arg(
        short = 'g',
        long = "graph",
        value_name = "FILE",
        default_value = "callgraph.json"
    )]
    graph: PathBuf,

    #[command(flatten)]
    scope: ScopeOptions,

    #[command(flatten)]
    render: RenderArgs,

    /// Output file path (writes to file instead of stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,
}

pub fn run(args: Cli) -> Result<()> {
    let total_start = Instant::now();

    // Initialize tracing subscriber for logging
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let opts = ApigraphOptions {
        dir: args.dir,
        graph: args.graph,
        scope: args.scope,
        render: args.render,
        output: args.output,
    };

    let result = run_main(&opts).and_then(|dot| write_output(opts.output.as_deref(), &dot));
    if let Err(e) = &result {
        tracing::error!(error = %e, "execution failed");
    }

    let total_secs = total_start.elapsed().as_secs_f64();
    tracing::info!(total_secs, "complete");
    result
}

pub fn main() -> Result<()> {
    let args = Cli::parse();
    run(args)
}
