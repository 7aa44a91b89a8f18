//! Exported-surface reachability over a whole-program call graph.
//!
//! The call graph and package membership are produced elsewhere (a loader plus a
//! call-graph builder); this crate only consumes them:
//!
//! - [`visibility`]: decides whether a symbol name is part of the public API
//! - [`traverse`]: seeds on exported package members and walks exported callees
//!   breadth-first, handing every newly reached edge to an [`EdgeVisitor`]
//! - [`interchange`]: JSON form of a call graph for tools that build it out of process

pub mod graph;
pub mod interchange;
pub mod package;
pub mod symbol;
pub mod traverse;
pub mod visibility;

pub use apigraph_error::{Error, ErrorKind, Result};

pub use graph::{CallEdge, CallEdgeRef, CallGraph, CallNode, EdgeId, NodeId};
pub use interchange::{GraphFile, LoadedGraph, load_graph};
pub use package::{Package, PackageSet};
pub use symbol::Symbol;
pub use traverse::{
    EdgeVisitor, ExportTraversal, MatchMode, SeedSet, TraversalOptions, TraversalStats,
    VisitedSet, traverse_exported,
};
pub use visibility::is_exported;
