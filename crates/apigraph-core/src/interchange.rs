//! JSON interchange format for call graphs built out of process.
//!
//! ```json
//! {
//!   "packages": [{ "path": "example.com/a", "members": ["Foo"], "requested": true }],
//!   "nodes": [{ "id": 0 }, { "id": 1, "symbol": { "name": "Foo", "package": "example.com/a" } }],
//!   "edges": [{ "caller": 0, "callee": 1 }]
//! }
//! ```
//!
//! Node ids must be dense and listed in order. A node without `symbol` is a
//! synthetic entry such as the call graph root.

use std::path::Path;

use apigraph_error::{Error, ErrorKind, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::graph::{CallGraph, NodeId};
use crate::package::{Package, PackageSet};
use crate::symbol::Symbol;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphFile {
    #[serde(default)]
    pub packages: Vec<PackageRecord>,
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub members: Vec<String>,
    /// Part of the default analysis scope
    #[serde(default)]
    pub requested: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<SymbolRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolRecord {
    pub name: String,
    pub package: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub caller: u32,
    pub callee: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

/// A validated interchange file.
#[derive(Debug, Clone)]
pub struct LoadedGraph {
    pub graph: CallGraph,
    /// Every package the file describes
    pub packages: PackageSet,
    /// Paths marked `requested`, in path order
    pub requested: Vec<String>,
}

impl LoadedGraph {
    /// Packages in scope for a run.
    ///
    /// With no explicit selection the `requested` packages are used. Selecting a
    /// package the file does not describe is an error.
    pub fn in_scope(&self, selected: &[String]) -> Result<PackageSet> {
        let paths: Vec<&str> = if selected.is_empty() {
            self.requested.iter().map(String::as_str).collect()
        } else {
            selected.iter().map(String::as_str).collect()
        };

        let mut scope = PackageSet::new();
        for path in paths {
            let package = self.packages.get(path).ok_or_else(|| {
                Error::invalid_argument(format!("package '{}' is not in the call graph", path))
                    .with_context("package", path)
            })?;
            scope.insert(package.clone());
        }
        Ok(scope)
    }
}

impl GraphFile {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| {
            Error::new(ErrorKind::DeserializationFailed, e.to_string())
                .with_operation("interchange::from_json")
                .with_context("line", e.line().to_string())
                .set_source(e)
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::from(e).with_context("path", path.display().to_string()))?;
        Self::from_json(&text).map_err(|e| e.with_context("path", path.display().to_string()))
    }

    /// Pretty JSON, for call-graph builders that emit the interchange file.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            Error::new(ErrorKind::SerializationFailed, e.to_string())
                .with_operation("interchange::to_json")
                .set_source(e)
        })
    }

    /// Validate the records and build the in-memory graph.
    pub fn into_graph(self) -> Result<LoadedGraph> {
        let mut packages = PackageSet::new();
        let mut requested = Vec::new();
        for record in self.packages {
            if record.path.is_empty() {
                return Err(invalid("package with an empty path"));
            }
            let mut package = Package::new(record.path.clone());
            if let Some(name) = record.name {
                package = package.with_name(name);
            }
            for member in record.members {
                if member.is_empty() {
                    return Err(Error::contract_violation("empty member name")
                        .with_operation("interchange::into_graph")
                        .with_context("package", record.path.clone()));
                }
                package.add_member(member);
            }
            if record.requested {
                requested.push(record.path.clone());
            }
            if packages.insert(package).is_some() {
                return Err(invalid(format!("package '{}' is listed twice", record.path)));
            }
        }
        requested.sort();

        let mut graph = CallGraph::new();
        for (index, record) in self.nodes.into_iter().enumerate() {
            if record.id as usize != index {
                return Err(invalid(format!(
                    "node ids must be dense and ordered: expected {}, found {}",
                    index, record.id
                )));
            }
            let symbol = match record.symbol {
                Some(symbol) => Some(to_symbol(record.id, symbol)?),
                None => None,
            };
            graph.add_node(symbol);
        }

        for (index, record) in self.edges.into_iter().enumerate() {
            let caller = NodeId::new(record.caller);
            let callee = NodeId::new(record.callee);
            graph.add_call(caller, callee, record.line).map_err(|e| {
                invalid(format!("edge {} references an unknown node", index))
                    .with_context("edge", index.to_string())
                    .set_source(e)
            })?;
        }

        debug!(
            packages = packages.len(),
            requested = requested.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "call graph loaded"
        );

        Ok(LoadedGraph {
            graph,
            packages,
            requested,
        })
    }
}

fn to_symbol(id: u32, record: SymbolRecord) -> Result<Symbol> {
    if record.name.is_empty() {
        return Err(Error::contract_violation("symbol with an empty name")
            .with_operation("interchange::into_graph")
            .with_context("node", id.to_string()));
    }
    Ok(match record.receiver {
        Some(receiver) => Symbol::method(record.package, receiver, record.name),
        None => Symbol::function(record.package, record.name),
    })
}

fn invalid(message: impl Into<String>) -> Error {
    Error::invalid_graph(message).with_operation("interchange::into_graph")
}

/// Read, parse and validate an interchange file.
pub fn load_graph(path: &Path) -> Result<LoadedGraph> {
    GraphFile::from_path(path)?.into_graph()
}
