use std::fmt;

use apigraph_error::{Error, Result};

use crate::symbol::Symbol;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Default)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl NodeId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Default)]
pub struct EdgeId(pub u32);

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl EdgeId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A call graph node. The synthetic root carries no symbol.
#[derive(Debug, Clone)]
pub struct CallNode {
    id: NodeId,
    symbol: Option<Symbol>,
    /// Outgoing edges in insertion order
    out: Vec<EdgeId>,
}

impl CallNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn symbol(&self) -> Option<&Symbol> {
        self.symbol.as_ref()
    }

    /// The node's symbol, for callers that cannot continue without one.
    pub fn require_symbol(&self) -> Result<&Symbol> {
        self.symbol.as_ref().ok_or_else(|| {
            Error::contract_violation(format!("node {} has no symbol", self.id))
                .with_context("node", self.id.to_string())
        })
    }

    pub fn out_edges(&self) -> &[EdgeId] {
        &self.out
    }
}

impl fmt::Display for CallNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.symbol {
            Some(symbol) => write!(f, "n{}:{}", self.id, symbol),
            None => write!(f, "n{}:<root>", self.id),
        }
    }
}

/// One call site. Several edges may join the same pair of nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallEdge {
    pub id: EdgeId,
    pub caller: NodeId,
    pub callee: NodeId,
    pub line: Option<u32>,
}

/// An edge together with both of its endpoint nodes.
#[derive(Debug, Clone, Copy)]
pub struct CallEdgeRef<'g> {
    pub edge: &'g CallEdge,
    pub caller: &'g CallNode,
    pub callee: &'g CallNode,
}

impl<'g> CallEdgeRef<'g> {
    pub fn id(&self) -> EdgeId {
        self.edge.id
    }

    pub fn is_self_loop(&self) -> bool {
        self.caller.id == self.callee.id
    }

    pub fn caller_symbol(&self) -> Result<&'g Symbol> {
        self.caller.require_symbol()
    }

    pub fn callee_symbol(&self) -> Result<&'g Symbol> {
        self.callee.require_symbol()
    }
}

impl fmt::Display for CallEdgeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --> {}", self.caller, self.callee)
    }
}

/// Whole-program call graph. Append-only; nodes and edges get dense ids.
#[derive(Debug, Clone, Default)]
pub struct CallGraph {
    nodes: Vec<CallNode>,
    edges: Vec<CallEdge>,
}

impl CallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, symbol: Option<Symbol>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(CallNode {
            id,
            symbol,
            out: Vec::new(),
        });
        id
    }

    pub fn add_root(&mut self) -> NodeId {
        self.add_node(None)
    }

    pub fn add_function(&mut self, package: &str, name: &str) -> NodeId {
        self.add_node(Some(Symbol::function(package, name)))
    }

    pub fn add_method(&mut self, package: &str, receiver: &str, name: &str) -> NodeId {
        self.add_node(Some(Symbol::method(package, receiver, name)))
    }

    pub fn add_edge(&mut self, caller: NodeId, callee: NodeId) -> Result<EdgeId> {
        self.add_call(caller, callee, None)
    }

    /// Add a call edge for the call site at `line`.
    pub fn add_call(&mut self, caller: NodeId, callee: NodeId, line: Option<u32>) -> Result<EdgeId> {
        for endpoint in [caller, callee] {
            if endpoint.index() >= self.nodes.len() {
                return Err(Error::node_not_found(endpoint.to_string())
                    .with_operation("graph::add_call"));
            }
        }

        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(CallEdge {
            id,
            caller,
            callee,
            line,
        });
        self.nodes[caller.index()].out.push(id);
        Ok(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&CallNode> {
        self.nodes.get(id.index())
    }

    pub fn edge(&self, id: EdgeId) -> Option<&CallEdge> {
        self.edges.get(id.index())
    }

    /// Resolve an edge id into the edge plus both endpoints.
    pub fn edge_ref(&self, id: EdgeId) -> Result<CallEdgeRef<'_>> {
        let edge = self
            .edge(id)
            .ok_or_else(|| Error::contract_violation(format!("edge {} not found", id)))?;
        let caller = self
            .node(edge.caller)
            .ok_or_else(|| Error::node_not_found(edge.caller.to_string()))?;
        let callee = self
            .node(edge.callee)
            .ok_or_else(|| Error::node_not_found(edge.callee.to_string()))?;
        Ok(CallEdgeRef {
            edge,
            caller,
            callee,
        })
    }

    /// Nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &CallNode> {
        self.nodes.iter()
    }

    pub fn edges(&self) -> impl Iterator<Item = &CallEdge> {
        self.edges.iter()
    }

    /// Outgoing edges of `id` in insertion order; empty for unknown ids.
    pub fn out_edges(&self, id: NodeId) -> impl Iterator<Item = &CallEdge> {
        self.node(id)
            .map(|node| node.out.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(|edge_id| self.edge(*edge_id))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apigraph_error::ErrorKind;

    #[test]
    fn test_ids_are_dense() {
        let mut graph = CallGraph::new();
        let root = graph.add_root();
        let foo = graph.add_function("a", "Foo");
        let run = graph.add_method("a", "Server", "Run");

        assert_eq!(root, NodeId(0));
        assert_eq!(foo, NodeId(1));
        assert_eq!(run, NodeId(2));
        assert_eq!(graph.node_count(), 3);
        assert!(graph.node(root).unwrap().symbol().is_none());
    }

    #[test]
    fn test_parallel_edges_are_kept() {
        let mut graph = CallGraph::new();
        let foo = graph.add_function("a", "Foo");
        let bar = graph.add_function("b", "Bar");
        let first = graph.add_call(foo, bar, Some(3)).unwrap();
        let second = graph.add_call(foo, bar, Some(7)).unwrap();

        assert_ne!(first, second);
        assert_eq!(graph.edge_count(), 2);
        let lines: Vec<_> = graph.out_edges(foo).map(|e| e.line).collect();
        assert_eq!(lines, vec![Some(3), Some(7)]);
        assert_eq!(graph.out_edges(bar).count(), 0);
    }

    #[test]
    fn test_edge_to_unknown_node_is_rejected() {
        let mut graph = CallGraph::new();
        let foo = graph.add_function("a", "Foo");
        let err = graph.add_edge(foo, NodeId(9)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NodeNotFound);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_edge_ref_endpoints() {
        let mut graph = CallGraph::new();
        let foo = graph.add_function("a", "Foo");
        let edge = graph.add_edge(foo, foo).unwrap();
        let edge = graph.edge_ref(edge).unwrap();

        assert!(edge.is_self_loop());
        assert_eq!(edge.caller_symbol().unwrap().name(), "Foo");
        assert_eq!(edge.to_string(), "n0:a.Foo --> n0:a.Foo");
    }

    #[test]
    fn test_root_has_no_symbol() {
        let mut graph = CallGraph::new();
        let root = graph.add_root();
        let node = graph.node(root).unwrap();
        assert_eq!(node.to_string(), "n0:<root>");
        assert_eq!(
            node.require_symbol().unwrap_err().kind(),
            ErrorKind::ContractViolation
        );
    }
}
