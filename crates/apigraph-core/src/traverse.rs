//! Export-seeded breadth-first traversal.
//!
//! Seeds are the exported top-level members of the in-scope packages. From every
//! seed node the walk only follows edges whose callee is itself exported, so a call
//! through an unexported helper ends the path there. Each callee node is delivered
//! to the visitor at most once, through the first edge that reaches it.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use apigraph_error::Result;
use tracing::{debug, info, trace};

use crate::graph::{CallEdgeRef, CallGraph, CallNode, EdgeId, NodeId};
use crate::package::PackageSet;
use crate::symbol::Symbol;

/// How a graph node is matched against the exported package members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Package path and name must both match, and the symbol must not be a method.
    #[default]
    Qualified,
    /// Only the simple name must match. Same-named symbols in other packages, and
    /// methods named like a member, are seeded too.
    SimpleName,
}

#[derive(Debug, Clone, Default)]
pub struct TraversalOptions {
    pub match_mode: MatchMode,
}

impl TraversalOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }
}

/// Receives every edge the traversal accepts, in BFS order.
///
/// Returning an error stops the traversal; the error reaches the caller of
/// [`ExportTraversal::run`].
pub trait EdgeVisitor {
    fn visit_edge(&mut self, edge: CallEdgeRef<'_>) -> Result<()>;
}

impl<F> EdgeVisitor for F
where
    F: FnMut(CallEdgeRef<'_>) -> Result<()>,
{
    fn visit_edge(&mut self, edge: CallEdgeRef<'_>) -> Result<()> {
        self(edge)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Nodes primed as seeds
    pub seeds: usize,
    /// Edges pushed onto the queue
    pub enqueued: usize,
    /// Edges dropped because their callee was already visited
    pub discarded: usize,
    /// Edges handed to the visitor
    pub delivered: usize,
}

/// Node id -> visited flag for one run. Flags are never cleared.
#[derive(Debug, Clone)]
pub struct VisitedSet {
    seen: Vec<bool>,
    count: usize,
}

impl VisitedSet {
    pub fn with_capacity(node_count: usize) -> Self {
        Self {
            seen: vec![false; node_count],
            count: 0,
        }
    }

    /// Mark `id` visited. Returns false if it already was.
    pub fn insert(&mut self, id: NodeId) -> bool {
        let idx = id.index();
        if idx >= self.seen.len() {
            self.seen.resize(idx + 1, false);
        }
        if self.seen[idx] {
            return false;
        }
        self.seen[idx] = true;
        self.count += 1;
        true
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.seen.get(id.index()).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Exported top-level members of the in-scope packages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSet {
    /// package path -> exported member names
    by_package: BTreeMap<String, BTreeSet<String>>,
    /// exported member names across all packages
    names: BTreeSet<String>,
}

impl SeedSet {
    pub fn compute(packages: &PackageSet) -> Result<Self> {
        let mut seeds = SeedSet::default();
        for package in packages.iter() {
            let exported = package.exported_members()?;
            trace!(package = package.path(), exported = exported.len(), "package seeds");
            let entry = seeds.by_package.entry(package.path().to_string()).or_default();
            for name in exported {
                entry.insert(name.to_string());
                seeds.names.insert(name.to_string());
            }
        }
        Ok(seeds)
    }

    pub fn matches(&self, symbol: &Symbol, mode: MatchMode) -> bool {
        match mode {
            MatchMode::SimpleName => self.names.contains(symbol.name()),
            MatchMode::Qualified => {
                symbol.is_top_level()
                    && self
                        .by_package
                        .get(symbol.package())
                        .is_some_and(|names| names.contains(symbol.name()))
            }
        }
    }

    /// Number of (package, member) seed entries.
    pub fn len(&self) -> usize {
        self.by_package.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// One traversal over an immutable graph. Holds no state between runs.
pub struct ExportTraversal<'g> {
    graph: &'g CallGraph,
    packages: &'g PackageSet,
    options: TraversalOptions,
}

impl<'g> ExportTraversal<'g> {
    pub fn new(graph: &'g CallGraph, packages: &'g PackageSet) -> Self {
        Self {
            graph,
            packages,
            options: TraversalOptions::default(),
        }
    }

    pub fn with_options(mut self, options: TraversalOptions) -> Self {
        self.options = options;
        self
    }

    /// Seed nodes in ascending id order. Nodes without a symbol are skipped.
    pub fn seeds(&self) -> Result<Vec<NodeId>> {
        let seed_set = SeedSet::compute(self.packages)?;
        Ok(self.seed_nodes(&seed_set).map(CallNode::id).collect())
    }

    fn seed_nodes<'s>(&'s self, seed_set: &'s SeedSet) -> impl Iterator<Item = &'g CallNode> + 's {
        let mode = self.options.match_mode;
        self.graph.nodes().filter(move |node| {
            node.symbol()
                .is_some_and(|symbol| seed_set.matches(symbol, mode))
        })
    }

    pub fn run<V>(&self, visitor: &mut V) -> Result<TraversalStats>
    where
        V: EdgeVisitor + ?Sized,
    {
        let seed_set = SeedSet::compute(self.packages)?;
        let mut stats = TraversalStats::default();
        let mut visited = VisitedSet::with_capacity(self.graph.node_count());
        let mut queue: VecDeque<EdgeId> = VecDeque::new();

        for node in self.seed_nodes(&seed_set) {
            visited.insert(node.id());
            stats.seeds += 1;
            stats.enqueued += self.enqueue_exported(node, &mut queue)?;
        }
        debug!(
            packages = self.packages.len(),
            members = seed_set.len(),
            seeds = stats.seeds,
            queued = queue.len(),
            "queue primed"
        );

        while let Some(edge_id) = queue.pop_front() {
            let edge = self.graph.edge_ref(edge_id)?;
            if !visited.insert(edge.callee.id()) {
                stats.discarded += 1;
                continue;
            }

            trace!(%edge, "visit");
            visitor.visit_edge(edge).map_err(|e| {
                e.with_operation("traverse::visit")
                    .with_context("edge", edge.to_string())
            })?;
            stats.delivered += 1;
            stats.enqueued += self.enqueue_exported(edge.callee, &mut queue)?;
        }

        info!(
            seeds = stats.seeds,
            visited = visited.len(),
            delivered = stats.delivered,
            discarded = stats.discarded,
            "exported traversal done"
        );
        Ok(stats)
    }

    /// Queue every outgoing edge of `node` whose callee is exported.
    fn enqueue_exported(&self, node: &CallNode, queue: &mut VecDeque<EdgeId>) -> Result<usize> {
        let mut pushed = 0;
        for edge in self.graph.out_edges(node.id()) {
            let callee = self.graph.edge_ref(edge.id)?.callee;
            let symbol = callee
                .require_symbol()
                .map_err(|e| e.with_operation("traverse::enqueue"))?;
            let exported = symbol
                .is_exported()
                .map_err(|e| e.with_context("node", callee.id().to_string()))?;
            if exported {
                queue.push_back(edge.id);
                pushed += 1;
            }
        }
        Ok(pushed)
    }
}

/// Run one export-seeded traversal. See [`ExportTraversal`].
pub fn traverse_exported<V>(
    graph: &CallGraph,
    packages: &PackageSet,
    options: &TraversalOptions,
    visitor: &mut V,
) -> Result<TraversalStats>
where
    V: EdgeVisitor + ?Sized,
{
    ExportTraversal::new(graph, packages)
        .with_options(options.clone())
        .run(visitor)
}
