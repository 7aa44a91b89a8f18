use std::collections::HashSet;

use apigraph_core::{
    CallEdgeRef, CallGraph, Error, ErrorKind, MatchMode, NodeId, Package, PackageSet, Result,
    TraversalOptions, traverse_exported,
};
use pretty_assertions::assert_eq;

fn packages(list: &[(&str, &[&str])]) -> PackageSet {
    list.iter()
        .map(|(path, members)| Package::new(*path).with_members(members.iter().copied()))
        .collect()
}

fn delivered(graph: &CallGraph, scope: &PackageSet, options: &TraversalOptions) -> Vec<(NodeId, NodeId)> {
    let mut out = Vec::new();
    let mut visitor = |edge: CallEdgeRef<'_>| -> Result<()> {
        out.push((edge.caller.id(), edge.callee.id()));
        Ok(())
    };
    traverse_exported(graph, scope, options, &mut visitor).unwrap();
    out
}

/// A small program: two packages, a method, an unexported helper and a cycle.
fn program() -> (CallGraph, PackageSet) {
    let mut g = CallGraph::new();
    let root = g.add_root();
    let serve = g.add_function("example.com/a", "Serve");
    let helper = g.add_function("example.com/a", "helper");
    let hidden = g.add_function("example.com/b", "Hidden");
    let dial = g.add_function("example.com/b", "Dial");
    let run = g.add_method("example.com/b", "Conn", "Run");
    let close = g.add_method("example.com/b", "Conn", "Close");

    g.add_edge(root, serve).unwrap();
    g.add_edge(serve, helper).unwrap();
    g.add_edge(helper, hidden).unwrap();
    g.add_edge(serve, dial).unwrap();
    g.add_edge(serve, dial).unwrap();
    g.add_edge(dial, run).unwrap();
    g.add_edge(run, close).unwrap();
    g.add_edge(close, run).unwrap();
    g.add_edge(run, run).unwrap();

    let scope = packages(&[
        ("example.com/a", &["Serve", "helper"]),
        ("example.com/b", &["Dial", "Hidden"]),
    ]);
    (g, scope)
}

#[test]
fn test_runs_are_repeatable() {
    let (graph, scope) = program();
    let options = TraversalOptions::default();
    let first = delivered(&graph, &scope, &options);
    let second = delivered(&graph, &scope, &options);
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn test_no_callee_is_delivered_twice() {
    let (graph, scope) = program();
    let edges = delivered(&graph, &scope, &TraversalOptions::default());

    let mut callees = HashSet::new();
    for (_, callee) in &edges {
        assert!(callees.insert(*callee), "callee {} delivered twice", callee);
    }
}

#[test]
fn test_unexported_hop_blocks_propagation() {
    let (graph, scope) = program();
    let edges = delivered(&graph, &scope, &TraversalOptions::default());

    // helper is unexported, so Hidden is only reachable as its own seed and
    // never as a callee.
    let callees: Vec<_> = edges.iter().map(|(_, callee)| callee.as_u32()).collect();
    assert!(!callees.contains(&2));
    assert!(!callees.contains(&3));
}

#[test]
fn test_every_delivered_callee_is_exported() {
    let (graph, scope) = program();
    for (_, callee) in delivered(&graph, &scope, &TraversalOptions::default()) {
        let symbol = graph.node(callee).unwrap().symbol().unwrap();
        assert!(symbol.is_exported().unwrap(), "{} is not exported", symbol);
    }
}

#[test]
fn test_bfs_order_over_program() {
    let (graph, scope) = program();
    let edges = delivered(&graph, &scope, &TraversalOptions::default());

    // Seeds in id order: Serve(1), Hidden(3), Dial(4). Dial is a seed, so the
    // Serve -> Dial edges are discarded and Dial's callee Run comes first.
    let expected = vec![(NodeId(4), NodeId(5)), (NodeId(5), NodeId(6))];
    assert_eq!(edges, expected);
}

#[test]
fn test_scenario_unexported_middle_yields_nothing() {
    let mut g = CallGraph::new();
    let foo = g.add_function("A", "Foo");
    let bar = g.add_function("A", "bar");
    let baz = g.add_function("A", "Baz");
    g.add_edge(foo, bar).unwrap();
    g.add_edge(bar, baz).unwrap();

    // Baz is not a declared member, so it can only be reached through bar.
    let scope = packages(&[("A", &["Foo", "bar"])]);
    assert!(delivered(&g, &scope, &TraversalOptions::default()).is_empty());
}

#[test]
fn test_scenario_cross_package_call() {
    let mut g = CallGraph::new();
    let foo = g.add_function("A", "Foo");
    let qux = g.add_function("B", "Qux");
    g.add_edge(foo, qux).unwrap();

    let scope = packages(&[("A", &["Foo"])]);
    assert_eq!(
        delivered(&g, &scope, &TraversalOptions::default()),
        vec![(foo, qux)]
    );
}

#[test]
fn test_scenario_same_package_call_is_delivered() {
    let mut g = CallGraph::new();
    let foo = g.add_function("A", "Foo");
    let bar = g.add_function("A", "Bar");
    g.add_edge(foo, bar).unwrap();

    // Only Foo is declared, so Bar is reached as a callee rather than a seed.
    let scope = packages(&[("A", &["Foo"])]);
    let mut same_package = Vec::new();
    let mut visitor = |edge: CallEdgeRef<'_>| -> Result<()> {
        same_package.push(edge.caller_symbol()?.package() == edge.callee_symbol()?.package());
        Ok(())
    };
    traverse_exported(&g, &scope, &TraversalOptions::default(), &mut visitor).unwrap();
    assert_eq!(same_package, vec![true]);
}

#[test]
fn test_visitor_error_kind_survives() {
    let (graph, scope) = program();
    let mut calls = 0;
    let mut visitor = |_edge: CallEdgeRef<'_>| -> Result<()> {
        calls += 1;
        Err(Error::render_failed("sink closed"))
    };
    let err = traverse_exported(&graph, &scope, &TraversalOptions::default(), &mut visitor)
        .unwrap_err();

    assert_eq!(calls, 1);
    assert_eq!(err.kind(), ErrorKind::RenderFailed);
    assert_eq!(err.operation(), "traverse::visit");
}

#[test]
fn test_no_seeds_is_not_an_error() {
    let (graph, _) = program();
    let empty = PackageSet::new();
    assert!(delivered(&graph, &empty, &TraversalOptions::default()).is_empty());

    let unexported_only = packages(&[("example.com/a", &["helper"])]);
    assert!(delivered(&graph, &unexported_only, &TraversalOptions::default()).is_empty());
}

#[test]
fn test_simple_name_mode_seeds_other_packages() {
    let mut g = CallGraph::new();
    let ours = g.add_function("A", "Open");
    let theirs = g.add_function("Z", "Open");
    let sink = g.add_function("Y", "Write");
    g.add_edge(theirs, sink).unwrap();
    g.add_edge(ours, ours).unwrap();

    let scope = packages(&[("A", &["Open"])]);

    let qualified = delivered(&g, &scope, &TraversalOptions::default());
    assert!(qualified.is_empty());

    let by_name = TraversalOptions::new().with_match_mode(MatchMode::SimpleName);
    assert_eq!(delivered(&g, &scope, &by_name), vec![(theirs, sink)]);
}
