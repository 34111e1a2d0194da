//! # One-Hop Transitive Edges
//!
//! An edge `(u, w)` is *one-hop transitive* when there is a vertex `v` with
//! edges `(u, v)` and `(v, w)`. This module finds all such edges and removes
//! them. It is not a general transitive reduction: longer alternative paths are
//! ignored, which is what the short-cut edges of assembly graphs call for.
//!
//! ## Phases
//!
//! The pass is split in two so the graph is never mutated while its
//! adjacency is being walked:
//!
//! 1. [`find_transitive_edges`] scans the graph read-only and appends the
//!    handles of transitive edges to a caller supplied sink.
//! 2. [`remove_edges`] deletes a batch of handles through the graph's own
//!    removal primitive.
//!
//! [`remove_transitive_edges`] runs both and reports how many edges went.
//!
//! Vertices flagged as removed are not used as a source `u`, but may still act
//! as the intermediate `v` or the target `w` for another vertex.
//!
//! The graph must be free of self-loops. A self-loop met during the scan is
//! reported as [`TransitiveError::SelfLoop`] and nothing is removed.

use ahash::AHashSet;
use tracing::{debug, debug_span, trace, warn};

use crate::{
    error::{GraphError, TransitiveError},
    traits::TransitiveGraph,
};

/// Appends every one-hop transitive edge of `graph` to `out`.
///
/// For each active vertex `u`, in the graph's vertex order, the set of
/// vertices reachable in exactly two hops is built, then each out-edge
/// `(u, w)` whose target is in that set is emitted, in out-edge order. Every
/// out-edge is visited once, so parallel copies of a transitive edge are all
/// emitted.
///
/// The graph is not modified.
///
/// # Errors
///
/// Returns [`TransitiveError::SelfLoop`] when a self-loop is found. Edges of
/// the vertices scanned before the offending one are already in `out` at
/// that point.
pub fn find_transitive_edges<G, X>(graph: &G, out: &mut X) -> Result<(), GraphError<G>>
where
    G: TransitiveGraph,
    X: Extend<G::Edge>,
{
    let _span = debug_span!("find_transitive_edges").entered();
    let mut scanned = 0usize;
    let mut flagged = 0usize;

    for u in graph.node_ids() {
        if graph.is_removed(u) {
            trace!(?u, "skipping removed vertex");
            continue;
        }
        scanned += 1;

        let two_hop = two_hop_targets(graph, u)?;
        if two_hop.is_empty() {
            continue;
        }

        for uw in graph.out_edges(u) {
            if two_hop.contains(&graph.target(uw)) {
                trace!(?u, edge = ?uw, "transitive edge");
                out.extend(Some(uw));
                flagged += 1;
            }
        }
    }

    debug!(scanned, flagged, "transitive edge scan done");
    Ok(())
}

/// Vertices reachable from `u` by following exactly two edges.
fn two_hop_targets<G: TransitiveGraph>(
    graph: &G,
    u: G::Node,
) -> Result<AHashSet<G::Node>, GraphError<G>> {
    let mut seen = AHashSet::new();
    for v in graph.neighbors(u) {
        if v == u {
            return Err(TransitiveError::SelfLoop { node: u });
        }
        for w in graph.neighbors(v) {
            if w == v {
                return Err(TransitiveError::SelfLoop { node: v });
            }
            seen.insert(w);
        }
    }
    Ok(seen)
}

/// Removes each of `edges` from `graph`, left to right.
///
/// Every edge is attempted even if an earlier one failed; no handle is
/// re-validated beforehand.
///
/// # Errors
///
/// Returns [`TransitiveError::Removal`] listing the rejected edges along with
/// the graph's reason, if any removal failed.
pub fn remove_edges<G, I>(graph: &mut G, edges: I) -> Result<usize, GraphError<G>>
where
    G: TransitiveGraph,
    I: IntoIterator<Item = G::Edge>,
{
    let mut attempted = 0usize;
    let mut failures = Vec::new();

    for edge in edges {
        attempted += 1;
        if let Err(err) = graph.remove_edge(edge) {
            warn!(?edge, ?err, "failed to remove edge");
            failures.push((edge, err));
        }
    }

    debug!(attempted, failed = failures.len(), "edge batch removed");
    if failures.is_empty() {
        Ok(attempted)
    } else {
        Err(TransitiveError::Removal {
            attempted,
            failures,
        })
    }
}

/// Finds and removes all one-hop transitive edges of `graph`.
///
/// Returns the number of removed edges. A single pass is enough: removing
/// edges only shrinks the two-hop sets, so running it again removes nothing.
///
/// # Errors
///
/// [`TransitiveError::SelfLoop`] if the graph has a self-loop, in which case
/// the graph is left untouched, and [`TransitiveError::Removal`] if the graph
/// rejected some of the removals.
///
/// # Examples
///
/// ```rust
/// use hopcut::{algorithms::transitive_ops::remove_transitive_edges, digraph};
///
/// // A -> B -> C with the short-cut A -> C
/// let mut g = digraph!(A -> B -> C; A -> C);
/// assert_eq!(remove_transitive_edges(&mut g).unwrap(), 1);
/// let (a, c) = (g.node_by_data(&"A").unwrap(), g.node_by_data(&"C").unwrap());
/// assert!(!g.has_edge(a, c));
/// ```
pub fn remove_transitive_edges<G: TransitiveGraph>(graph: &mut G) -> Result<usize, GraphError<G>> {
    let mut transitive = Vec::new();
    find_transitive_edges(graph, &mut transitive)?;
    let removed = remove_edges(graph, transitive)?;
    debug!(removed, "removed transitive edges");
    Ok(removed)
}

/// Method spelling of the transitive-edge operations for every
/// [`TransitiveGraph`].
pub trait TransitiveEdgesExt: TransitiveGraph + Sized {
    /// Collects the one-hop transitive edges, see [`find_transitive_edges`].
    fn transitive_edges(&self) -> Result<Vec<Self::Edge>, GraphError<Self>> {
        let mut edges = Vec::new();
        find_transitive_edges(self, &mut edges)?;
        Ok(edges)
    }

    /// See [`remove_transitive_edges`].
    fn remove_transitive_edges(&mut self) -> Result<usize, GraphError<Self>> {
        remove_transitive_edges(self)
    }
}

impl<G: TransitiveGraph> TransitiveEdgesExt for G {}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::{
        digraph,
        digraph::{DiGraph, DiGraphError, NodeIndex},
    };

    fn node(g: &DiGraph<&'static str, ()>, name: &'static str) -> NodeIndex {
        g.node_by_data(&name).unwrap()
    }

    fn edge_names(g: &DiGraph<&'static str, ()>, edges: &[crate::EdgeIndex]) -> Vec<String> {
        edges
            .iter()
            .map(|&e| format!("{}->{}", g.node_data(g.source(e)), g.node_data(g.target(e))))
            .collect()
    }

    #[test]
    fn triangle() {
        let mut g = digraph!(A -> B -> C; A -> C);

        let removed = g.remove_transitive_edges().unwrap();

        assert_eq!(removed, 1);
        insta::assert_snapshot!(g.to_string(), @r"
        digraph {
          A -> B;
          B -> C;
        }
        ");
    }

    #[test]
    fn finder_does_not_touch_the_graph() {
        let g = digraph!(A -> B -> C; A -> C);
        let edges = g.transitive_edges().unwrap();
        assert_eq!(edge_names(&g, &edges), ["A->C"]);
        assert_eq!(g.n_edges(), 3);
    }

    #[test]
    fn finder_appends_to_caller_sink() {
        let g = digraph!(A -> B -> C; A -> C);
        let (a, c) = (node(&g, "A"), node(&g, "C"));
        let ac = g.find_edge(a, c).unwrap();
        let sentinel = g.find_edge(a, node(&g, "B")).unwrap();

        let mut sink = VecDeque::from([sentinel]);
        find_transitive_edges(&g, &mut sink).unwrap();

        assert_eq!(sink, [sentinel, ac]);
    }

    #[test]
    fn diamond_with_shortcut() {
        let mut g = digraph!(
            A -> B -> D;
            A -> C -> D;
            A -> D
        );

        assert_eq!(g.remove_transitive_edges().unwrap(), 1);
        assert!(!g.has_edge(node(&g, "A"), node(&g, "D")));
        assert_eq!(g.n_edges(), 4);
    }

    #[test]
    fn longer_paths_are_ignored() {
        let mut g = digraph!(A -> B -> C -> D; A -> D);

        assert_eq!(g.remove_transitive_edges().unwrap(), 0);
        assert!(g.has_edge(node(&g, "A"), node(&g, "D")));
    }

    #[test]
    fn chain_with_two_shortcuts() {
        // u -> x is only two hops away through the short-cut u -> w, which is
        // itself transitive. Both are flagged against the same snapshot.
        let mut g = digraph!(u -> v -> w -> x; u -> w; u -> x);

        let flagged = g.transitive_edges().unwrap();
        assert_eq!(edge_names(&g, &flagged), ["u->w", "u->x"]);

        assert_eq!(g.remove_transitive_edges().unwrap(), 2);
        similar_asserts::assert_eq!(
            g.to_string(),
            "digraph {\n  u -> v;\n  v -> w;\n  w -> x;\n}"
        );
        assert_eq!(g.remove_transitive_edges().unwrap(), 0);
    }

    #[test]
    fn emission_follows_vertex_then_out_edge_order() {
        let g = digraph!(
            C -> D;
            A -> D;
            A -> B -> D;
            A -> C;
            B -> C
        );

        let flagged = g.transitive_edges().unwrap();

        // C and D come first but contribute nothing; B -> D is transitive via C.
        assert_eq!(edge_names(&g, &flagged), ["A->D", "A->C", "B->D"]);
    }

    #[test]
    fn removed_source_is_skipped() {
        let mut g = digraph!(A -> B -> C; A -> C);
        g.remove_node(node(&g, "A")).unwrap();

        assert_eq!(g.remove_transitive_edges().unwrap(), 0);
        assert_eq!(g.n_edges(), 3);
    }

    #[test]
    fn removed_vertex_can_be_intermediate() {
        let mut g = digraph!(A -> B -> C; A -> C);
        g.remove_node(node(&g, "B")).unwrap();

        assert_eq!(g.remove_transitive_edges().unwrap(), 1);
        assert!(!g.has_edge(node(&g, "A"), node(&g, "C")));
        assert!(g.has_edge(node(&g, "B"), node(&g, "C")));
    }

    #[test]
    fn removed_vertex_can_be_target() {
        let mut g = digraph!(A -> B -> C; A -> C);
        g.remove_node(node(&g, "C")).unwrap();

        assert_eq!(g.remove_transitive_edges().unwrap(), 1);
    }

    #[test]
    fn parallel_shortcuts_are_all_removed() {
        let mut g = digraph!(A -> B -> C; A -> C; A -> C);
        assert_eq!(g.n_edges(), 4);

        assert_eq!(g.remove_transitive_edges().unwrap(), 2);
        assert!(!g.has_edge(node(&g, "A"), node(&g, "C")));
    }

    #[test]
    fn edgeless_graphs() {
        let mut empty = digraph!();
        assert_eq!(empty.remove_transitive_edges().unwrap(), 0);

        let mut isolated = digraph!(A; B; C);
        assert_eq!(isolated.remove_transitive_edges().unwrap(), 0);
        assert_eq!(isolated.n_nodes(), 3);
    }

    #[test]
    fn self_loop_is_rejected() {
        let mut g = digraph!(A -> A);
        let a = node(&g, "A");

        let err = g.remove_transitive_edges().unwrap_err();

        assert!(matches!(err, TransitiveError::SelfLoop { node } if node == a));
        assert_eq!(err.removed(), 0);
        assert_eq!(g.n_edges(), 1);
    }

    #[test]
    fn self_loop_on_intermediate_is_rejected() {
        let mut g = digraph!(A -> B -> B; B -> C; A -> C);
        let b = node(&g, "B");

        let err = g.remove_transitive_edges().unwrap_err();

        assert!(matches!(err, TransitiveError::SelfLoop { node } if node == b));
        assert_eq!(g.n_edges(), 4);
        assert_eq!(
            err.to_string(),
            format!("self-loop at vertex {b:?}: transitive edge detection requires a loop-free graph")
        );
    }

    #[test]
    fn stale_handles_are_reported_after_the_whole_batch() {
        let mut g = digraph!(A -> B -> C; A -> C; B -> D; C -> D);
        let flagged = g.transitive_edges().unwrap();
        assert_eq!(edge_names(&g, &flagged), ["A->C", "B->D"]);

        g.remove_edge(flagged[0]).unwrap();
        let err = remove_edges(&mut g, flagged.iter().copied()).unwrap_err();

        let TransitiveError::Removal {
            attempted,
            ref failures,
        } = err
        else {
            panic!("expected a removal error, got {err:?}");
        };
        assert_eq!(attempted, 2);
        assert_eq!(
            failures,
            &[(flagged[0], DiGraphError::EdgeAlreadyRemoved(flagged[0]))]
        );
        assert_eq!(err.removed(), 1);
        assert_eq!(err.to_string(), "1 of 2 edge removals failed");
        assert!(!g.is_live(flagged[1]));
    }

    #[test]
    fn remove_edges_counts_batch() {
        let mut g = digraph!(A -> B -> C; A -> C);
        let all: Vec<_> = g.iter_edges().map(|(e, ..)| e).collect();

        assert_eq!(remove_edges(&mut g, all).unwrap(), 3);
        assert_eq!(g.n_edges(), 0);
        assert_eq!(remove_edges(&mut g, []).unwrap(), 0);
    }
}
