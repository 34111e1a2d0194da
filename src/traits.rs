//! The capability set the transitive-edge pass needs from a graph.
//!
//! Any container that can enumerate its vertices, report which of them are
//! removed, walk out-neighbors and out-edges, resolve an edge's target and
//! delete an edge by handle can be cleaned by
//! [`remove_transitive_edges`](crate::algorithms::transitive_ops::remove_transitive_edges).

use std::{fmt::Debug, hash::Hash};

/// A directed graph as seen by the transitive-edge algorithms.
///
/// Handles are plain `Copy` values. Edge handles collected from one snapshot
/// of the graph are later passed back to [`remove_edge`](Self::remove_edge),
/// so an implementation should keep the handles of untouched edges valid
/// across the removal of other edges.
pub trait TransitiveGraph {
    type Node: Copy + Eq + Hash + Debug;
    type Edge: Copy + Debug;
    /// Failure reported by [`remove_edge`](Self::remove_edge).
    type RemoveError: Debug;

    /// All vertices, in a stable order.
    fn node_ids(&self) -> impl Iterator<Item = Self::Node> + '_;

    /// Whether the vertex has been flagged as removed.
    fn is_removed(&self, node: Self::Node) -> bool;

    /// Direct out-neighbors of `node`, one entry per out-edge.
    fn neighbors(&self, node: Self::Node) -> impl Iterator<Item = Self::Node> + '_;

    /// Direct out-edges of `node`.
    fn out_edges(&self, node: Self::Node) -> impl Iterator<Item = Self::Edge> + '_;

    fn target(&self, edge: Self::Edge) -> Self::Node;

    fn remove_edge(&mut self, edge: Self::Edge) -> Result<(), Self::RemoveError>;
}
