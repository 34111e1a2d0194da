//! [`TransitiveGraph`] for petgraph's [`StableGraph`].
//!
//! Only the stable variant is supported: `petgraph::Graph::remove_edge` moves
//! the last edge into the freed slot, which would invalidate the handles
//! collected before the removal phase. petgraph has no removed flag; deleted
//! vertices are simply absent, so every enumerated vertex is active.

use petgraph::{
    stable_graph::{EdgeIndex, IndexType, NodeIndex, StableGraph},
    visit::EdgeRef,
    Directed,
    Direction::Outgoing,
};
use thiserror::Error;

use crate::{digraph::DiGraph, traits::TransitiveGraph};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("edge {0:?} is not in the graph")]
pub struct StaleEdge<Ix: IndexType>(pub EdgeIndex<Ix>);

impl<N, E, Ix: IndexType> TransitiveGraph for StableGraph<N, E, Directed, Ix> {
    type Node = NodeIndex<Ix>;
    type Edge = EdgeIndex<Ix>;
    type RemoveError = StaleEdge<Ix>;

    fn node_ids(&self) -> impl Iterator<Item = NodeIndex<Ix>> + '_ {
        self.node_indices()
    }

    fn is_removed(&self, _node: NodeIndex<Ix>) -> bool {
        false
    }

    fn neighbors(&self, node: NodeIndex<Ix>) -> impl Iterator<Item = NodeIndex<Ix>> + '_ {
        self.neighbors_directed(node, Outgoing)
    }

    fn out_edges(&self, node: NodeIndex<Ix>) -> impl Iterator<Item = EdgeIndex<Ix>> + '_ {
        self.edges_directed(node, Outgoing).map(|e| e.id())
    }

    /// # Panics
    ///
    /// If `edge` is not in the graph.
    fn target(&self, edge: EdgeIndex<Ix>) -> NodeIndex<Ix> {
        match self.edge_endpoints(edge) {
            Some((_, target)) => target,
            None => panic!("edge {edge:?} is not in the graph"),
        }
    }

    fn remove_edge(&mut self, edge: EdgeIndex<Ix>) -> Result<(), StaleEdge<Ix>> {
        StableGraph::remove_edge(self, edge)
            .map(|_| ())
            .ok_or(StaleEdge(edge))
    }
}

/// Copies every vertex and live edge. Vertex `i` of the [`DiGraph`] becomes
/// `NodeIndex::new(i)`; removed flags are not carried over.
impl<V: Clone, E: Clone> From<&DiGraph<V, E>> for StableGraph<V, E> {
    fn from(graph: &DiGraph<V, E>) -> Self {
        let mut stable = StableGraph::with_capacity(graph.n_nodes(), graph.n_edges());
        for (_, data) in graph.iter_nodes() {
            stable.add_node(data.clone());
        }
        for (_, source, target, data) in graph.iter_edges() {
            stable.add_edge(
                NodeIndex::new(source.0),
                NodeIndex::new(target.0),
                data.clone(),
            );
        }
        stable
    }
}
