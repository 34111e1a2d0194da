//! # Adjacency-list directed graph
//!
//! [`DiGraph`] is a small, index-based directed graph that implements
//! [`TransitiveGraph`]. Vertices and edges are addressed by the typed
//! handles [`NodeIndex`] and [`EdgeIndex`].
//!
//! Handles are stable: removing an edge only empties its slot, so every other
//! edge handle keeps pointing at the same edge. Removing a vertex only sets its
//! removed flag; its incident edges stay in place until removed explicitly.

use std::fmt::{self, Display};

use bitvec::vec::BitVec;
use thiserror::Error;

use crate::{define_indexed_vec, traits::TransitiveGraph};

pub mod builder;

pub use builder::DiGraphBuilder;

define_indexed_vec!(
    /// Handle of a vertex in a [`DiGraph`].
    pub struct NodeIndex;

    /// Per-vertex storage addressed by [`NodeIndex`].
    pub struct NodeVec;
);

define_indexed_vec!(
    /// Handle of an edge in a [`DiGraph`].
    pub struct EdgeIndex;

    /// Per-edge storage addressed by [`EdgeIndex`].
    pub struct EdgeVec;
);

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DiGraphError {
    #[error("node {0} does not exist")]
    NodeNotFound(NodeIndex),
    #[error("edge {0} does not exist")]
    EdgeNotFound(EdgeIndex),
    #[error("edge {0} was already removed")]
    EdgeAlreadyRemoved(EdgeIndex),
}

#[derive(Clone, Debug)]
pub struct DiGraph<V, E> {
    node_data: NodeVec<V>,
    out: NodeVec<Vec<EdgeIndex>>,
    removed: BitVec,
    /// `(source, target)` of every edge ever added, live or not.
    endpoints: EdgeVec<(NodeIndex, NodeIndex)>,
    /// `None` once the edge has been removed.
    edge_data: EdgeVec<Option<E>>,
    n_live_edges: usize,
}

impl<V, E> Default for DiGraph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E> DiGraph<V, E> {
    pub fn new() -> Self {
        DiGraph {
            node_data: NodeVec::new(),
            out: NodeVec::new(),
            removed: BitVec::new(),
            endpoints: EdgeVec::new(),
            edge_data: EdgeVec::new(),
            n_live_edges: 0,
        }
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        DiGraph {
            node_data: NodeVec::with_capacity(nodes),
            out: NodeVec::with_capacity(nodes),
            removed: BitVec::with_capacity(nodes),
            endpoints: EdgeVec::with_capacity(edges),
            edge_data: EdgeVec::with_capacity(edges),
            n_live_edges: 0,
        }
    }

    pub fn add_node(&mut self, data: V) -> NodeIndex {
        self.out.push(Vec::new());
        self.removed.push(false);
        self.node_data.push(data)
    }

    /// Adds the edge `source -> target`.
    ///
    /// Self-loops and parallel edges are accepted as is.
    pub fn add_edge(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
        data: E,
    ) -> Result<EdgeIndex, DiGraphError> {
        self.check_node(source)?;
        self.check_node(target)?;

        let edge = self.endpoints.push((source, target));
        self.edge_data.push(Some(data));
        self.out[source].push(edge);
        self.n_live_edges += 1;
        Ok(edge)
    }

    /// Deletes `edge` and returns its data.
    pub fn remove_edge(&mut self, edge: EdgeIndex) -> Result<E, DiGraphError> {
        let slot = self
            .edge_data
            .get_mut(edge)
            .ok_or(DiGraphError::EdgeNotFound(edge))?;
        let data = slot.take().ok_or(DiGraphError::EdgeAlreadyRemoved(edge))?;

        let (source, _) = self.endpoints[edge];
        let out = &mut self.out[source];
        if let Some(pos) = out.iter().position(|&e| e == edge) {
            out.remove(pos);
        }
        self.n_live_edges -= 1;
        Ok(data)
    }

    /// Flags `node` as removed. Returns whether the flag changed.
    ///
    /// Incident edges are kept.
    pub fn remove_node(&mut self, node: NodeIndex) -> Result<bool, DiGraphError> {
        self.set_removed(node, true)
    }

    /// Clears the removed flag of `node`. Returns whether the flag changed.
    pub fn restore_node(&mut self, node: NodeIndex) -> Result<bool, DiGraphError> {
        self.set_removed(node, false)
    }

    fn set_removed(&mut self, node: NodeIndex, value: bool) -> Result<bool, DiGraphError> {
        self.check_node(node)?;
        let previous = self.removed.replace(node.0, value);
        Ok(previous != value)
    }

    fn check_node(&self, node: NodeIndex) -> Result<(), DiGraphError> {
        if node.0 < self.node_data.len() {
            Ok(())
        } else {
            Err(DiGraphError::NodeNotFound(node))
        }
    }

    /// # Panics
    ///
    /// If `node` was not issued by this graph.
    pub fn is_removed(&self, node: NodeIndex) -> bool {
        self.removed[node.0]
    }

    /// Number of vertices, removed ones included.
    pub fn n_nodes(&self) -> usize {
        self.node_data.len()
    }

    /// Number of vertices whose removed flag is clear.
    pub fn n_active_nodes(&self) -> usize {
        self.removed.count_zeros()
    }

    /// Number of live edges.
    pub fn n_edges(&self) -> usize {
        self.n_live_edges
    }

    pub fn node_data(&self, node: NodeIndex) -> &V {
        &self.node_data[node]
    }

    /// Data of a live edge, `None` if it was removed or never existed.
    pub fn edge_data(&self, edge: EdgeIndex) -> Option<&E> {
        self.edge_data.get(edge).and_then(Option::as_ref)
    }

    pub fn is_live(&self, edge: EdgeIndex) -> bool {
        self.edge_data(edge).is_some()
    }

    /// # Panics
    ///
    /// If `edge` was not issued by this graph.
    pub fn source(&self, edge: EdgeIndex) -> NodeIndex {
        self.endpoints[edge].0
    }

    /// # Panics
    ///
    /// If `edge` was not issued by this graph.
    pub fn target(&self, edge: EdgeIndex) -> NodeIndex {
        self.endpoints[edge].1
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + Clone {
        self.node_data.indices()
    }

    pub fn out_edges(&self, node: NodeIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.out[node].iter().copied()
    }

    pub fn neighbors(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.out[node].iter().map(|&e| self.endpoints[e].1)
    }

    /// First live edge `source -> target` in out-edge order.
    pub fn find_edge(&self, source: NodeIndex, target: NodeIndex) -> Option<EdgeIndex> {
        self.out
            .get(source)?
            .iter()
            .copied()
            .find(|&e| self.endpoints[e].1 == target)
    }

    pub fn has_edge(&self, source: NodeIndex, target: NodeIndex) -> bool {
        self.find_edge(source, target).is_some()
    }

    /// Live edges as `(edge, source, target, data)`, by source vertex then
    /// out-edge order.
    pub fn iter_edges(&self) -> impl Iterator<Item = (EdgeIndex, NodeIndex, NodeIndex, &E)> + '_ {
        self.out.iter().flat_map(move |(source, edges)| {
            edges.iter().filter_map(move |&e| {
                let data = self.edge_data[e].as_ref()?;
                Some((e, source, self.endpoints[e].1, data))
            })
        })
    }

    pub fn iter_nodes(&self) -> impl Iterator<Item = (NodeIndex, &V)> + '_ {
        self.node_data.iter()
    }

    /// First vertex carrying `data`.
    pub fn node_by_data(&self, data: &V) -> Option<NodeIndex>
    where
        V: PartialEq,
    {
        self.node_data
            .iter()
            .find_map(|(i, v)| (v == data).then_some(i))
    }
}

impl<V, E> TransitiveGraph for DiGraph<V, E> {
    type Node = NodeIndex;
    type Edge = EdgeIndex;
    type RemoveError = DiGraphError;

    fn node_ids(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.node_indices()
    }

    fn is_removed(&self, node: NodeIndex) -> bool {
        DiGraph::is_removed(self, node)
    }

    fn neighbors(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        DiGraph::neighbors(self, node)
    }

    fn out_edges(&self, node: NodeIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        DiGraph::out_edges(self, node)
    }

    fn target(&self, edge: EdgeIndex) -> NodeIndex {
        DiGraph::target(self, edge)
    }

    fn remove_edge(&mut self, edge: EdgeIndex) -> Result<(), DiGraphError> {
        DiGraph::remove_edge(self, edge).map(|_| ())
    }
}

/// Renders the graph in a DOT-like form: removed vertices first, then every
/// live edge in vertex and out-edge order.
impl<V: Display, E> Display for DiGraph<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph {{")?;
        for (n, data) in self.iter_nodes() {
            if self.is_removed(n) {
                writeln!(f, "  {data} [removed];")?;
            }
        }
        for (_, source, target, _) in self.iter_edges() {
            writeln!(
                f,
                "  {} -> {};",
                self.node_data[source], self.node_data[target]
            )?;
        }
        write!(f, "}}")
    }
}
