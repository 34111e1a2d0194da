use super::{DiGraph, NodeIndex, NodeVec};

/// Collects vertices and edges before freezing them into a [`DiGraph`].
#[derive(Clone, Debug)]
pub struct DiGraphBuilder<V, E> {
    nodes: NodeVec<V>,
    edges: Vec<(NodeIndex, NodeIndex, E)>,
}

impl<V, E> Default for DiGraphBuilder<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E> DiGraphBuilder<V, E> {
    pub fn new() -> Self {
        DiGraphBuilder {
            nodes: NodeVec::new(),
            edges: Vec::new(),
        }
    }

    pub fn build(self) -> DiGraph<V, E> {
        self.into()
    }

    pub fn add_node(&mut self, data: V) -> NodeIndex {
        self.nodes.push(data)
    }

    /// Returns the first vertex carrying `data`, adding it if there is none.
    pub fn node(&mut self, data: V) -> NodeIndex
    where
        V: PartialEq,
    {
        match self.nodes.iter().find_map(|(i, v)| (*v == data).then_some(i)) {
            Some(i) => i,
            None => self.add_node(data),
        }
    }

    pub fn add_edge(&mut self, source: NodeIndex, sink: NodeIndex, data: E) {
        self.edges.push((source, sink, data));
    }
}

impl<V, E> From<DiGraphBuilder<V, E>> for DiGraph<V, E> {
    /// # Panics
    ///
    /// If an edge refers to a vertex that was not added to the builder.
    fn from(builder: DiGraphBuilder<V, E>) -> Self {
        let mut graph = DiGraph::with_capacity(builder.nodes.len(), builder.edges.len());
        for (_, data) in builder.nodes {
            graph.add_node(data);
        }
        for (source, sink, data) in builder.edges {
            if let Err(err) = graph.add_edge(source, sink, data) {
                panic!("invalid edge {source} -> {sink} in builder: {err}");
            }
        }
        graph
    }
}
