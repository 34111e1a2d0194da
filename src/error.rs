use std::fmt::Debug;

use thiserror::Error;

use crate::traits::TransitiveGraph;

/// Error types for the transitive-edge pass.
///
/// `N` is the vertex handle, `E` the edge handle and `R` the failure reported
/// by the graph's own edge removal.
#[derive(Debug, Error)]
pub enum TransitiveError<N: Debug, E: Debug, R: Debug> {
    /// The graph contains a self-loop.
    ///
    /// Absence of self-loops is a precondition of the two-hop scan. The graph
    /// is left untouched; nothing is removed when this is returned.
    #[error("self-loop at vertex {node:?}: transitive edge detection requires a loop-free graph")]
    SelfLoop { node: N },

    /// One or more collected edges could not be removed.
    ///
    /// Every collected edge is attempted; `failures` lists the ones the graph
    /// rejected, in the order they were attempted.
    #[error("{} of {attempted} edge removals failed", .failures.len())]
    Removal {
        attempted: usize,
        failures: Vec<(E, R)>,
    },
}

impl<N: Debug, E: Debug, R: Debug> TransitiveError<N, E, R> {
    /// Number of edges that were actually removed before this error was
    /// reported. Always zero for [`TransitiveError::SelfLoop`].
    pub fn removed(&self) -> usize {
        match self {
            TransitiveError::SelfLoop { .. } => 0,
            TransitiveError::Removal {
                attempted,
                failures,
            } => attempted - failures.len(),
        }
    }
}

/// [`TransitiveError`] instantiated for the handles of graph type `G`.
pub type GraphError<G> = TransitiveError<
    <G as TransitiveGraph>::Node,
    <G as TransitiveGraph>::Edge,
    <G as TransitiveGraph>::RemoveError,
>;
