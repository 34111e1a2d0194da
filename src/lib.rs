//! # Hopcut
//!
//! Hopcut removes *one-hop transitive* edges from directed graphs: an edge
//! `(u, w)` is dropped when some out-neighbor `v` of `u` also has the edge
//! `(v, w)`. This is the short-cut edge clean-up used on assembly graphs, not a
//! general transitive reduction; only paths through a single intermediate
//! vertex are considered.
//!
//! The algorithms in [`algorithms::transitive_ops`] work on any graph that
//! implements [`TransitiveGraph`]. [`DiGraph`] is a ready-made adjacency-list
//! implementation, and with the `petgraph` feature
//! `petgraph::stable_graph::StableGraph` can be used directly.
//!
//! ```
//! use hopcut::{digraph, TransitiveEdgesExt};
//!
//! let mut g = digraph!(A -> B -> C; A -> C);
//! assert_eq!(g.remove_transitive_edges().unwrap(), 1);
//! assert_eq!(g.n_edges(), 2);
//! ```

mod typed_vec;

pub mod algorithms;
pub mod digraph;
pub mod error;
#[cfg(feature = "petgraph")]
pub mod petgraph_interop;
pub mod traits;

pub use algorithms::transitive_ops::TransitiveEdgesExt;
pub use digraph::{DiGraph, DiGraphBuilder, DiGraphError, EdgeIndex, NodeIndex};
pub use error::{GraphError, TransitiveError};
pub use traits::TransitiveGraph;

/// Builds a `DiGraph<&'static str, ()>` from DOT-like edge chains.
///
/// Statements are separated by `;`. Each statement is a vertex name optionally
/// followed by `-> name` hops; vertices are created on first mention.
///
/// ```
/// let g = hopcut::digraph!(A -> B -> C; A -> C; D);
/// assert_eq!(g.n_nodes(), 4);
/// assert_eq!(g.n_edges(), 3);
/// ```
#[macro_export]
macro_rules! digraph {
    ($($head:ident $(-> $tail:ident)*);* $(;)?) => {{
        let mut builder = $crate::digraph::DiGraphBuilder::<&'static str, ()>::new();
        $(
            let chain = [builder.node(stringify!($head)) $(, builder.node(stringify!($tail)))*];
            for pair in chain.windows(2) {
                builder.add_edge(pair[0], pair[1], ());
            }
        )*
        builder.build()
    }};
}
