//! # Graph Algorithms
//!
//! Algorithms written against the [`TransitiveGraph`](crate::traits::TransitiveGraph)
//! capability set, so they run unchanged on [`DiGraph`](crate::digraph::DiGraph)
//! or any other implementation.
//!
//! ## Available Algorithms
//!
//! ### Transitive Operations
//! - [`transitive_ops`]: Detection and removal of one-hop transitive edges

pub mod transitive_ops;
