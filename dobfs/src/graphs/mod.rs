/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Implementations of graphs.

use std::collections::TryReserveError;
use thiserror::Error;

pub mod bi_csr_graph;
pub mod csr_graph;

pub mod prelude {
    pub use super::bi_csr_graph::BiCsrGraph;
    pub use super::csr_graph::CsrGraph;
    pub use super::GraphError;
}

/// Structural errors detected when building or loading a graph.
///
/// Graphs are validated once, when they are built; algorithms trust the
/// invariants of a constructed graph and never check them again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The degree-cumulative function has no elements.
    #[error("The degree-cumulative function is empty")]
    EmptyOffsets,

    /// The degree-cumulative function does not start from zero.
    #[error("The first offset is {0}, but it should be zero")]
    NonZeroFirstOffset(usize),

    /// The degree-cumulative function decreases at some node.
    #[error("Offsets are not monotone at node {node}: {start} > {end}")]
    NonMonotoneOffsets {
        node: usize,
        start: usize,
        end: usize,
    },

    /// The last offset is not the number of arcs.
    #[error("The last offset is {last}, but there are {num_arcs} arcs")]
    OffsetsArcsMismatch { last: usize, num_arcs: usize },

    /// An arc points outside of the node range.
    #[error("Arc at index {index} has target {target}, but there are {num_nodes} nodes")]
    ArcOutOfRange {
        index: usize,
        target: usize,
        num_nodes: usize,
    },

    /// A node mentioned in an arc list is outside of the node range.
    #[error("Node {node} is out of range (there are {num_nodes} nodes)")]
    NodeOutOfRange { node: usize, num_nodes: usize },

    /// The two directions of a graph have a different number of nodes.
    #[error("Different number of nodes: {outgoing} (outgoing) != {incoming} (incoming)")]
    NodesMismatch { outgoing: usize, incoming: usize },

    /// The two directions of a graph have a different number of arcs.
    #[error("Different number of arcs: {outgoing} (outgoing) != {incoming} (incoming)")]
    ArcsMismatch { outgoing: u64, incoming: u64 },

    /// The incoming arcs of a node are not the transpose of the outgoing arcs.
    #[error("The predecessors of node {node} do not match the transposed successors")]
    NotTranspose { node: usize },

    /// A serialized value is negative.
    #[error("Negative value {value} in {field}")]
    NegativeValue { field: &'static str, value: i64 },

    /// A value cannot be serialized using 32 bits.
    #[error("Value {value} of {field} does not fit in a 32-bit signed integer")]
    TooLarge { field: &'static str, value: u64 },

    /// A buffer cannot be allocated.
    #[error("Could not allocate {len} values")]
    Allocation {
        len: usize,
        #[source]
        source: TryReserveError,
    },
}
