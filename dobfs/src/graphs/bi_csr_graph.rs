/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 * SPDX-FileCopyrightText: 2025 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{csr_graph::CsrGraph, GraphError};
use crate::traits::{BidirectionalGraph, RandomAccessGraph};
use rayon::prelude::*;

/// A directed graph stored as a pair of [CSR graphs](CsrGraph): one for the
/// outgoing arcs, and one for the incoming arcs.
///
/// The incoming side is the transpose of the outgoing side: it is what makes
/// it possible to scan the predecessors of a node during a bottom-up visit.
///
/// # Examples
///
/// ```
/// use dobfs::prelude::*;
///
/// let graph = BiCsrGraph::from_arcs(4, [(0, 1), (0, 2), (1, 3), (2, 3)])?;
/// assert_eq!(graph.successors(0), &[1, 2]);
/// assert_eq!(graph.predecessors(3), &[1, 2]);
/// assert_eq!(graph.indegree(0), 0);
/// # Ok::<(), GraphError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BiCsrGraph {
    outgoing: CsrGraph,
    incoming: CsrGraph,
}

impl BiCsrGraph {
    /// Pairs a graph with its transpose.
    ///
    /// This method checks that the two graphs have the same number of nodes
    /// and arcs; use [`check_transpose`](Self::check_transpose) to check
    /// that `incoming` is actually the transpose of `outgoing`.
    pub fn new(outgoing: CsrGraph, incoming: CsrGraph) -> Result<Self, GraphError> {
        if outgoing.num_nodes() != incoming.num_nodes() {
            return Err(GraphError::NodesMismatch {
                outgoing: outgoing.num_nodes(),
                incoming: incoming.num_nodes(),
            });
        }
        if outgoing.num_arcs() != incoming.num_arcs() {
            return Err(GraphError::ArcsMismatch {
                outgoing: outgoing.num_arcs(),
                incoming: incoming.num_arcs(),
            });
        }
        Ok(Self { outgoing, incoming })
    }

    /// Builds the incoming side by transposing the given graph.
    pub fn from_csr(outgoing: CsrGraph) -> Self {
        let incoming = outgoing.transpose();
        Self { outgoing, incoming }
    }

    /// Creates a graph with `num_nodes` nodes from a list of arcs.
    ///
    /// Successors keep the order of the list; predecessors are sorted by
    /// increasing node identifier.
    pub fn from_arcs(
        num_nodes: usize,
        arcs: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, GraphError> {
        Ok(Self::from_csr(CsrGraph::from_arcs(num_nodes, arcs)?))
    }

    /// Checks that, for each node, the predecessors are exactly (as a
    /// multiset) the nodes having it as a successor.
    ///
    /// On failure, the error reports the lowest node whose predecessors
    /// do not match.
    pub fn check_transpose(&self) -> Result<(), GraphError> {
        let transpose = self.outgoing.transpose();
        match (0..self.num_nodes()).into_par_iter().find_first(|&node| {
            let mut preds = self.incoming.successors(node).to_vec();
            preds.sort_unstable();
            preds != transpose.successors(node)
        }) {
            Some(node) => Err(GraphError::NotTranspose { node }),
            None => Ok(()),
        }
    }

    /// Returns the graph of outgoing arcs.
    pub fn outgoing(&self) -> &CsrGraph {
        &self.outgoing
    }

    /// Returns the graph of incoming arcs.
    pub fn incoming(&self) -> &CsrGraph {
        &self.incoming
    }

    /// Returns the graph of outgoing arcs and the graph of incoming arcs.
    pub fn into_inner(self) -> (CsrGraph, CsrGraph) {
        (self.outgoing, self.incoming)
    }
}

impl RandomAccessGraph for BiCsrGraph {
    #[inline(always)]
    fn num_nodes(&self) -> usize {
        self.outgoing.num_nodes()
    }

    #[inline(always)]
    fn num_arcs(&self) -> u64 {
        self.outgoing.num_arcs()
    }

    #[inline(always)]
    fn successors(&self, node: usize) -> &[usize] {
        self.outgoing.successors(node)
    }
}

impl BidirectionalGraph for BiCsrGraph {
    #[inline(always)]
    fn predecessors(&self, node: usize) -> &[usize] {
        self.incoming.successors(node)
    }
}
