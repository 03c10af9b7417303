/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Basic traits to access graphs.
//!
//! A [`RandomAccessGraph`] gives access to the successors of each node, that
//! is, to its outgoing arcs. A [`BidirectionalGraph`] gives access, in
//! addition, to the predecessors of each node, that is, to its incoming arcs:
//! this is what makes it possible to visit a graph both top-down (from the
//! frontier to its successors) and bottom-up (from unknown nodes to their
//! predecessors).
//!
//! Successors and predecessors are returned as slices, in the order in which
//! they are stored. Visits that stop at the first matching neighbor depend on
//! this order.
//!
//! Both traits are implemented for references, so algorithms can take graphs
//! by value or by reference.

use impl_tools::autoimpl;

/// A graph providing random access to the successors of its nodes.
#[autoimpl(for<S: trait + ?Sized> &S, &mut S)]
pub trait RandomAccessGraph {
    /// Returns the number of nodes of the graph.
    fn num_nodes(&self) -> usize;

    /// Returns the number of arcs of the graph.
    fn num_arcs(&self) -> u64;

    /// Returns the successors of a node, in storage order.
    fn successors(&self, node: usize) -> &[usize];

    /// Returns the number of successors of a node.
    #[inline(always)]
    fn outdegree(&self, node: usize) -> usize {
        self.successors(node).len()
    }

    /// Returns whether there is an arc going from `src` to `dst`.
    ///
    /// Note that the default implementation performs a linear scan.
    fn has_arc(&self, src: usize, dst: usize) -> bool {
        self.successors(src).contains(&dst)
    }
}

/// A [random-access graph](RandomAccessGraph) providing, additionally, random
/// access to the predecessors of its nodes.
///
/// Implementations must guarantee that `v` is a predecessor of `u` if and only
/// if `u` is a successor of `v`, with the same multiplicity.
#[autoimpl(for<S: trait + ?Sized> &S, &mut S)]
pub trait BidirectionalGraph: RandomAccessGraph {
    /// Returns the predecessors of a node, in storage order.
    fn predecessors(&self, node: usize) -> &[usize];

    /// Returns the number of predecessors of a node.
    #[inline(always)]
    fn indegree(&self, node: usize) -> usize {
        self.predecessors(node).len()
    }
}

/// Returns true if the two graphs have the same number of nodes and, for each
/// node, the same successors in the same order.
pub fn eq(g0: &impl RandomAccessGraph, g1: &impl RandomAccessGraph) -> bool {
    g0.num_nodes() == g1.num_nodes()
        && g0.num_arcs() == g1.num_arcs()
        && (0..g0.num_nodes()).all(|node| g0.successors(node) == g1.successors(node))
}
