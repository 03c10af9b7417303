/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/// Granularity of parallel tasks, specified transparently by nodes or arcs.
///
/// Visits scanning the whole node range in parallel split it in chunks of at
/// least a given number of nodes. Depending on the graph, it might be more
/// natural to specify the size of a chunk by a number of nodes or by a number
/// of arcs: this enum allows to specify the granularity in both ways, and
/// [`node_granularity`](Self::node_granularity) converts it into a number of
/// nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// Node granularity.
    ///
    /// Each task will be formed by the specified number of nodes.
    Nodes(usize),
    /// Arc granularity.
    ///
    /// Each task will be formed by a number of nodes equal to the specified
    /// number of arcs divided by the average outdegree.
    Arcs(u64),
}

impl core::default::Default for Granularity {
    /// Returns a default granularity of 1024 nodes.
    fn default() -> Self {
        Self::Nodes(1024)
    }
}

impl Granularity {
    /// Returns a node granularity for a given number of nodes and arcs.
    ///
    /// For the variant [`Nodes`](Self::Nodes), the specified number of nodes is
    /// returned. For the variant [`Arcs`](Self::Arcs), the number of nodes is
    /// computed as the specified number of arcs divided by the average
    /// outdegree. The result is always at least one.
    pub fn node_granularity(&self, num_nodes: usize, num_arcs: u64) -> usize {
        match self {
            Self::Nodes(n) => (*n).max(1),
            Self::Arcs(n) => {
                let average_degree = num_arcs as f64 / num_nodes.max(1) as f64;
                if average_degree == 0.0 {
                    return num_nodes.max(1);
                }
                (*n as f64 / average_degree)
                    .min(usize::MAX as f64)
                    .ceil()
                    .max(1.) as usize
            }
        }
    }
}
