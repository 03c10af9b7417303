/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::FrontierMarker;
use dobfs::traits::BidirectionalGraph;
use rayon::{prelude::*, ThreadPool};
use sync_cell_slice::SyncCell;

/// Advances a visit by one level scanning the predecessors of undiscovered
/// nodes.
///
/// Every undiscovered node scans its predecessors in storage order, and stops
/// at the first one with marker `iteration`: the node is then discovered at
/// iteration `iteration + 1` and its distance is set to `iteration`.
///
/// Each node writes only its own marker and distance, so no compare-and-swap
/// is needed; markers of other nodes are only read, and nodes discovered
/// during this call have marker `iteration + 1`, so they are never mistaken
/// for frontier nodes.
///
/// The node range is scanned in parallel in chunks of at least `granularity`
/// nodes. Returns the number of nodes discovered, that is, the size of the
/// new frontier.
///
/// The work is proportional to the number of nodes plus the sum of the
/// indegrees of undiscovered nodes, bounded by the early exit at the first
/// match.
pub fn bottom_up_step<G: BidirectionalGraph + Sync>(
    graph: &G,
    marker: &FrontierMarker,
    iteration: usize,
    distances: &[SyncCell<isize>],
    granularity: usize,
    thread_pool: &ThreadPool,
) -> usize {
    debug_assert_eq!(marker.len(), graph.num_nodes());
    debug_assert_eq!(distances.len(), graph.num_nodes());
    let next = iteration + 1;
    let distance = iteration as isize;

    thread_pool.install(|| {
        (0..graph.num_nodes())
            .into_par_iter()
            .with_min_len(granularity)
            .filter(|&node| {
                if marker.is_discovered(node)
                    || !graph
                        .predecessors(node)
                        .iter()
                        .any(|&pred| marker.get(pred) == iteration)
                {
                    return false;
                }
                marker.discover(node, next);
                // Safety: each node is handled by exactly one thread.
                unsafe { distances[node].set(distance) };
                true
            })
            .count()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dobfs::prelude::*;
    use dobfs::thread_pool;
    use sync_cell_slice::SyncSlice;

    #[test]
    fn test_one_level() -> Result<(), Box<dyn std::error::Error>> {
        let graph = BiCsrGraph::from_arcs(5, [(0, 1), (0, 2), (1, 3), (2, 3), (2, 0), (3, 4)])?;
        let marker = FrontierMarker::new(5)?;
        let mut distances = [0, 1, 1, -1, -1];
        marker.seed(0);
        marker.discover(1, 2);
        marker.discover(2, 2);

        let count = bottom_up_step(
            &graph,
            &marker,
            2,
            distances.as_sync_slice(),
            1,
            &thread_pool![3],
        );
        assert_eq!(count, 1);
        assert_eq!(distances, [0, 1, 1, 2, -1]);
        assert_eq!(marker.get(3), 3);
        // 4 has a predecessor discovered in this very step
        assert!(!marker.is_discovered(4));
        Ok(())
    }

    #[test]
    fn test_no_frontier() -> Result<(), Box<dyn std::error::Error>> {
        let graph = BiCsrGraph::from_arcs(3, [(0, 1), (1, 2)])?;
        let marker = FrontierMarker::new(3)?;
        let mut distances = [-1; 3];
        let count = bottom_up_step(
            &graph,
            &marker,
            1,
            distances.as_sync_slice(),
            1024,
            &thread_pool![1],
        );
        assert_eq!(count, 0);
        assert_eq!(distances, [-1; 3]);
        Ok(())
    }
}
