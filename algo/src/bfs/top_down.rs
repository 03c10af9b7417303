/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::FrontierMarker;
use dobfs::traits::RandomAccessGraph;
use rayon::{prelude::*, ThreadPool};
use sync_cell_slice::SyncCell;

/// Advances a visit by one level scanning the successors of the frontier.
///
/// Every node with marker `iteration` enumerates its successors; each
/// undiscovered successor is [atomically discovered](FrontierMarker::try_discover)
/// at iteration `iteration + 1`, and the thread winning the discovery sets its
/// distance to `iteration`, which is the distance of the frontier plus one.
///
/// The node range is scanned in parallel in chunks of at least `granularity`
/// nodes. Returns the number of nodes discovered, that is, the size of the
/// new frontier.
///
/// The work is proportional to the number of nodes plus the sum of the
/// outdegrees of the frontier.
pub fn top_down_step<G: RandomAccessGraph + Sync>(
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
            .map(|node| {
                if marker.get(node) != iteration {
                    return 0;
                }
                let mut discovered = 0;
                for &succ in graph.successors(node) {
                    if marker.try_discover(succ, next) {
                        // Safety: the marker of succ went from undiscovered
                        // to next in this thread only, so no other thread
                        // writes or reads its distance in this iteration.
                        unsafe { distances[succ].set(distance) };
                        discovered += 1;
                    }
                }
                discovered
            })
            .sum()
    })
}
