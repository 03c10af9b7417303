/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{bottom_up_step, top_down_step, BfsError, Direction, FrontierMarker, Strategy};
use crate::bfs::UNREACHED;
use dobfs::traits::BidirectionalGraph;
use dobfs::utils::Granularity;
use dsi_progress_logger::ProgressLog;
use rayon::ThreadPool;
use std::time::{Duration, Instant};
use sync_cell_slice::SyncSlice;

/// Statistics about a level of a visit, that is, about a call to a step
/// kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelStats {
    /// The iteration, starting from one; the frontier consumed by the level
    /// contains the nodes at distance `iteration - 1` from the root.
    pub iteration: usize,
    /// The direction chosen for the level.
    pub direction: Direction,
    /// The number of nodes in the frontier consumed by the level.
    pub frontier_size: usize,
    /// The number of nodes discovered by the level.
    pub discovered: usize,
    /// The wall-clock time of the level.
    pub elapsed: Duration,
}

/// The result of a [visit](Bfs::run).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BfsOutput {
    /// The distance of each node from the root, or [`UNREACHED`].
    pub distances: Box<[isize]>,
    /// Per-level statistics, in order of iteration. The last level always
    /// discovers no nodes.
    pub levels: Vec<LevelStats>,
}

impl BfsOutput {
    /// Returns the number of nodes reachable from the root, root included.
    pub fn num_reached(&self) -> usize {
        1 + self.levels.iter().map(|level| level.discovered).sum::<usize>()
    }

    /// Returns the largest distance from the root of a reachable node.
    pub fn eccentricity(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }
}

/// Direction-optimizing parallel breadth-first visits computing distances.
///
/// The visit state is a [`FrontierMarker`], which is allocated once when the
/// visit is created and reset at the start of each [run](Self::run), so that
/// the same structure can be used to visit the graph from several roots. Each
/// run allocates a new distance array.
///
/// At each level, a [`Strategy`] chooses between a [top-down
/// step](super::top_down_step) and a [bottom-up step](super::bottom_up_step)
/// given the size of the current frontier. The visit stops when a level
/// discovers no nodes, so the number of levels is at most the number of nodes.
///
/// # Examples
///
/// ```
/// use dobfs::prelude::*;
/// use dobfs::thread_pool;
/// use dobfs_algo::prelude::*;
/// use dsi_progress_logger::no_logging;
///
/// let graph = BiCsrGraph::from_arcs(4, [(0, 1), (1, 2), (2, 0), (1, 3)])?;
/// let mut visit = Bfs::new(&graph)?;
/// let output = visit.run(1, Strategy::BottomUp, &thread_pool![], no_logging![])?;
/// assert_eq!(&*output.distances, &[2, 0, 1, 1]);
/// assert_eq!(output.eccentricity(), 2);
/// assert_eq!(output.num_reached(), 4);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Bfs<G: BidirectionalGraph> {
    graph: G,
    granularity: usize,
    marker: FrontierMarker,
}

impl<G: BidirectionalGraph + Sync> Bfs<G> {
    /// Creates a visit with the [default granularity](Granularity::default).
    pub fn new(graph: G) -> Result<Self, BfsError> {
        Self::with_granularity(graph, Granularity::default())
    }

    /// Creates a visit.
    ///
    /// # Arguments
    /// * `graph`: the graph to visit.
    /// * `granularity`: the minimum size of the chunks of nodes scanned by a
    ///   single task. High granularity reduces overhead, but may lead to
    ///   decreased performance on graphs with a skewed degree distribution.
    pub fn with_granularity(graph: G, granularity: Granularity) -> Result<Self, BfsError> {
        let num_nodes = graph.num_nodes();
        let granularity = granularity.node_granularity(num_nodes, graph.num_arcs());
        let marker = FrontierMarker::new(num_nodes).map_err(|source| BfsError::Allocation {
            len: num_nodes,
            source,
        })?;
        Ok(Self {
            graph,
            granularity,
            marker,
        })
    }

    /// Returns the node granularity.
    pub fn granularity(&self) -> usize {
        self.granularity
    }

    /// Visits the graph from `root`, returning distances and per-level
    /// statistics.
    ///
    /// # Errors
    ///
    /// Returns [`BfsError::RootOutOfRange`] if `root` is not a node of the
    /// graph, and [`BfsError::Allocation`] if the distance array cannot be
    /// allocated. In both cases the visit state is left untouched.
    pub fn run(
        &mut self,
        root: usize,
        strategy: Strategy,
        thread_pool: &ThreadPool,
        pl: &mut impl ProgressLog,
    ) -> Result<BfsOutput, BfsError> {
        let num_nodes = self.graph.num_nodes();
        if root >= num_nodes {
            return Err(BfsError::RootOutOfRange { root, num_nodes });
        }

        let mut distances = Vec::new();
        distances
            .try_reserve_exact(num_nodes)
            .map_err(|source| BfsError::Allocation {
                len: num_nodes,
                source,
            })?;
        distances.resize(num_nodes, UNREACHED);
        distances[root] = 0;

        pl.item_name("node");
        pl.expected_updates(Some(num_nodes));
        pl.start(format!("Visiting from node {root} ({strategy})..."));

        let mut levels = Vec::new();
        let distances_sync = distances.as_sync_slice();
        self.marker.reset();
        self.marker.seed(root);
        pl.update();

        let mut iteration = 1;
        let mut frontier_size = 1;
        while frontier_size != 0 {
            let direction = strategy.direction(frontier_size, num_nodes);
            let start = Instant::now();
            let discovered = match direction {
                Direction::TopDown => top_down_step(
                    &self.graph,
                    &self.marker,
                    iteration,
                    distances_sync,
                    self.granularity,
                    thread_pool,
                ),
                Direction::BottomUp => bottom_up_step(
                    &self.graph,
                    &self.marker,
                    iteration,
                    distances_sync,
                    self.granularity,
                    thread_pool,
                ),
            };
            let level = LevelStats {
                iteration,
                direction,
                frontier_size,
                discovered,
                elapsed: start.elapsed(),
            };
            log::debug!(
                "Level {}: {} from {} nodes, {} discovered in {:?}",
                level.iteration,
                level.direction,
                level.frontier_size,
                level.discovered,
                level.elapsed
            );
            pl.update_with_count(discovered);
            levels.push(level);

            frontier_size = discovered;
            iteration += 1;
        }

        pl.done();

        Ok(BfsOutput {
            distances: distances.into_boxed_slice(),
            levels,
        })
    }

    /// Resets the visit state.
    ///
    /// Runs start with a reset, so this method is never needed between runs.
    pub fn reset(&mut self) {
        self.marker.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dobfs::graphs::bi_csr_graph::BiCsrGraph;
    use dobfs::thread_pool;
    use dsi_progress_logger::no_logging;

    #[test]
    fn test_run_after_interrupted_run() -> anyhow::Result<()> {
        let graph = BiCsrGraph::from_arcs(5, [(0, 1), (1, 2), (2, 3), (3, 4)])?;
        let thread_pool = thread_pool![2];
        let mut visit = Bfs::new(&graph)?;

        // Leftovers of a run that unwound halfway
        visit.marker.seed(2);
        visit.marker.discover(3, 2);

        for strategy in [Strategy::TopDown, Strategy::BottomUp] {
            let output = visit.run(0, strategy, &thread_pool, no_logging![])?;
            assert_eq!(&*output.distances, &[0, 1, 2, 3, 4]);
            assert_eq!(output.levels.len(), 5);
        }
        Ok(())
    }
}
