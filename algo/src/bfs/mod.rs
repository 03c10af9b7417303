/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Direction-optimizing breadth-first visits.
//!
//! A visit computes the distance (in number of arcs) of every node from a
//! root, or [`UNREACHED`] if the node cannot be reached. It proceeds in
//! levels: the frontier of a level is the set of nodes discovered by the
//! previous level, and it is advanced either [top-down](top_down_step), from
//! the frontier to its successors, or [bottom-up](bottom_up_step), from the
//! undiscovered nodes to their predecessors. Which one is used is decided
//! at each level by a [`Strategy`].
//!
//! All levels share a single [`FrontierMarker`], which stores for each node
//! the iteration at which it was discovered. Levels are parallelized with
//! [Rayon](rayon) on a [`ThreadPool`] provided by the caller.
//!
//! [`top_down`], [`bottom_up`] and [`hybrid`] are convenience functions
//! returning just the distances; use [`Bfs`] to reuse the visit state across
//! roots, to log progress, or to get per-level statistics.

mod bottom_up;
pub use bottom_up::*;

mod driver;
pub use driver::*;

mod marker;
pub use marker::*;

mod policy;
pub use policy::*;

mod top_down;
pub use top_down::*;

use dobfs::traits::BidirectionalGraph;
use dsi_progress_logger::no_logging;
use rayon::ThreadPool;
use std::collections::TryReserveError;
use thiserror::Error;

/// The distance of nodes that cannot be reached from the root.
pub const UNREACHED: isize = -1;

/// Errors of breadth-first visits.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BfsError {
    #[error("Root {root} is not a node of the graph, which has {num_nodes} nodes")]
    RootOutOfRange { root: usize, num_nodes: usize },
    #[error("Cannot allocate {len} elements")]
    Allocation {
        len: usize,
        #[source]
        source: TryReserveError,
    },
}

/// Returns the distances from `root` computed by a top-down visit.
pub fn top_down<G: BidirectionalGraph + Sync>(
    graph: G,
    root: usize,
    thread_pool: &ThreadPool,
) -> Result<Box<[isize]>, BfsError> {
    distances(graph, root, Strategy::TopDown, thread_pool)
}

/// Returns the distances from `root` computed by a bottom-up visit.
pub fn bottom_up<G: BidirectionalGraph + Sync>(
    graph: G,
    root: usize,
    thread_pool: &ThreadPool,
) -> Result<Box<[isize]>, BfsError> {
    distances(graph, root, Strategy::BottomUp, thread_pool)
}

/// Returns the distances from `root` computed by a hybrid visit switching to
/// bottom-up when the frontier size reaches `threshold`.
pub fn hybrid<G: BidirectionalGraph + Sync>(
    graph: G,
    root: usize,
    threshold: Threshold,
    thread_pool: &ThreadPool,
) -> Result<Box<[isize]>, BfsError> {
    distances(graph, root, Strategy::Hybrid(threshold), thread_pool)
}

fn distances<G: BidirectionalGraph + Sync>(
    graph: G,
    root: usize,
    strategy: Strategy,
    thread_pool: &ThreadPool,
) -> Result<Box<[isize]>, BfsError> {
    let num_nodes = graph.num_nodes();
    if root >= num_nodes {
        return Err(BfsError::RootOutOfRange { root, num_nodes });
    }
    let mut visit = Bfs::new(graph)?;
    Ok(visit
        .run(root, strategy, thread_pool, no_logging![])?
        .distances)
}
