/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::collections::TryReserveError;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Generation-stamped state of the nodes of a breadth-first visit.
///
/// The marker of a node is zero if the node has not been discovered yet, and
/// `k > 0` if the node has been discovered at iteration `k`, that is, if it
/// belongs to the frontier produced by iteration `k`. The root is discovered
/// at iteration one, so a node with marker `k` is at distance `k - 1` from the
/// root.
///
/// The marker of a node is written once during a visit, when it goes from
/// zero to a positive value; the only way to write it again is to
/// [reset](FrontierMarker::reset) the whole array. As a consequence, the frontier of iteration
/// `k` is exactly the set of nodes with marker `k`, and there is no need to
/// store it separately.
///
/// All accesses use [relaxed](Ordering::Relaxed) ordering: visits
/// synchronize through the barrier at the end of each parallel iteration.
#[derive(Debug)]
pub struct FrontierMarker {
    markers: Box<[AtomicUsize]>,
}

impl FrontierMarker {
    /// The marker of undiscovered nodes.
    pub const UNDISCOVERED: usize = 0;

    /// Creates a marker array for `num_nodes` nodes, all undiscovered.
    pub fn new(num_nodes: usize) -> Result<Self, TryReserveError> {
        let mut markers = Vec::new();
        markers.try_reserve_exact(num_nodes)?;
        markers.extend((0..num_nodes).map(|_| AtomicUsize::new(Self::UNDISCOVERED)));
        Ok(Self {
            markers: markers.into_boxed_slice(),
        })
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Returns true if there are no nodes.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Returns the marker of a node.
    #[inline(always)]
    pub fn get(&self, node: usize) -> usize {
        self.markers[node].load(Ordering::Relaxed)
    }

    /// Returns true if the node has been discovered.
    #[inline(always)]
    pub fn is_discovered(&self, node: usize) -> bool {
        self.get(node) != Self::UNDISCOVERED
    }

    /// Marks the root of a visit as discovered at iteration one.
    pub fn seed(&self, root: usize) {
        self.markers[root].store(1, Ordering::Relaxed);
    }

    /// Tries to discover a node at the given iteration.
    ///
    /// The transition from undiscovered to `iteration` is atomic: if several
    /// threads try to discover the same node, exactly one of them gets
    /// `true`.
    #[inline(always)]
    pub fn try_discover(&self, node: usize, iteration: usize) -> bool {
        debug_assert_ne!(iteration, Self::UNDISCOVERED);
        let marker = &self.markers[node];
        marker.load(Ordering::Relaxed) == Self::UNDISCOVERED
            && marker
                .compare_exchange(
                    Self::UNDISCOVERED,
                    iteration,
                    Ordering::Relaxed,
                    Ordering::Relaxed,
                )
                .is_ok()
    }

    /// Discovers a node at the given iteration without synchronization.
    ///
    /// This method must be called only by the thread that owns the node
    /// during the current iteration, and only if the node is undiscovered.
    #[inline(always)]
    pub fn discover(&self, node: usize, iteration: usize) {
        debug_assert_ne!(iteration, Self::UNDISCOVERED);
        debug_assert!(!self.is_discovered(node));
        self.markers[node].store(iteration, Ordering::Relaxed);
    }

    /// Marks all nodes as undiscovered.
    pub fn reset(&mut self) {
        self.markers
            .iter_mut()
            .for_each(|marker| *marker.get_mut() = Self::UNDISCOVERED);
    }
}
