/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::fmt::{self, Display, Formatter};

/// The direction of a level of a breadth-first visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Scan the successors of the frontier (see [`top_down_step`](super::top_down_step)).
    TopDown,
    /// Scan the predecessors of undiscovered nodes (see
    /// [`bottom_up_step`](super::bottom_up_step)).
    BottomUp,
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Direction::TopDown => f.write_str("top-down"),
            Direction::BottomUp => f.write_str("bottom-up"),
        }
    }
}

/// The frontier size at which a hybrid visit switches to bottom-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    /// An absolute number of nodes.
    Nodes(usize),
    /// A fraction of the number of nodes of the graph.
    ///
    /// Negative or NaN fractions resolve to zero nodes.
    Fraction(f64),
}

impl core::default::Default for Threshold {
    /// Returns a threshold of 5% of the nodes.
    fn default() -> Self {
        Self::Fraction(0.05)
    }
}

impl Threshold {
    /// Returns the threshold as a number of nodes for a graph with the given
    /// number of nodes.
    ///
    /// Fractions are rounded up.
    pub fn nodes(&self, num_nodes: usize) -> usize {
        match *self {
            Self::Nodes(n) => n,
            // Saturating: NaN and negative values become zero
            Self::Fraction(f) => (f * num_nodes as f64).ceil() as usize,
        }
    }
}

impl Display for Threshold {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Threshold::Nodes(n) => write!(f, "{n} nodes"),
            Threshold::Fraction(x) => write!(f, "{}% of the nodes", x * 100.0),
        }
    }
}

/// How a visit chooses the direction of each level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    /// Always [top-down](Direction::TopDown).
    TopDown,
    /// Always [bottom-up](Direction::BottomUp).
    BottomUp,
    /// [Bottom-up](Direction::BottomUp) when the current frontier contains
    /// at least as many nodes as the threshold, [top-down](Direction::TopDown)
    /// otherwise.
    Hybrid(Threshold),
}

impl core::default::Default for Strategy {
    fn default() -> Self {
        Self::Hybrid(Threshold::default())
    }
}

impl Strategy {
    /// Returns the direction of the next level, given the size of the current
    /// frontier and the number of nodes of the graph.
    pub fn direction(&self, frontier_size: usize, num_nodes: usize) -> Direction {
        match self {
            Self::TopDown => Direction::TopDown,
            Self::BottomUp => Direction::BottomUp,
            Self::Hybrid(threshold) => {
                if frontier_size >= threshold.nodes(num_nodes) {
                    Direction::BottomUp
                } else {
                    Direction::TopDown
                }
            }
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::TopDown => f.write_str("top-down"),
            Strategy::BottomUp => f.write_str("bottom-up"),
            Strategy::Hybrid(threshold) => write!(f, "hybrid (threshold: {threshold})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_nodes() {
        assert_eq!(Threshold::Nodes(7).nodes(100), 7);
        assert_eq!(Threshold::default().nodes(100), 5);
        assert_eq!(Threshold::default().nodes(101), 6);
        assert_eq!(Threshold::default().nodes(0), 0);
        assert_eq!(Threshold::Fraction(-1.0).nodes(100), 0);
        assert_eq!(Threshold::Fraction(f64::NAN).nodes(100), 0);
        assert_eq!(Threshold::Fraction(2.0).nodes(100), 200);
    }

    #[test]
    fn test_boundary() {
        let hybrid = Strategy::Hybrid(Threshold::Nodes(10));
        assert_eq!(hybrid.direction(9, 1000), Direction::TopDown);
        assert_eq!(hybrid.direction(10, 1000), Direction::BottomUp);
        assert_eq!(hybrid.direction(11, 1000), Direction::BottomUp);

        // 5% of 200 nodes
        let hybrid = Strategy::default();
        assert_eq!(hybrid.direction(9, 200), Direction::TopDown);
        assert_eq!(hybrid.direction(10, 200), Direction::BottomUp);
    }

    #[test]
    fn test_fixed() {
        for frontier_size in [0, 1, 1000] {
            assert_eq!(
                Strategy::TopDown.direction(frontier_size, 10),
                Direction::TopDown
            );
            assert_eq!(
                Strategy::BottomUp.direction(frontier_size, 10),
                Direction::BottomUp
            );
        }
    }
}
