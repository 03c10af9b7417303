/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Cross-checking of distance arrays.
//!
//! Visits with different strategies must compute exactly the same distances;
//! [`eq`] compares the output of two visits and reports the first
//! difference.

use rayon::prelude::*;
use thiserror::Error;

/// A difference between two distance arrays.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MismatchError {
    #[error("Different number of nodes: {first} != {second}")]
    Length { first: usize, second: usize },
    #[error("Different distances for node {node}: {first} != {second}")]
    Distance {
        node: usize,
        first: isize,
        second: isize,
    },
}

/// Checks that two distance arrays are equal.
///
/// On failure, the error reports the lowest node with different distances.
pub fn eq(first: &[isize], second: &[isize]) -> Result<(), MismatchError> {
    if first.len() != second.len() {
        return Err(MismatchError::Length {
            first: first.len(),
            second: second.len(),
        });
    }
    match first
        .par_iter()
        .zip(second)
        .position_first(|(a, b)| a != b)
    {
        Some(node) => Err(MismatchError::Distance {
            node,
            first: first[node],
            second: second[node],
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eq() {
        assert_eq!(eq(&[0, 1, -1], &[0, 1, -1]), Ok(()));
        assert_eq!(eq(&[], &[]), Ok(()));
        assert_eq!(
            eq(&[0, 1], &[0, 1, 2]),
            Err(MismatchError::Length {
                first: 2,
                second: 3
            })
        );
        assert_eq!(
            eq(&[0, 1, 2, 3], &[0, 1, -1, 4]),
            Err(MismatchError::Distance {
                node: 2,
                first: 2,
                second: -1
            })
        );
    }
}
