/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 * SPDX-FileCopyrightText: 2025 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::GraphError;
use crate::traits::RandomAccessGraph;
use rayon::prelude::*;

/// A compressed sparse-row graph.
///
/// It is a graph representation that stores the degree-cumulative function
/// (DCF) and the successors in two boxed slices. The DCF is a sequence of
/// `num_nodes + 1` offsets: the successors of node `x` are
/// `successors[dcf[x]..dcf[x + 1]]`, and the last offset is the number of
/// arcs.
///
/// Successors are returned in the order in which they have been stored; they
/// need not be sorted.
///
/// A graph can be built from its parts using [`try_from_parts`], which checks
/// all structural invariants, or [`from_parts`], which trusts the caller; or
/// from a list of arcs using [`from_arcs`].
///
/// [`try_from_parts`]: CsrGraph::try_from_parts
/// [`from_parts`]: CsrGraph::from_parts
/// [`from_arcs`]: CsrGraph::from_arcs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrGraph {
    dcf: Box<[usize]>,
    successors: Box<[usize]>,
}

impl core::default::Default for CsrGraph {
    fn default() -> Self {
        Self {
            dcf: vec![0].into(),
            successors: vec![].into(),
        }
    }
}

impl CsrGraph {
    /// Creates an empty CSR graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new CSR graph from the given degree-cumulative function and
    /// successors.
    ///
    /// # Safety
    ///
    /// The degree-cumulative function must be non-empty, start from zero, be
    /// monotone and end with the number of successors, and all successors
    /// must be smaller than the number of nodes (the length of the DCF minus
    /// one). Use [`try_from_parts`](Self::try_from_parts) if the parts come
    /// from an untrusted source.
    pub unsafe fn from_parts(dcf: Box<[usize]>, successors: Box<[usize]>) -> Self {
        debug_assert!(Self::check_parts(&dcf, &successors).is_ok());
        Self { dcf, successors }
    }

    /// Creates a new CSR graph from the given degree-cumulative function and
    /// successors, checking all structural invariants.
    pub fn try_from_parts(dcf: Box<[usize]>, successors: Box<[usize]>) -> Result<Self, GraphError> {
        Self::check_parts(&dcf, &successors)?;
        Ok(Self { dcf, successors })
    }

    fn check_parts(dcf: &[usize], successors: &[usize]) -> Result<(), GraphError> {
        let (&first, _) = dcf.split_first().ok_or(GraphError::EmptyOffsets)?;
        if first != 0 {
            return Err(GraphError::NonZeroFirstOffset(first));
        }

        if let Some(node) = dcf.par_windows(2).position_first(|w| w[0] > w[1]) {
            return Err(GraphError::NonMonotoneOffsets {
                node,
                start: dcf[node],
                end: dcf[node + 1],
            });
        }

        // The DCF is not empty
        let last = dcf[dcf.len() - 1];
        if last != successors.len() {
            return Err(GraphError::OffsetsArcsMismatch {
                last,
                num_arcs: successors.len(),
            });
        }

        let num_nodes = dcf.len() - 1;
        if let Some(index) = successors.par_iter().position_first(|&s| s >= num_nodes) {
            return Err(GraphError::ArcOutOfRange {
                index,
                target: successors[index],
                num_nodes,
            });
        }

        Ok(())
    }

    /// Creates a new CSR graph with `num_nodes` nodes from a list of arcs.
    ///
    /// The arcs need not be sorted: successors of the same node are stored in
    /// the order in which they appear in the list. Duplicate arcs and loops
    /// are kept.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeOutOfRange`] if a source or a target is not
    /// smaller than `num_nodes`, [`GraphError::TooLarge`] if `num_nodes + 1`
    /// offsets cannot be represented, and [`GraphError::Allocation`] if the
    /// offsets or the successors cannot be allocated.
    pub fn from_arcs(
        num_nodes: usize,
        arcs: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, GraphError> {
        let arcs = arcs.into_iter().collect::<Vec<_>>();
        if let Some(&(src, dst)) = arcs
            .par_iter()
            .find_first(|&&(src, dst)| src >= num_nodes || dst >= num_nodes)
        {
            return Err(GraphError::NodeOutOfRange {
                node: if src >= num_nodes { src } else { dst },
                num_nodes,
            });
        }

        let dcf_len = num_nodes.checked_add(1).ok_or(GraphError::TooLarge {
            field: "number of nodes",
            value: num_nodes as u64,
        })?;
        let dcf = try_zeroed(dcf_len)?;
        let next = try_zeroed(num_nodes)?;
        let successors = try_zeroed(arcs.len())?;
        Ok(Self::counting_sort(&arcs, dcf, next, successors))
    }

    /// Counting sort of the arcs by source; stable, so that successors keep
    /// the order of the list.
    ///
    /// All buffers must be zeroed: `dcf` must have length `num_nodes + 1`,
    /// `next` length `num_nodes` and `successors` length `arcs.len()`.
    fn counting_sort(
        arcs: &[(usize, usize)],
        mut dcf: Vec<usize>,
        mut next: Vec<usize>,
        mut successors: Vec<usize>,
    ) -> Self {
        let num_nodes = next.len();
        for &(src, _) in arcs {
            dcf[src + 1] += 1;
        }
        for i in 0..num_nodes {
            dcf[i + 1] += dcf[i];
        }

        next.copy_from_slice(&dcf[..num_nodes]);
        for &(src, dst) in arcs {
            successors[next[src]] = dst;
            next[src] += 1;
        }

        unsafe { Self::from_parts(dcf.into(), successors.into()) }
    }

    /// Returns the transpose of this graph.
    ///
    /// The successors of each node of the transpose (i.e., the predecessors
    /// of the node in this graph) are sorted by increasing node identifier.
    pub fn transpose(&self) -> Self {
        let num_nodes = self.num_nodes();
        let arcs = (0..num_nodes)
            .flat_map(|src| self.successors(src).iter().map(move |&dst| (dst, src)))
            .collect::<Vec<_>>();
        Self::counting_sort(
            &arcs,
            vec![0; num_nodes + 1],
            vec![0; num_nodes],
            vec![0; arcs.len()],
        )
    }

    /// Returns the degree-cumulative function.
    pub fn dcf(&self) -> &[usize] {
        &self.dcf
    }

    /// Returns the flat array of successors.
    pub fn successors_array(&self) -> &[usize] {
        &self.successors
    }

    /// Returns the degree-cumulative function and the successors.
    pub fn into_inner(self) -> (Box<[usize]>, Box<[usize]>) {
        (self.dcf, self.successors)
    }
}

fn try_zeroed(len: usize) -> Result<Vec<usize>, GraphError> {
    let mut values = Vec::new();
    values
        .try_reserve_exact(len)
        .map_err(|source| GraphError::Allocation { len, source })?;
    values.resize(len, 0);
    Ok(values)
}

impl RandomAccessGraph for CsrGraph {
    #[inline(always)]
    fn num_nodes(&self) -> usize {
        self.dcf.len() - 1
    }

    #[inline(always)]
    fn num_arcs(&self) -> u64 {
        self.successors.len() as u64
    }

    #[inline(always)]
    fn successors(&self, node: usize) -> &[usize] {
        &self.successors[self.dcf[node]..self.dcf[node + 1]]
    }

    #[inline(always)]
    fn outdegree(&self, node: usize) -> usize {
        self.dcf[node + 1] - self.dcf[node]
    }
}

#[cfg(test)]
#[allow(trivial_casts)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let g = CsrGraph::new();
        assert_eq!(g.num_nodes(), 0);
        assert_eq!(g.num_arcs(), 0);
        assert_eq!(g.transpose(), g);
    }

    #[test]
    fn test_from_arcs_keeps_order() -> Result<(), GraphError> {
        let g = CsrGraph::from_arcs(4, [(2, 3), (0, 2), (2, 0), (0, 1), (2, 3)])?;
        assert_eq!(g.dcf(), &[0, 2, 2, 5, 5]);
        assert_eq!(g.successors(0), &[2, 1]);
        assert_eq!(g.successors(1), &[] as &[usize]);
        assert_eq!(g.successors(2), &[3, 0, 3]);
        assert_eq!(g.outdegree(2), 3);
        assert!(g.has_arc(2, 0));
        assert!(!g.has_arc(0, 3));
        Ok(())
    }

    #[test]
    fn test_from_arcs_out_of_range() {
        assert_eq!(
            CsrGraph::from_arcs(3, [(0, 1), (1, 3)]),
            Err(GraphError::NodeOutOfRange {
                node: 3,
                num_nodes: 3
            })
        );
        assert_eq!(
            CsrGraph::from_arcs(3, [(5, 1)]),
            Err(GraphError::NodeOutOfRange {
                node: 5,
                num_nodes: 3
            })
        );
    }

    #[test]
    fn test_from_arcs_too_many_nodes() {
        assert_eq!(
            CsrGraph::from_arcs(usize::MAX, [(0, 1)]),
            Err(GraphError::TooLarge {
                field: "number of nodes",
                value: usize::MAX as u64
            })
        );
        assert!(matches!(
            CsrGraph::from_arcs(usize::MAX / 2, [(0, 1)]),
            Err(GraphError::Allocation { .. })
        ));
    }

    #[test]
    fn test_transpose() -> Result<(), GraphError> {
        let g = CsrGraph::from_arcs(3, [(0, 2), (1, 2), (2, 0), (0, 1)])?;
        let t = g.transpose();
        assert_eq!(t.successors(0), &[2]);
        assert_eq!(t.successors(1), &[0]);
        assert_eq!(t.successors(2), &[0, 1]);
        assert_eq!(t.transpose().num_arcs(), g.num_arcs());
        Ok(())
    }
}
