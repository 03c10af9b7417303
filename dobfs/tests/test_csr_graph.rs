/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use dobfs::prelude::*;
use dobfs::traits::graph;

fn parts(dcf: &[usize], successors: &[usize]) -> Result<CsrGraph, GraphError> {
    CsrGraph::try_from_parts(dcf.into(), successors.into())
}

#[test]
fn test_try_from_parts() -> Result<()> {
    let g = parts(&[0, 2, 3, 3], &[1, 2, 0])?;
    assert_eq!(g.num_nodes(), 3);
    assert_eq!(g.num_arcs(), 3);
    assert_eq!(g.successors(0), &[1, 2]);
    assert_eq!(g.successors(2), &[] as &[usize]);
    Ok(())
}

#[test]
fn test_invalid_parts() {
    assert_eq!(parts(&[], &[]), Err(GraphError::EmptyOffsets));
    assert_eq!(parts(&[1, 1], &[0]), Err(GraphError::NonZeroFirstOffset(1)));
    assert_eq!(
        parts(&[0, 2, 1, 3], &[0, 1, 2]),
        Err(GraphError::NonMonotoneOffsets {
            node: 1,
            start: 2,
            end: 1
        })
    );
    assert_eq!(
        parts(&[0, 1, 2], &[0, 1, 1]),
        Err(GraphError::OffsetsArcsMismatch {
            last: 2,
            num_arcs: 3
        })
    );
    assert_eq!(
        parts(&[0, 1, 2], &[1, 2]),
        Err(GraphError::ArcOutOfRange {
            index: 1,
            target: 2,
            num_nodes: 2
        })
    );
}

#[test]
fn test_bi_csr_graph() -> Result<()> {
    let arcs = [(0, 1), (0, 2), (1, 3), (2, 3), (3, 4)];
    let g = BiCsrGraph::from_arcs(5, arcs)?;
    assert_eq!(g.num_nodes(), 5);
    assert_eq!(g.num_arcs(), 5);
    assert_eq!(g.predecessors(3), &[1, 2]);
    assert_eq!(g.predecessors(0), &[] as &[usize]);
    assert_eq!(g.indegree(4), 1);
    g.check_transpose()?;

    let (outgoing, incoming) = g.clone().into_inner();
    assert!(graph::eq(&incoming, &outgoing.transpose()));
    assert_eq!(BiCsrGraph::new(outgoing, incoming)?, g);
    Ok(())
}

#[test]
fn test_mismatched_directions() -> Result<()> {
    let outgoing = CsrGraph::from_arcs(3, [(0, 1), (1, 2)])?;

    let incoming = CsrGraph::from_arcs(2, [(1, 0)])?;
    assert_eq!(
        BiCsrGraph::new(outgoing.clone(), incoming),
        Err(GraphError::NodesMismatch {
            outgoing: 3,
            incoming: 2
        })
    );

    let incoming = CsrGraph::from_arcs(3, [(1, 0)])?;
    assert_eq!(
        BiCsrGraph::new(outgoing.clone(), incoming),
        Err(GraphError::ArcsMismatch {
            outgoing: 2,
            incoming: 1
        })
    );

    // Right sizes, wrong arcs
    let incoming = CsrGraph::from_arcs(3, [(1, 0), (1, 2)])?;
    let g = BiCsrGraph::new(outgoing, incoming)?;
    assert_eq!(g.check_transpose(), Err(GraphError::NotTranspose { node: 1 }));
    Ok(())
}

#[test]
fn test_unsorted_predecessors_are_a_transpose() -> Result<()> {
    let outgoing = CsrGraph::from_arcs(3, [(0, 2), (1, 2)])?;
    let incoming = CsrGraph::from_arcs(3, [(2, 1), (2, 0)])?;
    let g = BiCsrGraph::new(outgoing, incoming)?;
    g.check_transpose()?;
    // Storage order is preserved
    assert_eq!(g.predecessors(2), &[1, 0]);
    Ok(())
}

#[test]
fn test_references() -> Result<()> {
    fn arcs(g: impl BidirectionalGraph) -> u64 {
        (0..g.num_nodes()).map(|x| g.indegree(x) as u64).sum()
    }
    let g = BiCsrGraph::from_arcs(3, [(0, 1), (1, 2), (2, 0), (2, 1)])?;
    assert_eq!(arcs(&g), g.num_arcs());
    Ok(())
}
