/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Textual arc lists.
//!
//! Each line contains an arc, specified by the numerical identifiers of its
//! source and target (starting from zero). By default identifiers are
//! separated by whitespace, and lines starting with `#` are ignored, as are
//! empty lines.

use crate::graphs::bi_csr_graph::BiCsrGraph;
use crate::traits::RandomAccessGraph;
use anyhow::{bail, Context, Result};
use dsi_progress_logger::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Options for parsing an arc list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcListOptions {
    /// Lines starting with this symbol (after trimming) are ignored.
    pub line_comment_symbol: char,
    /// The separator between source and target; [`None`] means any
    /// whitespace.
    pub separator: Option<char>,
    /// The number of nodes of the graph; if [`None`], it is one plus the
    /// largest node identifier appearing in the list. Specifying more nodes
    /// adds isolated nodes at the end of the graph.
    pub num_nodes: Option<usize>,
}

impl core::default::Default for ArcListOptions {
    fn default() -> Self {
        Self {
            line_comment_symbol: '#',
            separator: None,
            num_nodes: None,
        }
    }
}

/// Loads a graph from a file containing an arc list.
///
/// See [`read_ascii`].
pub fn load_ascii(path: impl AsRef<Path>, options: &ArcListOptions) -> Result<BiCsrGraph> {
    let path = path.as_ref();
    log::info!("Loading arc list from {}", path.display());
    let file = File::open(path).with_context(|| format!("Could not open {}", path.display()))?;
    read_ascii(BufReader::new(file), options)
        .with_context(|| format!("Could not load graph from {}", path.display()))
}

/// Reads a graph from an arc list.
///
/// Both directions of the graph are built from the list: successors are
/// stored in the order in which arcs appear, whereas predecessors are sorted
/// by increasing node identifier.
pub fn read_ascii(reader: impl BufRead, options: &ArcListOptions) -> Result<BiCsrGraph> {
    let mut pl = progress_logger![display_memory = true, item_name = "line"];
    pl.start("Reading arcs...");

    let mut arcs = Vec::new();
    let mut max_node: Option<usize> = None;

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Could not read line {}", line_num + 1))?;
        pl.light_update();
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(options.line_comment_symbol) {
            continue;
        }

        let vals: Vec<&str> = match options.separator {
            Some(separator) => trimmed.split(separator).map(str::trim).collect(),
            None => trimmed.split_whitespace().collect(),
        };
        if vals.len() != 2 {
            bail!(
                "Line {}: {:?} should contain exactly two node identifiers, but it contains {} fields",
                line_num + 1,
                line,
                vals.len()
            );
        }

        let src = parse_node(vals[0], line_num)?;
        let dst = parse_node(vals[1], line_num)?;

        max_node = max_node.max(Some(src.max(dst)));
        arcs.push((src, dst));
    }

    pl.done();

    let inferred = max_node.map_or(0, |max| max + 1);
    let num_nodes = options.num_nodes.unwrap_or(inferred);
    let graph = BiCsrGraph::from_arcs(num_nodes, arcs)?;
    log::info!(
        "Read graph with {} nodes and {} arcs",
        graph.num_nodes(),
        graph.num_arcs()
    );
    Ok(graph)
}

fn parse_node(s: &str, line_num: usize) -> Result<usize> {
    s.parse::<usize>()
        .with_context(|| format!("Line {}: could not parse {:?} as a node identifier", line_num + 1, s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::GraphError;
    use crate::traits::BidirectionalGraph;

    #[test]
    fn test_comments_and_blank_lines() -> Result<()> {
        let text = "# a comment\n0 1\n\n  # another one\n1\t2\n2 0\n";
        let graph = read_ascii(text.as_bytes(), &ArcListOptions::default())?;
        assert_eq!(graph.num_nodes(), 3);
        assert_eq!(graph.num_arcs(), 3);
        assert_eq!(graph.successors(1), &[2]);
        assert_eq!(graph.predecessors(0), &[2]);
        Ok(())
    }

    #[test]
    fn test_separator() -> Result<()> {
        let options = ArcListOptions {
            separator: Some(','),
            ..Default::default()
        };
        let graph = read_ascii("0, 3\n3,1\n".as_bytes(), &options)?;
        assert_eq!(graph.num_nodes(), 4);
        assert_eq!(graph.successors(3), &[1]);
        Ok(())
    }

    #[test]
    fn test_num_nodes() -> Result<()> {
        let options = ArcListOptions {
            num_nodes: Some(10),
            ..Default::default()
        };
        let graph = read_ascii("0 1\n".as_bytes(), &options)?;
        assert_eq!(graph.num_nodes(), 10);

        let options = ArcListOptions {
            num_nodes: Some(1),
            ..Default::default()
        };
        let err = read_ascii("0 1\n".as_bytes(), &options).unwrap_err();
        assert_eq!(
            err.downcast_ref::<GraphError>(),
            Some(&GraphError::NodeOutOfRange {
                node: 1,
                num_nodes: 1
            })
        );
        Ok(())
    }

    #[test]
    fn test_num_nodes_too_large() {
        let options = ArcListOptions {
            num_nodes: Some(usize::MAX),
            ..Default::default()
        };
        let err = read_ascii("0 1\n".as_bytes(), &options).unwrap_err();
        assert_eq!(
            err.downcast_ref::<GraphError>(),
            Some(&GraphError::TooLarge {
                field: "number of nodes",
                value: usize::MAX as u64
            })
        );

        let options = ArcListOptions {
            num_nodes: Some(usize::MAX / 2),
            ..Default::default()
        };
        let err = read_ascii("0 1\n".as_bytes(), &options).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GraphError>(),
            Some(GraphError::Allocation { .. })
        ));
    }

    #[test]
    fn test_empty() -> Result<()> {
        let graph = read_ascii("# nothing\n".as_bytes(), &ArcListOptions::default())?;
        assert_eq!(graph.num_nodes(), 0);
        Ok(())
    }

    #[test]
    fn test_malformed() {
        let options = ArcListOptions::default();
        assert!(read_ascii("0 1 2\n".as_bytes(), &options).is_err());
        assert!(read_ascii("0\n".as_bytes(), &options).is_err());
        assert!(read_ascii("0 -1\n".as_bytes(), &options).is_err());
        assert!(read_ascii("a b\n".as_bytes(), &options).is_err());
    }
}
