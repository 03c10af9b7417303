/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! A fixed binary layout for graphs.
//!
//! All values are little-endian 32-bit signed integers. The file contains:
//!
//! * a header with the number of nodes `n` and the number of arcs `m`;
//! * the `n` starting offsets of the outgoing arcs of each node;
//! * the `m` targets of the outgoing arcs;
//! * the `n` starting offsets of the incoming arcs of each node;
//! * the `m` sources of the incoming arcs.
//!
//! The arcs of the last node end at `m`, so the final offset is not stored.

use crate::graphs::{bi_csr_graph::BiCsrGraph, csr_graph::CsrGraph, GraphError};
use crate::traits::RandomAccessGraph;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Loads a graph in binary format from a file.
///
/// See [`read_binary`].
pub fn load_binary(path: impl AsRef<Path>) -> Result<BiCsrGraph> {
    let path = path.as_ref();
    log::info!("Loading binary graph from {}", path.display());
    let file = File::open(path).with_context(|| format!("Could not open {}", path.display()))?;
    let graph = read_binary(BufReader::new(file))
        .with_context(|| format!("Could not load graph from {}", path.display()))?;
    log::info!(
        "Loaded graph with {} nodes and {} arcs",
        graph.num_nodes(),
        graph.num_arcs()
    );
    Ok(graph)
}

/// Reads a graph in binary format.
///
/// The structure is fully validated: offsets must be monotone, arcs must be
/// in range, and the incoming arcs must be the transpose of the outgoing arcs.
pub fn read_binary(mut reader: impl Read) -> Result<BiCsrGraph> {
    let num_nodes = read_usize(&mut reader, "number of nodes")?;
    let num_arcs = read_usize(&mut reader, "number of arcs")?;

    let outgoing = read_csr(&mut reader, num_nodes, num_arcs, "outgoing")?;
    let incoming = read_csr(&mut reader, num_nodes, num_arcs, "incoming")?;

    let graph = BiCsrGraph::new(outgoing, incoming)?;
    graph.check_transpose()?;
    Ok(graph)
}

fn read_csr(
    reader: &mut impl Read,
    num_nodes: usize,
    num_arcs: usize,
    direction: &'static str,
) -> Result<CsrGraph> {
    let mut dcf = read_usizes(reader, num_nodes, 1, "offsets")
        .with_context(|| format!("Could not read {direction} offsets"))?;
    dcf.push(num_arcs);
    let successors = read_usizes(reader, num_arcs, 0, "arcs")
        .with_context(|| format!("Could not read {direction} arcs"))?;
    CsrGraph::try_from_parts(dcf.into(), successors.into())
        .with_context(|| format!("Invalid {direction} arcs"))
}

fn read_usize(reader: &mut impl Read, field: &'static str) -> Result<usize> {
    let mut buf = [0; 4];
    reader
        .read_exact(&mut buf)
        .with_context(|| format!("Could not read the {field}"))?;
    to_usize(i32::from_le_bytes(buf), field)
}

/// Reads `len` values, reserving space for `extra` more.
fn read_usizes(
    reader: &mut impl Read,
    len: usize,
    extra: usize,
    field: &'static str,
) -> Result<Vec<usize>> {
    let mut values = Vec::new();
    values
        .try_reserve_exact(len + extra)
        .with_context(|| format!("Could not allocate {} {field}", len + extra))?;

    let mut buf = vec![0; 4 * 1024];
    let mut remaining = len;
    while remaining > 0 {
        let chunk = remaining.min(buf.len() / 4);
        reader.read_exact(&mut buf[..4 * chunk])?;
        for bytes in buf[..4 * chunk].chunks_exact(4) {
            let value = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
            values.push(to_usize(value, field)?);
        }
        remaining -= chunk;
    }
    Ok(values)
}

fn to_usize(value: i32, field: &'static str) -> Result<usize> {
    usize::try_from(value).map_err(|_| {
        GraphError::NegativeValue {
            field,
            value: value as i64,
        }
        .into()
    })
}

/// Stores a graph in binary format to a file.
///
/// See [`write_binary`].
pub fn store_binary(path: impl AsRef<Path>, graph: &BiCsrGraph) -> Result<()> {
    let path = path.as_ref();
    log::info!("Storing binary graph at {}", path.display());
    let file =
        File::create(path).with_context(|| format!("Could not create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_binary(&mut writer, graph)
        .with_context(|| format!("Could not store graph at {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Could not flush {}", path.display()))?;
    Ok(())
}

/// Writes a graph in binary format.
///
/// # Errors
///
/// Besides I/O errors, returns [`GraphError::TooLarge`] if the number of nodes
/// or of arcs does not fit in a 32-bit signed integer.
pub fn write_binary(mut writer: impl Write, graph: &BiCsrGraph) -> Result<()> {
    let num_nodes = graph.num_nodes();
    // Offsets are bounded by the number of arcs, and nodes by the number of
    // nodes, so checking these two is enough
    let num_nodes_i32 = to_i32(num_nodes as u64, "number of nodes")?;
    let num_arcs_i32 = to_i32(graph.num_arcs(), "number of arcs")?;

    writer.write_all(&num_nodes_i32.to_le_bytes())?;
    writer.write_all(&num_arcs_i32.to_le_bytes())?;

    for csr in [graph.outgoing(), graph.incoming()] {
        for &offset in &csr.dcf()[..num_nodes] {
            writer.write_all(&(offset as i32).to_le_bytes())?;
        }
        for &node in csr.successors_array() {
            writer.write_all(&(node as i32).to_le_bytes())?;
        }
    }

    Ok(())
}

fn to_i32(value: u64, field: &'static str) -> Result<i32> {
    i32::try_from(value).map_err(|_| GraphError::TooLarge { field, value }.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn le_bytes(values: &[i32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn test_read_binary() -> Result<()> {
        // 0 -> 1, 0 -> 2, 2 -> 1
        let bytes = le_bytes(&[3, 3, 0, 2, 2, 1, 2, 1, 0, 0, 2, 0, 2, 0]);
        let graph = read_binary(bytes.as_slice())?;
        assert_eq!(graph.num_nodes(), 3);
        assert_eq!(graph.num_arcs(), 3);
        assert_eq!(graph.outgoing().dcf(), &[0, 2, 2, 3]);
        assert_eq!(graph.incoming().dcf(), &[0, 0, 2, 3]);
        Ok(())
    }

    #[test]
    fn test_negative_header() {
        let bytes = le_bytes(&[-1, 0]);
        let err = read_binary(bytes.as_slice()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<GraphError>(),
            Some(&GraphError::NegativeValue {
                field: "number of nodes",
                value: -1
            })
        );
    }

    #[test]
    fn test_truncated() {
        let bytes = le_bytes(&[3, 3, 0, 2, 2, 1]);
        assert!(read_binary(bytes.as_slice()).is_err());
    }

    #[test]
    fn test_write_roundtrip() -> Result<()> {
        let graph = BiCsrGraph::from_arcs(4, [(0, 1), (3, 0), (1, 3), (1, 2)])?;
        let mut bytes = Vec::new();
        write_binary(&mut bytes, &graph)?;
        assert_eq!(bytes.len(), 4 * (2 + 2 * 4 + 2 * 4));
        assert_eq!(read_binary(bytes.as_slice())?, graph);
        Ok(())
    }
}
