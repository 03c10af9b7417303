/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Loading and storing graphs.
//!
//! Two formats are supported:
//!
//! * a [binary format](binary) storing directly the offsets and the arcs of
//!   both directions using little-endian 32-bit signed integers;
//! * a [textual format](ascii) listing arcs, one per line.
//!
//! Loaders validate the structure of the graph once, so that algorithms can
//! trust it.

pub mod ascii;
pub use ascii::*;

pub mod binary;
pub use binary::*;

use crate::graphs::bi_csr_graph::BiCsrGraph;
use anyhow::Result;
use std::path::Path;

/// The on-disk formats of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphFormat {
    /// See [`load_binary`].
    #[default]
    Binary,
    /// See [`load_ascii`].
    Ascii,
}

/// Loads a graph in the given format.
///
/// The options are used only by the [ASCII](GraphFormat::Ascii) format.
pub fn load(path: impl AsRef<Path>, format: GraphFormat, options: &ArcListOptions) -> Result<BiCsrGraph> {
    match format {
        GraphFormat::Binary => load_binary(path),
        GraphFormat::Ascii => load_ascii(path, options),
    }
}
