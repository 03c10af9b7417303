/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::{
    get_thread_pool, GlobalArgs, GranularityArgs, GraphArgs, IntVectorFormat, NumThreadsArg,
    PrivStrategy, ThresholdArgs,
};
use anyhow::{ensure, Context, Result};
use clap::Args;
use dobfs::traits::RandomAccessGraph;
use dobfs_algo::prelude::*;
use dsi_progress_logger::prelude::*;
use std::path::PathBuf;

#[derive(Args, Debug)]
#[command(about = "Computes the distances from a root with a direction-optimizing breadth-first visit.", long_about = None)]
pub struct CliArgs {
    #[clap(flatten)]
    pub graph: GraphArgs,

    #[arg(short, long, default_value_t = 0)]
    /// The root of the visit.
    pub root: usize,

    #[arg(short, long, value_enum, default_value_t = PrivStrategy::Hybrid)]
    /// How to choose the direction of each level.
    pub strategy: PrivStrategy,

    #[clap(flatten)]
    pub threshold: ThresholdArgs,

    /// Number of repeats (usually to warm up the cache).
    #[arg(short = 'R', long, default_value_t = 1)]
    pub repeats: usize,

    #[clap(flatten)]
    pub num_threads: NumThreadsArg,

    #[clap(flatten)]
    pub granularity: GranularityArgs,

    #[arg(short, long)]
    /// Store the distances at this path (unreachable nodes have distance -1).
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = IntVectorFormat::Ascii)]
    /// The storage format for distances.
    pub output_format: IntVectorFormat,
}

pub fn main(global_args: GlobalArgs, args: CliArgs) -> Result<()> {
    ensure!(args.repeats > 0, "The number of repeats must be positive");
    let graph = args.graph.load()?;
    ensure!(
        args.root < graph.num_nodes(),
        "Root {} is out of range: the graph has {} nodes",
        args.root,
        graph.num_nodes()
    );

    let thread_pool = get_thread_pool(args.num_threads.num_threads);
    let strategy = args.strategy.into_strategy(args.threshold.into_threshold());
    let mut visit = Bfs::with_granularity(&graph, args.granularity.into_granularity())?;
    log::info!("Node granularity: {}", visit.granularity());

    let mut pl = progress_logger![display_memory = true];
    if let Some(log_interval) = global_args.log_interval {
        pl.log_interval(log_interval);
    }

    let mut output = visit.run(args.root, strategy, &thread_pool, &mut pl)?;
    for _ in 1..args.repeats {
        output = visit.run(args.root, strategy, &thread_pool, &mut pl)?;
    }

    log_levels(&output);

    if let Some(path) = args.output {
        args.output_format
            .store(&path, &output.distances)
            .with_context(|| format!("Could not store distances at {}", path.display()))?;
    }

    Ok(())
}

/// Logs per-level statistics and a summary of a visit.
pub fn log_levels(output: &BfsOutput) {
    log::info!(
        "{:>9} {:>9} {:>12} {:>12} {:>12}",
        "level",
        "direction",
        "frontier",
        "discovered",
        "time"
    );
    for level in &output.levels {
        log::info!(
            "{:>9} {:>9} {:>12} {:>12} {:>12}",
            level.iteration,
            level.direction.to_string(),
            level.frontier_size,
            level.discovered,
            format!("{:.3?}", level.elapsed)
        );
    }
    log::info!(
        "Reached {} nodes in {} levels; eccentricity of the root: {}",
        output.num_reached(),
        output.levels.len(),
        output.eccentricity()
    );
}
