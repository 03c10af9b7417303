/*
 * SPDX-FileCopyrightText: 2024 Davide Cologni
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::{get_thread_pool, GlobalArgs, GranularityArgs, GraphArgs, NumThreadsArg, ThresholdArgs};
use anyhow::{ensure, Context, Result};
use clap::Args;
use dobfs::traits::RandomAccessGraph;
use dobfs_algo::prelude::*;
use dsi_progress_logger::prelude::*;
use std::time::Instant;

#[derive(Args, Debug)]
#[command(about = "Checks that top-down, bottom-up and hybrid visits from the same root compute the same distances, and reports the time of each.", long_about = None)]
pub struct CliArgs {
    #[clap(flatten)]
    pub graph: GraphArgs,

    #[arg(short, long, default_value_t = 0)]
    /// The root of the visits.
    pub root: usize,

    #[clap(flatten)]
    pub threshold: ThresholdArgs,

    #[clap(flatten)]
    pub num_threads: NumThreadsArg,

    #[clap(flatten)]
    pub granularity: GranularityArgs,
}

pub fn main(global_args: GlobalArgs, args: CliArgs) -> Result<()> {
    let graph = args.graph.load()?;
    ensure!(
        args.root < graph.num_nodes(),
        "Root {} is out of range: the graph has {} nodes",
        args.root,
        graph.num_nodes()
    );

    let thread_pool = get_thread_pool(args.num_threads.num_threads);
    let mut visit = Bfs::with_granularity(&graph, args.granularity.into_granularity())?;

    let mut pl = progress_logger![display_memory = true];
    if let Some(log_interval) = global_args.log_interval {
        pl.log_interval(log_interval);
    }

    let strategies = [
        Strategy::TopDown,
        Strategy::BottomUp,
        Strategy::Hybrid(args.threshold.into_threshold()),
    ];
    let mut outputs = Vec::with_capacity(strategies.len());
    for strategy in strategies {
        let start = Instant::now();
        let output = visit.run(args.root, strategy, &thread_pool, &mut pl)?;
        log::info!(
            "{}: {:.3?} ({} levels)",
            strategy,
            start.elapsed(),
            output.levels.len()
        );
        outputs.push((strategy, output));
    }

    let (reference_strategy, reference) = &outputs[0];
    for (strategy, output) in &outputs[1..] {
        check::eq(&reference.distances, &output.distances).with_context(|| {
            format!("The {reference_strategy} and {strategy} visits computed different distances")
        })?;
    }

    log::info!(
        "All visits agree: {} nodes reached from node {}, eccentricity {}",
        reference.num_reached(),
        args.root,
        reference.eccentricity()
    );
    Ok(())
}
