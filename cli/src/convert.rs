/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::{create_parent_dir, ArcListArgs, GlobalArgs};
use anyhow::Result;
use clap::Args;
use dobfs::io::{load_ascii, store_binary, ArcListOptions};
use std::path::PathBuf;

#[derive(Args, Debug)]
#[command(about = "Converts an arc list into the binary format. Each line of the source file contains the source and the target of an arc.", long_about = None)]
pub struct CliArgs {
    /// The arc list.
    pub src: PathBuf,
    /// The binary graph to create.
    pub dst: PathBuf,

    #[clap(flatten)]
    pub arcs: ArcListArgs,
}

pub fn main(_global_args: GlobalArgs, args: CliArgs) -> Result<()> {
    let graph = load_ascii(&args.src, &ArcListOptions::from(&args.arcs))?;
    create_parent_dir(&args.dst)?;
    store_binary(&args.dst, &graph)
}
