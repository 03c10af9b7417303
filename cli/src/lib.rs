/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![doc = include_str!("../README.md")]
#![deny(unstable_features)]
#![deny(trivial_casts)]
#![deny(unconditional_recursion)]
#![deny(clippy::empty_loop)]
#![deny(unreachable_code)]
#![deny(unreachable_pub)]
#![deny(unreachable_patterns)]
#![deny(unused_macro_rules)]
#![deny(unused_doc_comments)]

use anyhow::{anyhow, bail, ensure, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use dobfs::io::{ArcListOptions, GraphFormat};
use dobfs::prelude::BiCsrGraph;
use dobfs::utils::Granularity;
use dobfs_algo::bfs::{Strategy, Threshold};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::time::SystemTime;

pub mod build_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));

    pub fn version_string() -> String {
        format!(
            "{}
build info: built on {} for {} with {} ({} profile)",
            PKG_VERSION, BUILT_TIME_UTC, TARGET, RUSTC_VERSION, PROFILE
        )
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
/// The on-disk format of a graph.
///
/// It is used to implement [`ValueEnum`] here instead of in [`dobfs`].
pub enum PrivGraphFormat {
    /// Little-endian 32-bit offsets and arcs of both directions.
    Binary,
    /// An arc list, one arc per line.
    Ascii,
}

impl From<PrivGraphFormat> for GraphFormat {
    fn from(value: PrivGraphFormat) -> Self {
        match value {
            PrivGraphFormat::Binary => GraphFormat::Binary,
            PrivGraphFormat::Ascii => GraphFormat::Ascii,
        }
    }
}

#[derive(Args, Debug)]
/// Shared CLI arguments for reading files containing arcs.
pub struct ArcListArgs {
    #[arg(long, default_value_t = '#')]
    /// Ignore lines that start with this symbol.
    pub line_comment_symbol: char,

    #[arg(long)]
    /// The separator between source and target (default: any whitespace).
    pub separator: Option<char>,

    #[arg(long)]
    /// The number of nodes of the graph (default: one plus the largest node
    /// identifier).
    pub num_nodes: Option<usize>,
}

impl From<&ArcListArgs> for ArcListOptions {
    fn from(args: &ArcListArgs) -> Self {
        ArcListOptions {
            line_comment_symbol: args.line_comment_symbol,
            separator: args.separator,
            num_nodes: args.num_nodes,
        }
    }
}

#[derive(Args, Debug)]
/// Shared CLI arguments for commands reading a graph.
pub struct GraphArgs {
    /// The file containing the graph.
    pub graph: PathBuf,

    #[arg(short, long, value_enum, default_value_t = PrivGraphFormat::Binary)]
    /// The format of the graph.
    pub format: PrivGraphFormat,

    #[clap(flatten)]
    pub arcs: ArcListArgs,
}

impl GraphArgs {
    /// Loads the graph.
    pub fn load(&self) -> Result<BiCsrGraph> {
        dobfs::io::load(
            &self.graph,
            self.format.into(),
            &ArcListOptions::from(&self.arcs),
        )
    }
}

/// Parses the number of threads from a string.
///
/// This function is meant to be used with `#[arg(...,  value_parser =
/// num_threads_parser)]`.
pub fn num_threads_parser(arg: &str) -> Result<usize> {
    let num_threads = arg.parse::<usize>()?;
    ensure!(num_threads > 0, "Number of threads must be greater than 0");
    Ok(num_threads)
}

/// Shared CLI arguments for commands that specify a number of threads.
#[derive(Args, Debug)]
pub struct NumThreadsArg {
    #[arg(short = 'j', long, default_value_t = rayon::current_num_threads().max(1), value_parser = num_threads_parser)]
    /// The number of threads to use.
    pub num_threads: usize,
}

/// Shared CLI arguments for commands that specify a granularity.
#[derive(Args, Debug)]
pub struct GranularityArgs {
    #[arg(long, conflicts_with("node_granularity"))]
    /// The tentative number of arcs used to define the size of a parallel job
    /// (advanced option).
    pub arc_granularity: Option<u64>,

    #[arg(long, conflicts_with("arc_granularity"))]
    /// The tentative number of nodes used to define the size of a parallel job
    /// (advanced option).
    pub node_granularity: Option<usize>,
}

impl GranularityArgs {
    pub fn into_granularity(&self) -> Granularity {
        match (self.arc_granularity, self.node_granularity) {
            (Some(_), Some(_)) => unreachable!(),
            (Some(arc_granularity), None) => Granularity::Arcs(arc_granularity),
            (None, Some(node_granularity)) => Granularity::Nodes(node_granularity),
            (None, None) => Granularity::default(),
        }
    }
}

/// Parses a fraction of the nodes from a string.
pub fn fraction_parser(arg: &str) -> Result<f64> {
    let fraction = arg.parse::<f64>()?;
    ensure!(
        fraction.is_finite() && fraction >= 0.0,
        "The fraction must be a non-negative number"
    );
    Ok(fraction)
}

/// Shared CLI arguments for commands that specify the threshold of a hybrid
/// visit.
#[derive(Args, Debug)]
pub struct ThresholdArgs {
    #[arg(long, conflicts_with("threshold_fraction"))]
    /// Switch to bottom-up when the frontier contains at least this number of
    /// nodes.
    pub threshold_nodes: Option<usize>,

    #[arg(long, conflicts_with("threshold_nodes"), value_parser = fraction_parser)]
    /// Switch to bottom-up when the frontier contains at least this fraction
    /// of the nodes (default: 0.05).
    pub threshold_fraction: Option<f64>,
}

impl ThresholdArgs {
    pub fn into_threshold(&self) -> Threshold {
        match (self.threshold_nodes, self.threshold_fraction) {
            (Some(_), Some(_)) => unreachable!(),
            (Some(nodes), None) => Threshold::Nodes(nodes),
            (None, Some(fraction)) => Threshold::Fraction(fraction),
            (None, None) => Threshold::default(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
/// The direction-choosing strategy of a visit.
pub enum PrivStrategy {
    /// Always scan the successors of the frontier.
    TopDown,
    /// Always scan the predecessors of undiscovered nodes.
    BottomUp,
    /// Choose at each level depending on the size of the frontier.
    Hybrid,
}

impl PrivStrategy {
    pub fn into_strategy(self, threshold: Threshold) -> Strategy {
        match self {
            PrivStrategy::TopDown => Strategy::TopDown,
            PrivStrategy::BottomUp => Strategy::BottomUp,
            PrivStrategy::Hybrid => Strategy::Hybrid(threshold),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
/// How to store vectors of distances.
pub enum IntVectorFormat {
    /// Java-compatible format: a sequence of big-endian longs (64 bits).
    Java,
    /// A sequence of little-endian 32-bit signed integers, like the binary
    /// graph format.
    Binary,
    /// ASCII format, one integer per line.
    Ascii,
    /// A JSON Array.
    Json,
}

impl IntVectorFormat {
    /// Stores a vector of `isize` in the specified `path` using the format
    /// defined by `self`.
    pub fn store(&self, path: impl AsRef<Path>, data: &[isize]) -> Result<()> {
        // Ensure the parent directory exists
        create_parent_dir(&path)?;
        let path = path.as_ref();
        let path_display = path.display();

        let file = std::fs::File::create(path)
            .with_context(|| format!("Could not create vector at {}", path_display))?;
        let mut buf = BufWriter::new(file);

        match self {
            IntVectorFormat::Java => {
                log::info!("Storing in Java format at {}", path_display);
                for &word in data {
                    buf.write_all(&(word as i64).to_be_bytes())
                        .with_context(|| format!("Could not write vector to {}", path_display))?;
                }
            }
            IntVectorFormat::Binary => {
                log::info!("Storing in binary format at {}", path_display);
                for (index, &word) in data.iter().enumerate() {
                    let word = i32::try_from(word).map_err(|_| {
                        anyhow!("Value {word} at index {index} does not fit in 32 bits")
                    })?;
                    buf.write_all(&word.to_le_bytes())
                        .with_context(|| format!("Could not write vector to {}", path_display))?;
                }
            }
            IntVectorFormat::Ascii => {
                log::info!("Storing in ASCII format at {}", path_display);
                for word in data {
                    writeln!(buf, "{}", word)
                        .with_context(|| format!("Could not write vector to {}", path_display))?;
                }
            }
            IntVectorFormat::Json => {
                log::info!("Storing in JSON format at {}", path_display);
                write!(buf, "[")?;
                for word in data.iter().take(data.len().saturating_sub(1)) {
                    write!(buf, "{}, ", word)
                        .with_context(|| format!("Could not write vector to {}", path_display))?;
                }
                if let Some(last) = data.last() {
                    write!(buf, "{}", last)
                        .with_context(|| format!("Could not write vector to {}", path_display))?;
                }
                write!(buf, "]")?;
            }
        };

        buf.flush()
            .with_context(|| format!("Could not flush {}", path_display))?;
        Ok(())
    }
}

/// Creates a [`ThreadPool`](rayon::ThreadPool) with the given number of threads.
pub fn get_thread_pool(num_threads: usize) -> rayon::ThreadPool {
    let thread_pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .expect("Failed to create thread pool");
    log::info!("Using {} threads", thread_pool.current_num_threads());
    thread_pool
}

/// Creates all parent directories of the given file path.
pub fn create_parent_dir(file_path: impl AsRef<Path>) -> Result<()> {
    if let Some(parent_dir) = file_path.as_ref().parent() {
        std::fs::create_dir_all(parent_dir).with_context(|| {
            format!(
                "Failed to create the directory {:?}",
                parent_dir.to_string_lossy()
            )
        })?;
    }
    Ok(())
}

/// Parses a duration from a string.
/// For compatibility with Java, if no suffix is given, it is assumed to be in milliseconds.
/// You can use suffixes, the available ones are:
/// - `s` for seconds
/// - `m` for minutes
/// - `h` for hours
/// - `d` for days
///
/// Example: `1d2h3m4s567` this is parsed as: 1 day, 2 hours, 3 minutes, 4 seconds, and 567 milliseconds.
fn parse_duration(value: &str) -> Result<Duration> {
    if value.is_empty() {
        bail!("Empty duration string, if you want every 0 milliseconds use `0`.");
    }
    let mut duration = Duration::from_secs(0);
    let mut acc = String::new();
    for c in value.chars() {
        if c.is_ascii_digit() {
            acc.push(c);
        } else if c.is_whitespace() {
            continue;
        } else {
            let dur = acc.parse::<u64>()?;
            match c {
                's' => duration += Duration::from_secs(dur),
                'm' => duration += Duration::from_secs(dur * 60),
                'h' => duration += Duration::from_secs(dur * 60 * 60),
                'd' => duration += Duration::from_secs(dur * 60 * 60 * 24),
                _ => return Err(anyhow!("Invalid duration suffix: {}", c)),
            }
            acc.clear();
        }
    }
    if !acc.is_empty() {
        let dur = acc.parse::<u64>()?;
        duration += Duration::from_millis(dur);
    }
    Ok(duration)
}

/// Initializes the `env_logger` logger with a custom format including
/// timestamps with elapsed time since initialization.
pub fn init_env_logger() -> Result<()> {
    use jiff::fmt::friendly::{Designator, Spacing, SpanPrinter};
    use jiff::SpanRound;

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    let start = std::time::Instant::now();
    let printer = SpanPrinter::new()
        .spacing(Spacing::None)
        .designator(Designator::Compact);
    let span_round = SpanRound::new()
        .largest(jiff::Unit::Day)
        .smallest(jiff::Unit::Millisecond)
        .days_are_24_hours();

    builder.format(move |buf, record| {
        let Ok(ts) = jiff::Timestamp::try_from(SystemTime::now()) else {
            return Err(std::io::Error::other("Failed to get timestamp"));
        };
        let style = buf.default_level_style(record.level());
        let elapsed = start.elapsed();
        let span = jiff::Span::new()
            .seconds(elapsed.as_secs() as i64)
            .milliseconds(elapsed.subsec_millis() as i64);
        let Ok(span) = span.round(span_round) else {
            return Err(std::io::Error::other("Failed to round span"));
        };
        writeln!(
            buf,
            "{} {} {style}{}{style:#} [{:?}] {} - {}",
            ts.strftime("%F %T%.3f"),
            printer.span_to_string(&span),
            record.level(),
            std::thread::current().id(),
            record.target(),
            record.args()
        )
    });
    builder.try_init()?;
    Ok(())
}

#[derive(Args, Debug)]
pub struct GlobalArgs {
    #[arg(long, value_parser = parse_duration, global=true, display_order = 1000)]
    /// How often to log progress. Default is 10s. You can use the suffixes "s"
    /// for seconds, "m" for minutes, "h" for hours, and "d" for days. If no
    /// suffix is provided it is assumed to be in milliseconds.
    /// Example: "1d2h3m4s567" is parsed as 1 day + 2 hours + 3 minutes + 4
    /// seconds + 567 milliseconds = 93784567 milliseconds.
    pub log_interval: Option<Duration>,
}

#[derive(Subcommand, Debug)]
pub enum SubCommands {
    Run(run::CliArgs),
    Check(check::CliArgs),
    Convert(convert::CliArgs),
}

#[derive(Parser, Debug)]
#[command(name = "dobfs", version=build_info::version_string())]
/// Direction-optimizing parallel breadth-first visits.
///
/// Noteworthy environment variables:
///
/// - RUST_LOG: configuration for env_logger
///   <https://docs.rs/env_logger/latest/env_logger/>
///
/// - RAYON_NUM_THREADS: the default number of threads
pub struct Cli {
    #[command(subcommand)]
    pub command: SubCommands,
    #[clap(flatten)]
    pub args: GlobalArgs,
}

pub mod check;
pub mod convert;
pub mod run;

/// The entry point of the command-line interface.
pub fn cli_main<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let start = std::time::Instant::now();
    let cli = Cli::parse_from(args);
    match cli.command {
        SubCommands::Run(args) => {
            run::main(cli.args, args)?;
        }
        SubCommands::Check(args) => {
            check::main(cli.args, args)?;
        }
        SubCommands::Convert(args) => {
            convert::main(cli.args, args)?;
        }
    }

    log::info!(
        "The command took {}",
        pretty_print_elapsed(start.elapsed().as_secs_f64())
    );

    Ok(())
}

/// Pretty-prints seconds in a human-readable format.
fn pretty_print_elapsed(elapsed: f64) -> String {
    let mut result = String::new();
    let mut elapsed_seconds = elapsed as u64;
    let weeks = elapsed_seconds / (60 * 60 * 24 * 7);
    elapsed_seconds %= 60 * 60 * 24 * 7;
    let days = elapsed_seconds / (60 * 60 * 24);
    elapsed_seconds %= 60 * 60 * 24;
    let hours = elapsed_seconds / (60 * 60);
    elapsed_seconds %= 60 * 60;
    let minutes = elapsed_seconds / 60;

    match weeks {
        0 => {}
        1 => result.push_str("1 week "),
        _ => result.push_str(&format!("{} weeks ", weeks)),
    }
    match days {
        0 => {}
        1 => result.push_str("1 day "),
        _ => result.push_str(&format!("{} days ", days)),
    }
    match hours {
        0 => {}
        1 => result.push_str("1 hour "),
        _ => result.push_str(&format!("{} hours ", hours)),
    }
    match minutes {
        0 => {}
        1 => result.push_str("1 minute "),
        _ => result.push_str(&format!("{} minutes ", minutes)),
    }

    result.push_str(&format!("{:.3} seconds ({}s)", elapsed % 60.0, elapsed));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_duration() -> Result<()> {
        assert_eq!(parse_duration("1500")?, Duration::from_millis(1500));
        assert_eq!(parse_duration("10s")?, Duration::from_secs(10));
        assert_eq!(
            parse_duration("1d2h3m4s567")?,
            Duration::from_millis(93_784_567)
        );
        assert!(parse_duration("").is_err());
        assert!(parse_duration("3x").is_err());
        Ok(())
    }

    #[test]
    fn test_pretty_print_elapsed() {
        assert_eq!(pretty_print_elapsed(1.5), "1.500 seconds (1.5s)");
        assert_eq!(
            pretty_print_elapsed(3723.0),
            "1 hour 2 minutes 3.000 seconds (3723s)"
        );
    }

    #[test]
    fn test_threshold_args() -> Result<()> {
        let cli = Cli::try_parse_from(["dobfs", "run", "g.bin", "--threshold-nodes", "10"])?;
        let SubCommands::Run(args) = cli.command else {
            panic!("Expected the run subcommand");
        };
        assert_eq!(args.threshold.into_threshold(), Threshold::Nodes(10));
        assert_eq!(
            args.strategy.into_strategy(args.threshold.into_threshold()),
            Strategy::Hybrid(Threshold::Nodes(10))
        );

        assert!(Cli::try_parse_from([
            "dobfs",
            "run",
            "g.bin",
            "--threshold-nodes",
            "10",
            "--threshold-fraction",
            "0.1"
        ])
        .is_err());
        assert!(
            Cli::try_parse_from(["dobfs", "run", "g.bin", "--threshold-fraction", "-1"]).is_err()
        );
        assert!(Cli::try_parse_from(["dobfs", "run", "g.bin", "-j", "0"]).is_err());
        Ok(())
    }

    mod int_vector_format {
        use super::*;

        #[test]
        fn test_ascii() -> Result<()> {
            let dir = tempfile::tempdir()?;
            let path = dir.path().join("test.txt");
            let data = [0, 1, -1, 30];
            IntVectorFormat::Ascii.store(&path, &data)?;
            let content = std::fs::read_to_string(&path)?;
            let lines: Vec<isize> = content
                .lines()
                .map(|l| l.trim().parse())
                .collect::<Result<_, _>>()?;
            assert_eq!(lines, data);
            Ok(())
        }

        #[test]
        fn test_json() -> Result<()> {
            let dir = tempfile::tempdir()?;
            let path = dir.path().join("test.json");
            let data = [0, 2, -1];
            IntVectorFormat::Json.store(&path, &data)?;
            let content = std::fs::read_to_string(&path)?;
            assert_eq!(content, "[0, 2, -1]");
            let parsed: Vec<isize> = serde_json::from_str(&content)?;
            assert_eq!(parsed, data);

            IntVectorFormat::Json.store(&path, &[])?;
            assert_eq!(std::fs::read_to_string(&path)?, "[]");
            Ok(())
        }

        #[test]
        fn test_java() -> Result<()> {
            let dir = tempfile::tempdir()?;
            let path = dir.path().join("test.bin");
            let data = [1, -1, 65535];
            IntVectorFormat::Java.store(&path, &data)?;
            let bytes = std::fs::read(&path)?;
            assert_eq!(bytes.len(), 3 * 8);
            for (chunk, &expected) in bytes.chunks_exact(8).zip(&data) {
                let chunk: [u8; 8] = chunk.try_into()?;
                assert_eq!(i64::from_be_bytes(chunk), expected as i64);
            }
            Ok(())
        }

        #[test]
        fn test_binary() -> Result<()> {
            let dir = tempfile::tempdir()?;
            let path = dir.path().join("test.bin");
            let data = [0, -1, 7];
            IntVectorFormat::Binary.store(&path, &data)?;
            let bytes = std::fs::read(&path)?;
            assert_eq!(bytes.len(), 3 * 4);
            for (chunk, &expected) in bytes.chunks_exact(4).zip(&data) {
                let chunk: [u8; 4] = chunk.try_into()?;
                assert_eq!(i32::from_le_bytes(chunk), expected as i32);
            }
            Ok(())
        }

        #[cfg(target_pointer_width = "64")]
        #[test]
        fn test_binary_overflow() -> Result<()> {
            let dir = tempfile::tempdir()?;
            let path = dir.path().join("test.bin");
            assert!(IntVectorFormat::Binary
                .store(&path, &[0, 1 << 40])
                .is_err());
            Ok(())
        }

        #[test]
        fn test_creates_parent_dirs() -> Result<()> {
            let dir = tempfile::tempdir()?;
            let path = dir.path().join("a").join("b").join("test.txt");
            IntVectorFormat::Ascii.store(&path, &[1])?;
            assert!(path.exists());
            Ok(())
        }
    }
}
