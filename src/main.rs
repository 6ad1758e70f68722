//! `fibsssp`: shortest distances from one vertex of a weighted graph

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use fibonacci_sssp::graph::GraphConfig;
use fibonacci_sssp::io::{SolveOptions, read_and_solve, write_distances};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Reads `n m` and `m` lines of `source target weight`, writes the distance
/// from the source to every vertex `1..=n` on one line.
#[derive(Debug, Parser)]
#[command(name = "fibsssp", version, about)]
struct Cli {
    /// Input file, `-` for stdin
    #[arg(default_value = "pathbgep.in")]
    input: PathBuf,

    /// Output file, `-` for stdout
    #[arg(default_value = "pathbgep.out")]
    output: PathBuf,

    /// Source vertex (1-based)
    #[arg(short, long, default_value_t = 1)]
    source: usize,

    /// Treat edges as one-way
    #[arg(short, long)]
    directed: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn open_input(path: &Path) -> Result<Box<dyn Read>> {
    if is_stdio(path) {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path).with_context(|| format!("failed to open input {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

fn open_output(path: &Path) -> Result<Box<dyn Write>> {
    if is_stdio(path) {
        return Ok(Box::new(io::stdout().lock()));
    }
    let file = File::create(path).with_context(|| format!("failed to create output {}", path.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}

fn run(cli: &Cli) -> Result<()> {
    let options = SolveOptions {
        source: cli.source,
        graph: GraphConfig {
            directed: cli.directed,
        },
    };
    debug!(?cli, "starting");

    let input = open_input(&cli.input)?;
    // The output file is only created once the input is known to be valid
    let (graph, paths) = read_and_solve(input, options)
        .with_context(|| format!("failed to solve {} from vertex {}", cli.input.display(), cli.source))?;

    let output = open_output(&cli.output)?;
    write_distances(output, &paths)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    info!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        settled = paths.settled(),
        "distances written"
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
