use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use kheap::{DirectedGraph, Error, OperationCounter};
use tracing::info;

/// Shortest distance between two vertices of a DIMACS graph, computed with
/// Dijkstra's algorithm on a k-ary indexed heap. Prints `inf` when the
/// destination is unreachable.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Source vertex (1-based)
    source: usize,

    /// Destination vertex (1-based)
    destination: usize,

    /// Heap arity
    #[arg(default_value_t = 2, allow_negative_numbers = true)]
    k: i64,

    /// Read the graph from this file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Print heap operation counts after the distance
    #[arg(long, default_value_t = false)]
    counters: bool,

    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: tracing::Level,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(io::stderr)
        .init();

    let arity = arity(args.k)?;
    let graph = load_graph(args.input.as_ref())?;
    info!(
        vertices = graph.vertex_count(),
        arcs = graph.edge_count(),
        "graph loaded"
    );

    let mut counter = OperationCounter::new();
    let found = if args.counters {
        kheap::shortest_distance_with(&graph, args.source, args.destination, arity, &mut counter)
    } else {
        kheap::shortest_distance(&graph, args.source, args.destination, arity)
    };
    let distance = found.context("search failed")?;

    println!("{}", render(distance));
    if args.counters {
        print!("{}", counter.report(arity));
    }
    Ok(())
}

fn load_graph(path: Option<&PathBuf>) -> Result<DirectedGraph> {
    let graph = match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open {}", path.display()))?;
            kheap::dimacs::read_graph(BufReader::new(file))
        }
        None => kheap::dimacs::read_graph(io::stdin().lock()),
    };
    graph.context("invalid DIMACS input")
}

/// Heap arity from the signed command-line value; anything below 2 is rejected.
fn arity(k: i64) -> kheap::Result<usize> {
    match usize::try_from(k) {
        Ok(k) if k >= 2 => Ok(k),
        _ => Err(Error::InvalidArity(k)),
    }
}

fn render(distance: Option<u64>) -> String {
    distance.map_or_else(|| "inf".to_string(), |d| d.to_string())
}
