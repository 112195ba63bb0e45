//! Reader for DIMACS shortest-path (`.gr`) input.
//!
//! Everything before the `p sp <n> <m>` problem line is ignored. The `m`
//! lines that follow are scanned, and those starting with `a ` become arcs
//! `a <u> <v> <w>`; other lines in that window (comments, blanks) are skipped
//! but still count toward `m`.
//!
//! Arc weights are capped at `(INF - 1) / n` so that no simple path can reach
//! the [`INF`] sentinel.

use std::io::BufRead;

use tracing::{debug, warn};

use crate::INF;
use crate::error::{Error, Result};
use crate::graph::DirectedGraph;

pub fn parse_graph(text: &str) -> Result<DirectedGraph> {
    read_graph(text.as_bytes())
}

pub fn read_graph<R: BufRead>(reader: R) -> Result<DirectedGraph> {
    let mut lines = reader.lines();
    let mut line_no = 0_usize;

    let (n, m) = loop {
        let Some(line) = lines.next() else {
            return Err(Error::Parse {
                line: line_no,
                message: "missing `p sp` problem line".to_string(),
            });
        };
        let line = line.map_err(|e| Error::Io(e.to_string()))?;
        line_no += 1;
        if line.starts_with("p sp") {
            break parse_problem(&line, line_no)?;
        }
    };
    debug!(vertices = n, arcs = m, "read problem line");

    // `m` comes from the header; don't trust it for the allocation.
    let mut edges = Vec::with_capacity(m.min(MAX_PREALLOCATED_ARCS));
    for scanned in 0..m {
        let Some(line) = lines.next() else {
            warn!(expected = m, scanned, "input ended before the arc section did");
            break;
        };
        let line = line.map_err(|e| Error::Io(e.to_string()))?;
        line_no += 1;
        if line.starts_with("a ") {
            edges.push(parse_arc(&line, line_no, n)?);
        }
    }

    if edges.len() != m {
        debug!(declared = m, parsed = edges.len(), "arc count differs from problem line");
    }
    Ok(DirectedGraph::from_edges(n, &edges))
}

const MAX_PREALLOCATED_ARCS: usize = 1 << 20;

fn parse_problem(line: &str, line_no: usize) -> Result<(usize, usize)> {
    let mut tokens = line.split_whitespace().skip(2);
    let n = parse_token(tokens.next(), "vertex count", line_no)?;
    let m = parse_token(tokens.next(), "arc count", line_no)?;
    if n > u32::MAX as usize {
        return Err(Error::Parse {
            line: line_no,
            message: format!("vertex count {n} does not fit 32-bit ids"),
        });
    }
    Ok((n, m))
}

fn parse_arc(line: &str, line_no: usize, n: usize) -> Result<(u32, u32, u64)> {
    let mut tokens = line.split_whitespace().skip(1);
    let u: usize = parse_token(tokens.next(), "arc tail", line_no)?;
    let v: usize = parse_token(tokens.next(), "arc head", line_no)?;

    let w = tokens.next();
    if let Some(raw) = w.filter(|t| t.starts_with('-')) {
        return Err(Error::NegativeWeight {
            line: line_no,
            weight: raw.to_string(),
        });
    }
    let w: u64 = parse_token(w, "arc weight", line_no)?;
    let max_weight = (INF - 1) / (n.max(1) as u64);
    if w > max_weight {
        return Err(Error::Parse {
            line: line_no,
            message: format!("arc weight {w} exceeds {max_weight}"),
        });
    }

    for id in [u, v] {
        if !(1..=n).contains(&id) {
            return Err(Error::Parse {
                line: line_no,
                message: format!("vertex {id} outside 1..={n}"),
            });
        }
    }
    Ok((u as u32, v as u32, w))
}

fn parse_token<T: std::str::FromStr>(token: Option<&str>, what: &str, line: usize) -> Result<T> {
    let token = token.ok_or_else(|| Error::Parse {
        line,
        message: format!("missing {what}"),
    })?;
    token.parse().map_err(|_| Error::Parse {
        line,
        message: format!("invalid {what} `{token}`"),
    })
}
