//! Seeded synthetic inputs for tests and benches. Cases are built on 0-based
//! ids and shifted to the graph's 1-based numbering in [`finish`].

use std::collections::HashSet;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::graph::DirectedGraph;

const C_MAX: u64 = 1_000_000;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum GraphCase {
    SparseRandom,
    DenseRandom,
    DenseZero,
    AlmostLine,
    GridRandom,
    /// Hub fanning out to every vertex with heavy arcs, then a light chain
    /// that improves each of them in turn.
    DecreaseKeyHeavy,
    Disconnected,
}

impl GraphCase {
    pub const ALL: [GraphCase; 7] = [
        GraphCase::SparseRandom,
        GraphCase::DenseRandom,
        GraphCase::DenseZero,
        GraphCase::AlmostLine,
        GraphCase::GridRandom,
        GraphCase::DecreaseKeyHeavy,
        GraphCase::Disconnected,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::SparseRandom => "sparse_random",
            Self::DenseRandom => "dense_random",
            Self::DenseZero => "dense_zero",
            Self::AlmostLine => "almost_line",
            Self::GridRandom => "grid_random",
            Self::DecreaseKeyHeavy => "decrease_key_heavy",
            Self::Disconnected => "disconnected",
        }
    }
}

#[derive(Clone, Debug)]
pub struct GeneratedGraph {
    pub graph: DirectedGraph,
    pub source: usize,
    pub target: usize,
}

pub fn generate_case(case: GraphCase, size: usize, seed: u64) -> GeneratedGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    match case {
        GraphCase::SparseRandom => sparse_random_case(&mut rng, size.max(32), 4),
        GraphCase::DenseRandom => dense_case(&mut rng, size.max(256), false),
        GraphCase::DenseZero => dense_case(&mut rng, size.max(256), true),
        GraphCase::AlmostLine => almost_line_case(&mut rng, size.max(64)),
        GraphCase::GridRandom => grid_random_case(&mut rng, size.max(256)),
        GraphCase::DecreaseKeyHeavy => decrease_key_heavy_case(&mut rng, size.max(16)),
        GraphCase::Disconnected => disconnected_case(&mut rng, size.max(32)),
    }
}

fn sparse_random_case(rng: &mut StdRng, n: usize, edge_factor: usize) -> GeneratedGraph {
    let m_target = n.saturating_mul(edge_factor).min(complete_edges(n));
    let mut edges = Vec::with_capacity(m_target);
    let mut used = HashSet::with_capacity(m_target * 2 + 1);

    while edges.len() < m_target {
        let u = rng.random_range(0..n);
        let v = rng.random_range(0..n);
        push_unique_edge(&mut edges, &mut used, u, v, rng.random_range(0..=C_MAX));
    }

    let (source, target) = distinct_pair(rng, n);
    finish(n, edges, source, target)
}

fn dense_case(rng: &mut StdRng, size: usize, zero: bool) -> GeneratedGraph {
    let n = floor_sqrt(size).max(8);
    let mut edges = Vec::with_capacity(complete_edges(n));

    for u in 0..n {
        for v in 0..n {
            if u == v {
                continue;
            }
            let w = if zero { 0 } else { rng.random_range(0..=C_MAX) };
            edges.push((u as u32, v as u32, w));
        }
    }

    let (source, target) = distinct_pair(rng, n);
    finish(n, edges, source, target)
}

fn almost_line_case(rng: &mut StdRng, n: usize) -> GeneratedGraph {
    let mut edges = Vec::with_capacity(n * 2);
    let mut used = HashSet::with_capacity(n * 4);

    for i in 0..(n - 1) {
        push_unique_edge(&mut edges, &mut used, i, i + 1, rng.random_range(0..=C_MAX));
    }

    let m_target = n.saturating_mul(2).min(complete_edges(n));
    while edges.len() < m_target {
        let a = rng.random_range(0..(n - 2));
        let b = (a + rng.random_range(2..=3)).min(n - 1);
        let (u, v) = if rng.random_bool(0.5) { (b, a) } else { (a, b) };
        push_unique_edge(&mut edges, &mut used, u, v, rng.random_range(0..=C_MAX));
    }

    let mut perm: Vec<usize> = (0..n).collect();
    perm.shuffle(rng);
    for edge in &mut edges {
        edge.0 = perm[edge.0 as usize] as u32;
        edge.1 = perm[edge.1 as usize] as u32;
    }
    edges.shuffle(rng);
    finish(n, edges, perm[0], perm[n - 1])
}

fn grid_random_case(rng: &mut StdRng, size: usize) -> GeneratedGraph {
    let len = floor_sqrt(size).max(4);
    let n = len * len;
    let index = |i: usize, j: usize| (i * len + j) as u32;
    let mut edges = Vec::with_capacity(n * 4);

    for i in 0..len {
        for j in 0..len {
            let mut neighbours = Vec::with_capacity(4);
            if j + 1 < len {
                neighbours.push(index(i, j + 1));
            }
            if i + 1 < len {
                neighbours.push(index(i + 1, j));
            }
            if j > 0 {
                neighbours.push(index(i, j - 1));
            }
            if i > 0 {
                neighbours.push(index(i - 1, j));
            }
            for to in neighbours {
                edges.push((index(i, j), to, rng.random_range(0..=C_MAX)));
            }
        }
    }

    edges.shuffle(rng);
    let (source, target) = distinct_pair(rng, n);
    finish(n, edges, source, target)
}

fn decrease_key_heavy_case(rng: &mut StdRng, n: usize) -> GeneratedGraph {
    let mut edges = Vec::with_capacity(n * 2);
    for v in 1..n {
        edges.push((0, v as u32, C_MAX - v as u64));
    }
    for v in 1..(n - 1) {
        edges.push((v as u32, (v + 1) as u32, rng.random_range(0..=2)));
    }
    edges.push((0, 1, 0));
    edges.shuffle(rng);
    finish(n, edges, 0, n - 1)
}

fn disconnected_case(rng: &mut StdRng, n: usize) -> GeneratedGraph {
    let half = n / 2;
    let mut edges = Vec::new();
    let mut used = HashSet::new();

    for _ in 0..half * 3 {
        let u = rng.random_range(0..half);
        let v = rng.random_range(0..half);
        push_unique_edge(&mut edges, &mut used, u, v, rng.random_range(0..=C_MAX));
        let u = rng.random_range(half..n);
        let v = rng.random_range(half..n);
        push_unique_edge(&mut edges, &mut used, u, v, rng.random_range(0..=C_MAX));
    }

    let source = rng.random_range(0..half);
    let target = rng.random_range(half..n);
    finish(n, edges, source, target)
}

fn finish(n: usize, mut edges: Vec<(u32, u32, u64)>, source: usize, target: usize) -> GeneratedGraph {
    for edge in &mut edges {
        edge.0 += 1;
        edge.1 += 1;
    }
    GeneratedGraph {
        graph: DirectedGraph::from_edges(n, &edges),
        source: source + 1,
        target: target + 1,
    }
}

fn distinct_pair(rng: &mut StdRng, n: usize) -> (usize, usize) {
    let source = rng.random_range(0..n);
    let mut target = rng.random_range(0..n);
    if source == target {
        target = (target + 1) % n;
    }
    (source, target)
}

#[inline]
fn complete_edges(n: usize) -> usize {
    n.saturating_mul(n.saturating_sub(1))
}

#[inline]
fn floor_sqrt(value: usize) -> usize {
    (value as f64).sqrt().floor() as usize
}

#[inline]
fn push_unique_edge(
    edges: &mut Vec<(u32, u32, u64)>,
    used: &mut HashSet<u64>,
    u: usize,
    v: usize,
    weight: u64,
) -> bool {
    if u == v {
        return false;
    }
    let key = ((u as u64) << 32) | v as u64;
    if used.insert(key) {
        edges.push((u as u32, v as u32, weight));
        true
    } else {
        false
    }
}
