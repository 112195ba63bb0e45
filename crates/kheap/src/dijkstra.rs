use tracing::debug;

use crate::INF;
use crate::error::{Error, Result};
use crate::graph::DirectedGraph;
use crate::heap::KaryHeap;
use crate::observer::HeapObserver;

/// Distance from `source` to `target`, `None` when `target` is unreachable.
///
/// Weights must be non-negative for the answer to be minimal; the search
/// stops as soon as `target` leaves the heap.
pub fn shortest_distance(
    graph: &DirectedGraph,
    source: usize,
    target: usize,
    arity: usize,
) -> Result<Option<u64>> {
    shortest_distance_with(graph, source, target, arity, ())
}

/// [`shortest_distance`] with an observer attached to the heap.
pub fn shortest_distance_with<O: HeapObserver>(
    graph: &DirectedGraph,
    source: usize,
    target: usize,
    arity: usize,
    observer: O,
) -> Result<Option<u64>> {
    check_vertex(graph, source)?;
    check_vertex(graph, target)?;

    let mut heap = KaryHeap::with_observer(graph.vertex_count() + 1, arity, observer)?;
    debug!(source, destination = target, arity, "starting search");
    let found = search(graph, &mut heap, source, Some(target))?;
    match found {
        Some(d) => debug!(destination = target, distance = d, "destination finalized"),
        None => debug!(destination = target, "destination unreachable"),
    }
    Ok(found)
}

/// Distances from `source` to every vertex, indexed by vertex id.
/// Slot 0 and unreachable vertices hold [`INF`]; a path whose length would
/// reach [`INF`] is reported as [`Error::DistanceOverflow`].
pub fn distances_from(graph: &DirectedGraph, source: usize, arity: usize) -> Result<Vec<u64>> {
    check_vertex(graph, source)?;

    let n = graph.vertex_count();
    let mut heap = KaryHeap::new(n + 1, arity)?;
    search(graph, &mut heap, source, None)?;
    Ok((0..=n).map(|v| heap.distance(v)).collect())
}

fn check_vertex(graph: &DirectedGraph, v: usize) -> Result<()> {
    if graph.contains_vertex(v) {
        Ok(())
    } else {
        Err(Error::VertexOutOfRange {
            vertex: v,
            limit: graph.vertex_count() + 1,
        })
    }
}

fn search<O: HeapObserver>(
    graph: &DirectedGraph,
    heap: &mut KaryHeap<O>,
    source: usize,
    target: Option<usize>,
) -> Result<Option<u64>> {
    let mut finalized = vec![false; graph.vertex_count() + 1];

    heap.set_distance(source, 0)?;
    heap.insert(source)?;

    while !heap.is_empty() {
        let v = heap.extract_min()?;
        finalized[v] = true;
        let dv = heap.distance(v);
        if target == Some(v) {
            return Ok(Some(dv));
        }

        for edge in graph.out_edges(v) {
            let u = edge.to as usize;
            if finalized[u] {
                continue;
            }
            let cand = match dv.checked_add(edge.weight) {
                Some(c) if c < INF => c,
                _ => return Err(Error::DistanceOverflow { vertex: u }),
            };
            if !heap.contains(u) {
                heap.set_distance(u, cand)?;
                heap.insert(u)?;
            } else if cand < heap.distance(u) {
                heap.update(u, cand)?;
            }
        }
    }

    Ok(None)
}
