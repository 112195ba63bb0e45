//! Baseline search on `std`'s binary heap with lazy deletion: stale entries
//! are pushed again instead of decreased and skipped when popped.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::INF;
use crate::error::{Error, Result};
use crate::graph::DirectedGraph;

/// Distances from `source`, indexed by vertex id, with [`INF`] in slot 0 and
/// for unreachable vertices. Fails when a path length reaches [`INF`].
pub fn dijkstra_binary_heap(graph: &DirectedGraph, source: usize) -> Result<Vec<u64>> {
    let n = graph.vertex_count();
    let mut dist = vec![INF; n + 1];
    if !graph.contains_vertex(source) {
        return Ok(dist);
    }

    let mut heap = BinaryHeap::new();
    dist[source] = 0;
    heap.push(Reverse((0_u64, source)));

    while let Some(Reverse((d, u))) = heap.pop() {
        if d != dist[u] {
            continue;
        }

        for edge in graph.out_edges(u) {
            let v = edge.to as usize;
            let cand = match d.checked_add(edge.weight) {
                Some(c) if c < INF => c,
                _ => return Err(Error::DistanceOverflow { vertex: v }),
            };
            if cand < dist[v] {
                dist[v] = cand;
                heap.push(Reverse((cand, v)));
            }
        }
    }

    Ok(dist)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_unreachable_cases() {
        let g = DirectedGraph::from_edges(6, &[(1, 2, 0), (2, 3, 0), (3, 4, 0), (5, 6, 7)]);
        let d = dijkstra_binary_heap(&g, 1).unwrap();
        assert_eq!(d, vec![INF, 0, 0, 0, 0, INF, INF]);
    }

    #[test]
    fn out_of_range_source_reaches_nothing() {
        let g = DirectedGraph::from_edges(2, &[(1, 2, 3)]);
        assert!(dijkstra_binary_heap(&g, 0).unwrap().iter().all(|&d| d == INF));
        assert!(dijkstra_binary_heap(&g, 3).unwrap().iter().all(|&d| d == INF));
    }

    #[test]
    fn huge_weight_is_an_error() {
        let g = DirectedGraph::from_edges(2, &[(1, 2, u64::MAX)]);
        assert_eq!(
            dijkstra_binary_heap(&g, 1),
            Err(Error::DistanceOverflow { vertex: 2 })
        );
    }
}
