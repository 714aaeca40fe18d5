// Technology Diffusion Simulation Suite ("The Ladder") - Distance Engine

use std::collections::VecDeque;

use crate::graph::TechGraph;
use crate::types::TechId;

/// Sentinel for technologies not reachable from the source. Distinguishable
/// from every real hop count; the connectivity invariant means it never
/// appears in practice, but callers must still handle it.
pub const UNREACHABLE: u32 = u32::MAX;

/// Breadth-first hop counts from `source` to every technology in the graph,
/// indexed by `TechId`. Derivation edges are walked in both directions with
/// unit weight; the source gets distance 0.
///
/// Recomputed on demand — the graph grows every tick, so no cached result
/// survives a tick boundary.
pub fn distances_from(graph: &TechGraph, source: TechId) -> Vec<u32> {
    let mut dist = vec![UNREACHABLE; graph.len()];
    dist[source as usize] = 0;

    let mut queue = VecDeque::new();
    queue.push_back(source);
    while let Some(current) = queue.pop_front() {
        let current_dist = dist[current as usize];
        for neighbor in graph.undirected_neighbors(current) {
            if dist[neighbor as usize] == UNREACHABLE {
                dist[neighbor as usize] = current_dist + 1;
                queue.push_back(neighbor);
            }
        }
    }
    dist
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
