// Technology Diffusion Simulation Suite ("The Ladder") - Technology Graph Store

use serde::{Deserialize, Serialize};

use crate::types::{Agent, DerivationEdge, TechId, Technology};

/// Append-only arena of technologies and derivation edges.
///
/// Nodes are keyed by their position in `nodes` (equal to their `TechId`),
/// so existence checks and adjacency walks are O(1) index lookups while the
/// graph grows. Nothing is ever removed; a technology whose adopter count
/// drops to zero stays in the graph as an ancestor and routing node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechGraph {
    nodes: Vec<Technology>,
    edges: Vec<DerivationEdge>,
}

impl TechGraph {
    /// Create a graph holding only the seed technology: quality 0, no parents.
    pub fn seeded() -> Self {
        Self {
            nodes: vec![Technology {
                id: 0,
                quality: 0,
                adopters: 0,
                parents: Vec::new(),
                children: Vec::new(),
                created_tick: 0,
            }],
            edges: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, id: TechId) -> &Technology {
        &self.nodes[id as usize]
    }

    pub fn nodes(&self) -> &[Technology] {
        &self.nodes
    }

    pub fn edges(&self) -> &[DerivationEdge] {
        &self.edges
    }

    /// Parent and child ids of `id` — the undirected adjacency used for
    /// distance routing.
    pub fn undirected_neighbors(&self, id: TechId) -> impl Iterator<Item = TechId> + '_ {
        let node = &self.nodes[id as usize];
        node.parents.iter().chain(node.children.iter()).copied()
    }

    /// Derive a new technology from `parents` (must be non-empty; the seed is
    /// the only parentless node and exists from setup).
    ///
    /// Quality is `1 + max(parent qualities)`; one derivation edge is recorded
    /// per parent. Returns the new node's id.
    pub fn add_technology(&mut self, parents: &[TechId], tick: u64) -> TechId {
        debug_assert!(!parents.is_empty(), "non-seed technology needs parents");
        let id = self.nodes.len() as TechId;
        let quality = 1 + parents
            .iter()
            .map(|&p| self.nodes[p as usize].quality)
            .max()
            .unwrap_or(0);

        for &p in parents {
            self.nodes[p as usize].children.push(id);
            self.edges.push(DerivationEdge { from: p, to: id, created_tick: tick });
        }
        self.nodes.push(Technology {
            id,
            quality,
            adopters: 0,
            parents: parents.to_vec(),
            children: Vec::new(),
            created_tick: tick,
        });
        id
    }

    /// Place an agent on its first technology at setup (increment only).
    pub fn place_initial(&mut self, agent: &mut Agent, tech: TechId) {
        agent.technology = tech;
        self.nodes[tech as usize].adopters += 1;
    }

    /// The shared adoption primitive: decrement the old technology's adopter
    /// count, reassign the agent, increment the new one's. Used by both the
    /// innovation stage (migration) and the decision stage (switching).
    pub fn transfer(&mut self, agent: &mut Agent, to: TechId) {
        let from = agent.technology;
        if from == to {
            return;
        }
        self.nodes[from as usize].adopters -= 1;
        self.nodes[to as usize].adopters += 1;
        agent.technology = to;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
