// Technology Diffusion Simulation Suite ("The Ladder") - Invariant Audit

use crate::distance::{self, UNREACHABLE};
use crate::graph::TechGraph;
use crate::types::Agent;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Invariant violations. These indicate a programming defect, not a bad run:
/// downstream statistics would be meaningless, so the driver aborts on them
/// instead of correcting silently.
#[derive(Debug, thiserror::Error)]
pub enum InvariantError {
    #[error("adopter conservation violated at tick {tick}: {counted} adopters recorded across technologies, population is {population}")]
    AdopterConservation { tick: u64, counted: u64, population: u64 },

    #[error("adopter count drift at tick {tick}: technology {technology} records {recorded} adopters, agents say {actual}")]
    AdopterCountDrift { tick: u64, technology: u32, recorded: u32, actual: u32 },

    #[error("derivation graph disconnected at tick {tick}: {reachable} of {total} technologies reachable from the seed")]
    Disconnected { tick: u64, reachable: usize, total: usize },
}

// ---------------------------------------------------------------------------
// Tick-level audit
// ---------------------------------------------------------------------------

/// Verify the structural invariants after a completed tick:
/// adopter counts sum to the population size and match the agent assignments
/// technology by technology, and the derivation graph stays connected when
/// edges are treated as undirected.
pub fn verify_tick(graph: &TechGraph, agents: &[Agent], tick: u64) -> Result<(), InvariantError> {
    let counted: u64 = graph.nodes().iter().map(|t| t.adopters as u64).sum();
    if counted != agents.len() as u64 {
        return Err(InvariantError::AdopterConservation {
            tick,
            counted,
            population: agents.len() as u64,
        });
    }

    let mut actual = vec![0u32; graph.len()];
    for agent in agents {
        actual[agent.technology as usize] += 1;
    }
    for tech in graph.nodes() {
        if tech.adopters != actual[tech.id as usize] {
            return Err(InvariantError::AdopterCountDrift {
                tick,
                technology: tech.id,
                recorded: tech.adopters,
                actual: actual[tech.id as usize],
            });
        }
    }

    let dist = distance::distances_from(graph, 0);
    let reachable = dist.iter().filter(|&&d| d != UNREACHABLE).count();
    if reachable != graph.len() {
        return Err(InvariantError::Disconnected { tick, reachable, total: graph.len() });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
