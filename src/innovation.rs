// Technology Diffusion Simulation Suite ("The Ladder") - Innovation Engine

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::graph::TechGraph;
use crate::types::{Agent, TechId};

/// Run the per-tick innovation stage and return the number of recombination
/// events (new technologies with more than one parent) it produced.
///
/// Ordering contract: innovator flags for the whole population are sampled
/// first, one draw per agent in agent-id order, before any technology is
/// created. Groups are then processed in order of first appearance, so the
/// whole stage replays identically for a fixed seed.
pub fn run_innovation_stage(
    graph: &mut TechGraph,
    agents: &mut [Agent],
    recombination_enabled: bool,
    p_innovation: f64,
    tick: u64,
    rng: &mut ChaCha8Rng,
) -> u32 {
    // One Bernoulli draw per agent, every tick, flag reset included.
    for agent in agents.iter_mut() {
        agent.innovator = rng.gen::<f64>() < p_innovation;
    }

    // Distinct technologies occupied by innovators, first-appearance order.
    let mut occupied: Vec<TechId> = Vec::new();
    for agent in agents.iter() {
        if agent.innovator && !occupied.contains(&agent.technology) {
            occupied.push(agent.technology);
        }
    }
    if occupied.is_empty() {
        return 0;
    }

    let groups: Vec<Vec<TechId>> = if recombination_enabled {
        // One new technology synthesizes every occupied line.
        vec![occupied]
    } else {
        // Independent, parallel innovation lines — no merging.
        occupied.into_iter().map(|t| vec![t]).collect()
    };

    let mut recombinations = 0;
    for group in &groups {
        let new_tech = graph.add_technology(group, tick);
        if graph.node(new_tech).parents.len() > 1 {
            recombinations += 1;
        }
        // Every innovator whose line is in the group migrates — exactly once,
        // since each agent sits on exactly one technology.
        for agent in agents.iter_mut() {
            if agent.innovator && group.contains(&agent.technology) {
                graph.transfer(agent, new_tech);
            }
        }
    }
    recombinations
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
