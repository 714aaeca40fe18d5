// Technology Diffusion Simulation Suite ("The Ladder") - Statistics Aggregator

use serde::{Deserialize, Serialize};

use crate::decision::utility;
use crate::graph::TechGraph;
use crate::types::{Agent, TickObservables};

/// Cumulative aggregates carried across ticks. Owned by the driver and
/// mutated only here, so the engine stays instantiable and testable without
/// process-wide globals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aggregates {
    pub entropy_accum: f64,
    pub cumulative_recombinations: u64,
    pub cumulative_transitions: u64,
    /// High-water mark of the population's minimum quality. Starts at -1,
    /// strictly below the seed quality, so the first qualifying tick counts.
    pub last_transition_quality: i64,
    /// One sample per tick: the floor advance, 0 on non-transition ticks.
    pub transition_sizes: Vec<i64>,
}

impl Default for Aggregates {
    fn default() -> Self {
        Self {
            entropy_accum: 0.0,
            cumulative_recombinations: 0,
            cumulative_transitions: 0,
            last_transition_quality: -1,
            transition_sizes: Vec::new(),
        }
    }
}

/// Shannon entropy (base 2) of the adopter distribution:
/// `H = log2(N) - (Σ n_i · log2(n_i)) / N` over non-zero counts.
/// Zero iff every agent shares one technology; at most `log2(N)`.
pub fn shannon_entropy(adopters_per_technology: &[u32], num_agents: u32) -> f64 {
    let n = num_agents as f64;
    let weighted: f64 = adopters_per_technology
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| c as f64 * (c as f64).log2())
        .sum();
    n.log2() - weighted / n
}

/// Aggregate one completed tick into observables, updating the cumulative
/// counters. Runs after both stages; enumerates agents in id order.
pub fn aggregate_tick(
    graph: &TechGraph,
    agents: &[Agent],
    externality_factor: f64,
    recombinations_this_tick: u32,
    tick: u64,
    aggregates: &mut Aggregates,
) -> TickObservables {
    let n = agents.len() as f64;

    let mut quality_min = f64::INFINITY;
    let mut quality_max = f64::NEG_INFINITY;
    let mut quality_sum = 0.0;
    let mut utility_min = f64::INFINITY;
    let mut utility_max = f64::NEG_INFINITY;
    let mut utility_sum = 0.0;

    for agent in agents {
        let tech = graph.node(agent.technology);
        let q = tech.quality as f64;
        let u = utility(tech, externality_factor);
        quality_min = quality_min.min(q);
        quality_max = quality_max.max(q);
        quality_sum += q;
        utility_min = utility_min.min(u);
        utility_max = utility_max.max(u);
        utility_sum += u;
    }

    let adopters_per_technology: Vec<u32> =
        graph.nodes().iter().map(|t| t.adopters).collect();
    let entropy = shannon_entropy(&adopters_per_technology, agents.len() as u32);
    aggregates.entropy_accum += entropy;
    aggregates.cumulative_recombinations += recombinations_this_tick as u64;

    // Transition detection: the quality floor strictly exceeded its last
    // recorded high-water mark.
    let min_quality = quality_min as i64;
    let transition_size = if min_quality > aggregates.last_transition_quality {
        let size = min_quality - aggregates.last_transition_quality;
        aggregates.cumulative_transitions += 1;
        aggregates.last_transition_quality = min_quality;
        size
    } else {
        0
    };
    aggregates.transition_sizes.push(transition_size);

    TickObservables {
        tick,
        num_technologies: graph.len(),
        num_edges: graph.num_edges(),
        quality_min,
        quality_mean: quality_sum / n,
        quality_max,
        utility_min,
        utility_mean: utility_sum / n,
        utility_max,
        entropy,
        entropy_accum: aggregates.entropy_accum,
        recombinations_this_tick,
        cumulative_recombinations: aggregates.cumulative_recombinations,
        transitions_this_tick: (transition_size > 0) as u32,
        cumulative_transitions: aggregates.cumulative_transitions,
        transition_size,
        adopters_per_technology,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
