// Technology Diffusion Simulation Suite ("The Ladder") - Simulation Driver

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::audit::{self, InvariantError};
use crate::config::{ConfigError, SimConfig};
use crate::decision;
use crate::graph::TechGraph;
use crate::innovation;
use crate::stats::{self, Aggregates};
use crate::types::{Agent, TickObservables};

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Anything that can abort a run: bad configuration at setup, or an invariant
/// violation detected after a tick. Neither is recoverable.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Invariant(#[from] InvariantError),
}

// ─── DiffusionSimulation ─────────────────────────────────────────────────────

/// The simulation clock and owner of all mutable state: the technology graph,
/// the agent population, the shared seeded RNG, and the cumulative aggregates.
///
/// One tick = innovation stage, then decision stage, then aggregation. The
/// tick boundary is the only suspension point; a run may halt after any
/// completed tick but never inside one.
pub struct DiffusionSimulation {
    config: SimConfig,
    graph: TechGraph,
    agents: Vec<Agent>,
    rng: ChaCha8Rng,
    tick: u64,
    aggregates: Aggregates,
}

impl DiffusionSimulation {
    /// Set up a run: validate the configuration, create the seed technology,
    /// and place the whole population on it.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut graph = TechGraph::seeded();
        let agents = (0..config.num_agents)
            .map(|id| {
                let mut agent = Agent { id, technology: 0, innovator: false };
                graph.place_initial(&mut agent, 0);
                agent
            })
            .collect();

        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(config.random_seed),
            graph,
            agents,
            tick: 0,
            aggregates: Aggregates::default(),
            config,
        })
    }

    /// Advance exactly one tick and return the refreshed observables.
    pub fn step(&mut self) -> Result<TickObservables, SimError> {
        self.tick += 1;

        let recombinations = innovation::run_innovation_stage(
            &mut self.graph,
            &mut self.agents,
            self.config.recombination_enabled,
            self.config.p_innovation,
            self.tick,
            &mut self.rng,
        );

        decision::run_decision_stage(
            &mut self.graph,
            &mut self.agents,
            self.config.network_externality_factor,
            self.config.tie_break,
            &mut self.rng,
        );

        let observables = stats::aggregate_tick(
            &self.graph,
            &self.agents,
            self.config.network_externality_factor,
            recombinations,
            self.tick,
            &mut self.aggregates,
        );

        audit::verify_tick(&self.graph, &self.agents, self.tick)?;
        Ok(observables)
    }

    /// Step until `tick_limit` (or the configured `pause_at_tick`, whichever
    /// comes first), collecting one observables record per tick.
    pub fn run_until(&mut self, tick_limit: u64) -> Result<Vec<TickObservables>, SimError> {
        let stop = match self.config.pause_at_tick {
            Some(pause) => tick_limit.min(pause),
            None => tick_limit,
        };
        let mut series = Vec::new();
        while self.tick < stop {
            series.push(self.step()?);
        }
        Ok(series)
    }

    // ─── Read-only surface for external collaborators ────────────────────

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The full technology/edge graph, for external layout or export.
    pub fn graph(&self) -> &TechGraph {
        &self.graph
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Per-tick transition-size series recorded so far (0 on quiet ticks).
    pub fn transition_sizes(&self) -> &[i64] {
        &self.aggregates.transition_sizes
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
