// Technology Diffusion Simulation Suite ("The Ladder") - Run Configuration

use serde::{Deserialize, Serialize};

use crate::types::TieBreak;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Configuration errors. Raised at setup, before any simulation state exists.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("population size must be at least 1")]
    EmptyPopulation,

    #[error("p_innovation must be a probability in [0, 1], got {0}")]
    InvalidInnovationProbability(f64),

    #[error("network_externality_factor must be finite and >= 0, got {0}")]
    InvalidExternalityFactor(f64),
}

// ---------------------------------------------------------------------------
// SimConfig
// ---------------------------------------------------------------------------

/// Full configuration for one simulation run. Validated eagerly by
/// [`SimConfig::validate`]; a constructed simulation never re-checks these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of agents, fixed for the whole run.
    pub num_agents: u32,
    /// Per-agent, per-tick probability of becoming an innovator.
    pub p_innovation: f64,
    /// Utility gained by a technology per current adopter.
    pub network_externality_factor: f64,
    /// When true, all innovators of a tick synthesize one shared technology.
    pub recombination_enabled: bool,
    /// Tick at which `run_until` auto-stops, if set.
    pub pause_at_tick: Option<u64>,
    /// Seed for the shared ChaCha8 generator. Identical seed + config
    /// reproduces the run tick for tick.
    pub random_seed: u64,
    /// Policy for resolving equal maximum scores.
    pub tie_break: TieBreak,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_agents: 100,
            p_innovation: 0.1,
            network_externality_factor: 0.0,
            recombination_enabled: false,
            pause_at_tick: None,
            random_seed: 0,
            tie_break: TieBreak::LowestId,
        }
    }
}

impl SimConfig {
    /// Fail-fast range checks per the error taxonomy: invalid parameters
    /// abort setup and are never silently clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_agents == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if !self.p_innovation.is_finite() || !(0.0..=1.0).contains(&self.p_innovation) {
            return Err(ConfigError::InvalidInnovationProbability(self.p_innovation));
        }
        if !self.network_externality_factor.is_finite() || self.network_externality_factor < 0.0 {
            return Err(ConfigError::InvalidExternalityFactor(
                self.network_externality_factor,
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
