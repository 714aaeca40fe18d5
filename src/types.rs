// Technology Diffusion Simulation Suite ("The Ladder") - Type Definitions

use serde::{Deserialize, Serialize};

/// Index of a technology in the graph arena, assigned in creation order.
pub type TechId = u32;

/// Index of an agent in the population, fixed at setup.
pub type AgentId = u32;

// ─── Tie-break policy ────────────────────────────────────────────────────────

/// How an agent chooses among multiple technologies achieving the maximum
/// score. Both policies are deterministic for a fixed seed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TieBreak {
    /// Pick the maximal entry with the lowest technology id.
    LowestId,
    /// Pick uniformly among maximal entries using the shared seeded RNG.
    Random,
}

impl Default for TieBreak {
    fn default() -> Self {
        TieBreak::LowestId
    }
}

// ─── Technology ──────────────────────────────────────────────────────────────

/// A node in the derivation graph. Created once, never removed; only
/// `adopters` changes after creation, and only via the adoption primitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Technology {
    pub id: TechId,
    /// Intrinsic quality. The seed is 0; every later node is
    /// `1 + max(parent qualities)`. Immutable after creation.
    pub quality: u32,
    /// Number of agents currently assigned to this technology.
    pub adopters: u32,
    /// Ancestor technologies this one was derived from. Empty only for the seed.
    pub parents: Vec<TechId>,
    /// Inverse view of `parents`: technologies derived from this one.
    pub children: Vec<TechId>,
    /// Tick at which this technology was created (0 for the seed).
    pub created_tick: u64,
}

// ─── Derivation Edge ─────────────────────────────────────────────────────────

/// Directed derivation record, ancestor to descendant. Immutable; treated as
/// undirected adjacency by the distance engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DerivationEdge {
    pub from: TechId,
    pub to: TechId,
    pub created_tick: u64,
}

// ─── Agent ───────────────────────────────────────────────────────────────────

/// A population member. Always assigned to exactly one technology.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    /// The technology this agent currently uses.
    pub technology: TechId,
    /// Transient innovator flag, resampled every tick before any other stage.
    pub innovator: bool,
}

// ─── TickObservables ─────────────────────────────────────────────────────────

/// Population-level observables, refreshed once per tick after both stages.
/// This is the full export surface for plotting/monitor collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickObservables {
    pub tick: u64,
    pub num_technologies: usize,
    pub num_edges: usize,

    // Per-agent quality of the currently adopted technology.
    pub quality_min: f64,
    pub quality_mean: f64,
    pub quality_max: f64,

    // Per-agent utility of the currently adopted technology.
    pub utility_min: f64,
    pub utility_mean: f64,
    pub utility_max: f64,

    /// Shannon entropy (base 2) of the adopter distribution.
    pub entropy: f64,
    /// Running sum of per-tick entropy across the whole run.
    pub entropy_accum: f64,

    pub recombinations_this_tick: u32,
    pub cumulative_recombinations: u64,

    /// 1 when the population quality floor advanced this tick, else 0.
    pub transitions_this_tick: u32,
    pub cumulative_transitions: u64,
    /// Floor advance this tick (0 on non-transition ticks).
    pub transition_size: i64,

    /// Adopter count per technology, in creation order.
    pub adopters_per_technology: Vec<u32>,
}
