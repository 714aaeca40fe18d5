// Technology Diffusion Simulation Suite ("The Ladder")
//
// Co-evolution of an adopter population and a growing graph of competing
// technologies: stochastic innovation (independent or recombinant) builds
// the derivation graph, myopic network-externality-sensitive adoption moves
// the population across it, and per-tick aggregation reports diversity and
// quality-floor transitions.

pub mod audit;
pub mod config;
pub mod decision;
pub mod distance;
pub mod graph;
pub mod innovation;
pub mod simulation;
pub mod stats;
pub mod types;

pub use audit::InvariantError;
pub use config::{ConfigError, SimConfig};
pub use graph::TechGraph;
pub use simulation::{DiffusionSimulation, SimError};
pub use stats::Aggregates;
pub use types::{Agent, AgentId, DerivationEdge, TechId, Technology, TickObservables, TieBreak};
