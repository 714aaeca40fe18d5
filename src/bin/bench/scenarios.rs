// Innovation-regime scenario table for the benchmark runner.
// Each scenario fixes everything except the seed; the runner sweeps seeds.

use diffusion_engine::{SimConfig, TieBreak};

pub struct Scenario {
    pub name: &'static str,
    pub label: &'static str,
    pub ticks: u64,
    pub config: SimConfig,
}

fn base() -> SimConfig {
    SimConfig {
        num_agents: 200,
        p_innovation: 0.05,
        network_externality_factor: 0.0,
        recombination_enabled: false,
        pause_at_tick: None,
        random_seed: 0,
        tie_break: TieBreak::LowestId,
    }
}

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "INDEPENDENT_BASELINE",
            label: "Independent innovation, no externality",
            ticks: 500,
            config: base(),
        },
        Scenario {
            name: "RECOMBINANT_BASELINE",
            label: "Recombinant innovation, no externality",
            ticks: 500,
            config: SimConfig { recombination_enabled: true, ..base() },
        },
        Scenario {
            name: "INDEPENDENT_LOCKIN",
            label: "Independent innovation, strong externality",
            ticks: 500,
            config: SimConfig { network_externality_factor: 0.1, ..base() },
        },
        Scenario {
            name: "RECOMBINANT_LOCKIN",
            label: "Recombinant innovation, strong externality",
            ticks: 500,
            config: SimConfig {
                recombination_enabled: true,
                network_externality_factor: 0.1,
                ..base()
            },
        },
        Scenario {
            name: "RAPID_INNOVATION",
            label: "High innovation rate, independent",
            ticks: 300,
            config: SimConfig { p_innovation: 0.25, ..base() },
        },
        Scenario {
            name: "RANDOM_TIEBREAK",
            label: "Independent, random tie-break",
            ticks: 500,
            config: SimConfig { tie_break: TieBreak::Random, ..base() },
        },
    ]
}
