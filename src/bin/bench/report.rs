// Benchmark report types: per-run results and per-scenario Monte Carlo stats.

use serde::Serialize;

// ─── Statistics (per-metric Monte Carlo aggregation) ────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub min: f64,
    pub max: f64,
    pub n: usize,
}

impl Stats {
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self { mean: 0.0, std_dev: 0.0, ci_lower: 0.0, ci_upper: 0.0, min: 0.0, max: 0.0, n: 0 };
        }
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        let std_dev = variance.sqrt();
        let stderr = std_dev / (n as f64).sqrt();
        let z = 1.96; // 95% CI
        Self {
            mean,
            std_dev,
            ci_lower: mean - z * stderr,
            ci_upper: mean + z * stderr,
            min: samples.iter().cloned().fold(f64::INFINITY, f64::min),
            max: samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            n,
        }
    }

    pub fn half_width(&self) -> f64 {
        (self.ci_upper - self.ci_lower) / 2.0
    }
}

// ─── Single-Run Result ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub scenario: String,
    pub seed: u64,
    pub ticks: u64,
    pub final_entropy: f64,
    pub mean_entropy: f64,
    pub cumulative_transitions: u64,
    pub cumulative_recombinations: u64,
    pub max_quality: f64,
    pub quality_floor: f64,
    pub num_technologies: usize,
    pub num_edges: usize,
    pub elapsed_ms: u128,
}

// ─── Scenario Report (per-scenario aggregation) ─────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub scenario_name: String,
    pub label: String,
    pub n_runs: usize,
    pub final_entropy: Stats,
    pub transitions: Stats,
    pub recombinations: Stats,
    pub max_quality: Stats,
    pub technologies: Stats,
    pub elapsed_ms: Stats,
}

impl ScenarioReport {
    pub fn from_runs(name: &str, label: &str, runs: &[RunResult]) -> Self {
        let take = |f: fn(&RunResult) -> f64| -> Stats {
            let samples: Vec<f64> = runs.iter().map(f).collect();
            Stats::from_samples(&samples)
        };
        Self {
            scenario_name: name.to_string(),
            label: label.to_string(),
            n_runs: runs.len(),
            final_entropy: take(|r| r.final_entropy),
            transitions: take(|r| r.cumulative_transitions as f64),
            recombinations: take(|r| r.cumulative_recombinations as f64),
            max_quality: take(|r| r.max_quality),
            technologies: take(|r| r.num_technologies as f64),
            elapsed_ms: take(|r| r.elapsed_ms as f64),
        }
    }
}

// ─── Suite Report ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct BenchReport {
    pub timestamp: String,
    pub version: &'static str,
    pub prng: &'static str,
    pub n_runs_per_scenario: usize,
    pub scenarios: Vec<ScenarioReport>,
}
