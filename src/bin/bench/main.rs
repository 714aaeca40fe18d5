// Diffusion Benchmark Runner — Monte Carlo comparison of innovation regimes
//
// Usage:
//   cargo run --release --bin bench                  # all scenarios, 10 runs each
//   cargo run --release --bin bench -- --runs 30     # more runs per scenario
//   cargo run --release --bin bench -- RECOMBINANT   # filter by name/label
//   cargo run --release --bin bench -- --time-series # per-tick JSONL output
//   cargo run --release --bin bench -- --seed 42     # custom base seed

mod report;
mod scenarios;

use std::fs;
use std::io::Write;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use diffusion_engine::{DiffusionSimulation, SimConfig};

use report::*;
use scenarios::*;

// ─── CLI Parsing ────────────────────────────────────────────────────────────

struct CliArgs {
    runs: usize,
    seed: u64,
    time_series: bool,
    filter: Option<String>,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs {
        runs: 10,
        seed: 0,
        time_series: false,
        filter: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--runs" => {
                i += 1;
                if i < args.len() {
                    cli.runs = args[i].parse().unwrap_or(10);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    cli.seed = args[i].parse().unwrap_or(0);
                }
            }
            "--time-series" => {
                cli.time_series = true;
            }
            arg if !arg.starts_with('-') => {
                cli.filter = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    cli
}

// ─── Single run ─────────────────────────────────────────────────────────────

fn run_single(
    scenario: &Scenario,
    seed: u64,
    time_series_dir: Option<&std::path::Path>,
) -> RunResult {
    let start = Instant::now();
    let config = SimConfig { random_seed: seed, ..scenario.config.clone() };
    let mut sim = match DiffusionSimulation::new(config) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("scenario {} rejected its config: {}", scenario.name, e);
            std::process::exit(1);
        }
    };

    let series = match sim.run_until(scenario.ticks) {
        Ok(series) => series,
        Err(e) => {
            eprintln!("scenario {} seed {} aborted: {}", scenario.name, seed, e);
            std::process::exit(1);
        }
    };

    if let Some(dir) = time_series_dir {
        let path = dir.join(format!("{}_{}.jsonl", scenario.name, seed));
        if let Ok(mut file) = fs::File::create(&path) {
            for obs in &series {
                if let Ok(line) = serde_json::to_string(obs) {
                    let _ = writeln!(file, "{}", line);
                }
            }
        }
    }

    let last = series.last().expect("at least one tick ran");
    let mean_entropy = last.entropy_accum / series.len() as f64;

    RunResult {
        scenario: scenario.name.to_string(),
        seed,
        ticks: scenario.ticks,
        final_entropy: last.entropy,
        mean_entropy,
        cumulative_transitions: last.cumulative_transitions,
        cumulative_recombinations: last.cumulative_recombinations,
        max_quality: last.quality_max,
        quality_floor: last.quality_min,
        num_technologies: last.num_technologies,
        num_edges: last.num_edges,
        elapsed_ms: start.elapsed().as_millis(),
    }
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() {
    let cli = parse_args();
    let all_scenarios = scenarios();

    let to_run: Vec<&Scenario> = match &cli.filter {
        Some(f) => {
            let f_lower = f.to_lowercase();
            all_scenarios
                .iter()
                .filter(|s| {
                    s.name.to_lowercase().contains(&f_lower)
                        || s.label.to_lowercase().contains(&f_lower)
                })
                .collect()
        }
        None => all_scenarios.iter().collect(),
    };

    if to_run.is_empty() {
        eprintln!("No scenarios match filter: {:?}", cli.filter);
        std::process::exit(1);
    }

    let ts_dir = if cli.time_series {
        let dir = std::path::Path::new("benchmark-results/time-series");
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("cannot create {}: {}", dir.display(), e);
            std::process::exit(1);
        }
        Some(dir.to_path_buf())
    } else {
        None
    };

    println!("\n  Diffusion Benchmark Runner v0.2.0");
    println!("  PRNG: ChaCha8Rng | Runs/scenario: {} | Base seed: {}", cli.runs, cli.seed);
    println!("  Running {} scenario(s)...\n", to_run.len());
    println!(
        "  {:<44} {:>12} {:>10} {:>10} {:>8} {:>7}",
        "Scenario", "Entropy", "Trans", "Recomb", "MaxQ", "Time"
    );
    println!("  {}", "-".repeat(96));

    let suite_start = Instant::now();
    let mut reports = Vec::new();

    for scenario in &to_run {
        let runs: Vec<RunResult> = (0..cli.runs)
            .map(|i| run_single(scenario, cli.seed + i as u64, ts_dir.as_deref()))
            .collect();
        let report = ScenarioReport::from_runs(scenario.name, scenario.label, &runs);

        println!(
            "  {:<44} {:>6.2}±{:<5.2} {:>10.1} {:>10.1} {:>8.1} {:>5.0}ms",
            report.label,
            report.final_entropy.mean,
            report.final_entropy.half_width(),
            report.transitions.mean,
            report.recombinations.mean,
            report.max_quality.mean,
            report.elapsed_ms.mean,
        );

        reports.push(report);
    }

    let suite_elapsed = suite_start.elapsed();
    println!("  {}", "-".repeat(96));
    println!(
        "  Scenarios: {}  Suite time: {:.1}s\n",
        reports.len(),
        suite_elapsed.as_secs_f64()
    );

    // ─── Write JSON Report ──────────────────────────────────────────────

    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);

    let bench_report = BenchReport {
        timestamp: format!("{}", ts),
        version: "0.2.0",
        prng: "ChaCha8Rng",
        n_runs_per_scenario: cli.runs,
        scenarios: reports,
    };

    if fs::create_dir_all("benchmark-results").is_ok() {
        let path = format!("benchmark-results/bench_{}.json", ts);
        match serde_json::to_string_pretty(&bench_report) {
            Ok(json) => {
                if fs::write(&path, json).is_ok() {
                    println!("  Report written to {}\n", path);
                }
            }
            Err(e) => eprintln!("report serialization failed: {}", e),
        }
    }
}
