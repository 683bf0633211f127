use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use velobalance::config::ConfigManager;
use velobalance::data::{load_distance_matrix, load_flow_vector};
use velobalance::engines::generation::ConsoleProgressCallback;
use velobalance::{EvolutionEngine, FitnessEvaluator};

/// Search for a bike-share rebalancing plan with a genetic algorithm.
#[derive(Parser, Debug)]
#[command(name = "velobalance", version, about)]
struct Args {
    /// CSV with the N×N station distance matrix.
    #[arg(long)]
    distances: PathBuf,

    /// CSV with the forecast flow imbalance, one value per station.
    #[arg(long)]
    flows: PathBuf,

    /// Optional TOML configuration file; defaults apply when absent.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the random seed from the configuration.
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of generations from the configuration.
    #[arg(long)]
    generations: Option<usize>,

    /// Print the resulting plan as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let manager = ConfigManager::new();
    if let Some(path) = &args.config {
        manager
            .load_from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?;
    }
    manager.update(|config| {
        if let Some(seed) = args.seed {
            config.evolution.seed = Some(seed);
        }
        if let Some(generations) = args.generations {
            config.evolution.num_generations = generations;
        }
    })?;
    let config = manager.get();

    let distances = load_distance_matrix(&args.distances)
        .with_context(|| format!("loading distance matrix from {}", args.distances.display()))?;
    let flows = load_flow_vector(&args.flows)
        .with_context(|| format!("loading flow vector from {}", args.flows.display()))?;

    let evaluator = FitnessEvaluator::new(distances, flows, config.fitness.clone())?;
    let mut engine = EvolutionEngine::new(config.evolution.clone(), evaluator)?;
    let outcome = engine.run(ConsoleProgressCallback)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    let plan = &outcome.best;
    println!("\nBest plan after {} generations:", outcome.generations_run);
    println!("  Genome:  {:?}", plan.genome);
    println!("  Fitness: {:.6}", plan.fitness);
    println!("  Vehicles: {}", plan.vehicle_count);
    for (i, route) in plan.routes.iter().enumerate() {
        let stops: Vec<String> = route.iter().map(|s| s.to_string()).collect();
        println!("  Vehicle {}: {}", i + 1, stops.join(" -> "));
    }
    println!("  Total distance: {:.3}", plan.total_distance);
    println!("  Unresolved imbalance: {:.3}", plan.unresolved_flow);

    Ok(())
}
