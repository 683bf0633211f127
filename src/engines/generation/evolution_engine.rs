use crate::config::traits::ConfigSection;
use crate::config::EvolutionConfig;
use crate::engines::evaluation::FitnessEvaluator;
use crate::engines::generation::genome::{random_genome, Genome};
use crate::engines::generation::operators::{crossover, mutate, tournament_selection};
use crate::engines::generation::progress::ProgressCallback;
use crate::error::Result;
use crate::types::{RebalancePlan, StationId};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Best score seen in one generation, for external logging/plotting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub generation: usize,
    pub best_fitness: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionOutcome {
    /// Best plan of the final sorted population.
    pub best: RebalancePlan,
    /// One record per completed generation.
    pub history: Vec<GenerationRecord>,
    pub generations_run: usize,
}

/// Generational GA driver.
///
/// Owns the single random source every stochastic step draws from, in a fixed
/// order: population initialization, then per breeding pair two tournaments,
/// one cut point, and the mutation coin flips of both children. A fixed seed
/// therefore reproduces a run end-to-end. Fitness evaluation consumes no
/// randomness and is farmed out to rayon; the order-preserving collect plus a
/// stable sort keep results independent of worker scheduling.
pub struct EvolutionEngine {
    config: EvolutionConfig,
    evaluator: FitnessEvaluator,
    genome_length: usize,
    gene_range: std::ops::Range<StationId>,
    rng: StdRng,
}

impl EvolutionEngine {
    /// Fails fast on an invalid configuration; dimension mismatches between
    /// the matrix and the flow vector are caught when the evaluator is built,
    /// and the genome length is derived from the station count so the two
    /// cannot disagree.
    pub fn new(config: EvolutionConfig, evaluator: FitnessEvaluator) -> Result<Self> {
        config.validate()?;

        let stations = evaluator.station_count();
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        log::info!(
            "Evolution engine: {} stations, population {}, {} generations, mutation rate {}",
            stations,
            config.population_size,
            config.num_generations,
            config.mutation_rate
        );

        Ok(Self {
            genome_length: stations + 1,
            // Every slot draws from 0..=N: vehicle counts up to the station
            // count, station ids including one out-of-range value the lenient
            // evaluation contracts tolerate as data.
            gene_range: 0..(stations as StationId + 1),
            config,
            evaluator,
            rng,
        })
    }

    /// Run the full generational loop and return the best plan of the final
    /// sorted population together with the per-generation history.
    pub fn run<C: ProgressCallback>(&mut self, mut callback: C) -> Result<EvolutionOutcome> {
        let mut population = self.initialize_population();
        let mut history = Vec::with_capacity(self.config.num_generations);
        let mut generations_run = 0;

        for generation in 0..self.config.num_generations {
            callback.on_generation_start(generation);

            let scored = self.evaluate_sorted(&population);
            let best_fitness = scored[0].1;
            history.push(GenerationRecord {
                generation,
                best_fitness,
            });
            callback.on_generation_complete(generation, best_fitness);
            generations_run = generation + 1;

            if callback.should_stop() {
                log::info!("Stop requested after generation {}", generation);
                return Ok(EvolutionOutcome {
                    best: self.evaluator.plan(&scored[0].0),
                    history,
                    generations_run,
                });
            }

            population = self.next_generation(&scored);
        }

        let final_scored = self.evaluate_sorted(&population);
        Ok(EvolutionOutcome {
            best: self.evaluator.plan(&final_scored[0].0),
            history,
            generations_run,
        })
    }

    fn initialize_population(&mut self) -> Vec<Genome> {
        (0..self.config.population_size)
            .map(|_| random_genome(self.genome_length, self.gene_range.clone(), &mut self.rng))
            .collect()
    }

    /// Score the population and sort it best-first. The sort is stable, so
    /// equal scores keep their prior order and ties break deterministically.
    fn evaluate_sorted(&self, population: &[Genome]) -> Vec<(Genome, f64)> {
        let mut scored: Vec<(Genome, f64)> = population
            .par_iter()
            .map(|genome| (genome.clone(), self.evaluator.fitness(genome)))
            .collect();
        // Fitness is always finite, so partial_cmp cannot fail here.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored
    }

    /// Breed the next population: elites first, then tournament-selected
    /// parents crossed over and mutated, truncated to the configured size
    /// when the final pair overshoots.
    fn next_generation(&mut self, scored: &[(Genome, f64)]) -> Vec<Genome> {
        let mut next: Vec<Genome> = scored
            .iter()
            .take(self.config.elitism_count)
            .map(|(genome, _)| genome.clone())
            .collect();

        while next.len() < self.config.population_size {
            let parent1 = tournament_selection(scored, self.config.tournament_size, &mut self.rng);
            let parent2 = tournament_selection(scored, self.config.tournament_size, &mut self.rng);

            let (child1, child2) = crossover(&parent1, &parent2, &mut self.rng);

            // Mutate both children even when only one fits, so the random
            // stream does not depend on population-size parity.
            let child1 = mutate(
                &child1,
                self.config.mutation_rate,
                self.gene_range.clone(),
                &mut self.rng,
            );
            let child2 = mutate(
                &child2,
                self.config.mutation_rate,
                self.gene_range.clone(),
                &mut self.rng,
            );

            next.push(child1);
            next.push(child2);
        }

        next.truncate(self.config.population_size);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FitnessConfig;
    use crate::engines::generation::progress::SilentProgress;
    use crate::types::{DistanceMatrix, FlowVector};

    fn test_engine(config: EvolutionConfig) -> EvolutionEngine {
        let distances = DistanceMatrix::new(vec![
            vec![0.0, 1.0, 2.0, 3.0],
            vec![1.0, 0.0, 1.0, 2.0],
            vec![2.0, 1.0, 0.0, 1.0],
            vec![3.0, 2.0, 1.0, 0.0],
        ])
        .unwrap();
        let flows = FlowVector::new(vec![5.0, -3.0, 2.0, -4.0]).unwrap();
        let evaluator = FitnessEvaluator::new(distances, flows, FitnessConfig::default()).unwrap();
        EvolutionEngine::new(config, evaluator).unwrap()
    }

    fn seeded_config(seed: u64) -> EvolutionConfig {
        EvolutionConfig {
            population_size: 20,
            num_generations: 10,
            mutation_rate: 0.1,
            tournament_size: 3,
            elitism_count: 1,
            seed: Some(seed),
        }
    }

    #[test]
    fn zero_generations_returns_best_of_initial_population() {
        let mut config = seeded_config(1);
        config.num_generations = 0;
        let outcome = test_engine(config).run(SilentProgress).unwrap();
        assert_eq!(outcome.generations_run, 0);
        assert!(outcome.history.is_empty());
        assert!(outcome.best.fitness > 0.0 && outcome.best.fitness.is_finite());
    }

    #[test]
    fn history_has_one_record_per_generation() {
        let outcome = test_engine(seeded_config(2)).run(SilentProgress).unwrap();
        assert_eq!(outcome.generations_run, 10);
        assert_eq!(outcome.history.len(), 10);
        for (i, record) in outcome.history.iter().enumerate() {
            assert_eq!(record.generation, i);
        }
    }

    #[test]
    fn elitism_makes_best_fitness_monotonic() {
        let outcome = test_engine(seeded_config(3)).run(SilentProgress).unwrap();
        for pair in outcome.history.windows(2) {
            assert!(
                pair[1].best_fitness >= pair[0].best_fitness,
                "best fitness regressed: {:?}",
                pair
            );
        }
        // The final population still contains the elite, so the reported
        // best cannot fall below the last generation's best.
        assert!(outcome.best.fitness >= outcome.history.last().unwrap().best_fitness);
    }

    #[test]
    fn invalid_configuration_fails_before_running() {
        let mut config = seeded_config(4);
        config.mutation_rate = 7.0;
        let distances = DistanceMatrix::new(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        let flows = FlowVector::new(vec![1.0, -1.0]).unwrap();
        let evaluator = FitnessEvaluator::new(distances, flows, FitnessConfig::default()).unwrap();
        assert!(EvolutionEngine::new(config, evaluator).is_err());
    }

    #[test]
    fn stop_callback_ends_run_after_current_generation() {
        struct StopAfterThree {
            seen: usize,
        }
        impl ProgressCallback for StopAfterThree {
            fn on_generation_start(&mut self, _generation: usize) {}
            fn on_generation_complete(&mut self, _generation: usize, _best_fitness: f64) {
                self.seen += 1;
            }
            fn should_stop(&mut self) -> bool {
                self.seen >= 3
            }
        }

        let outcome = test_engine(seeded_config(5))
            .run(StopAfterThree { seen: 0 })
            .unwrap();
        assert_eq!(outcome.generations_run, 3);
        assert_eq!(outcome.history.len(), 3);
    }
}
