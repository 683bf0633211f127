use crate::engines::generation::genome::Genome;
use crate::types::StationId;
use rand::Rng;

/// Tournament selection: pick the best of K random candidates.
///
/// Candidates are drawn uniformly **with replacement**, which also covers
/// populations smaller than K. Ties are broken in favour of the earliest
/// draw, so the result is deterministic for a given random source.
pub fn tournament_selection<R: Rng>(
    population: &[(Genome, f64)],
    tournament_size: usize,
    rng: &mut R,
) -> Genome {
    let mut best_idx = rng.gen_range(0..population.len());
    let mut best_fitness = population[best_idx].1;

    for _ in 1..tournament_size {
        let idx = rng.gen_range(0..population.len());
        if population[idx].1 > best_fitness {
            best_idx = idx;
            best_fitness = population[idx].1;
        }
    }

    population[best_idx].0.clone()
}

/// Single-point crossover: cut both parents at the same point drawn from
/// [1, len-1] and swap the tails. Parents are left untouched; both children
/// have the parents' length. Parents of length ≤ 1 are returned as-is.
pub fn crossover<R: Rng>(parent1: &Genome, parent2: &Genome, rng: &mut R) -> (Genome, Genome) {
    debug_assert_eq!(parent1.len(), parent2.len());
    let len = parent1.len().min(parent2.len());
    if len <= 1 {
        return (parent1.clone(), parent2.clone());
    }

    let point = rng.gen_range(1..len);

    let mut child1 = parent1.clone();
    let mut child2 = parent2.clone();

    child1[point..].copy_from_slice(&parent2[point..]);
    child2[point..].copy_from_slice(&parent1[point..]);

    (child1, child2)
}

/// Per-gene mutation: each slot is independently redrawn from `gene_range`
/// with probability `mutation_rate`, including the vehicle-count slot.
/// Returns a new genome; rate 0.0 is the identity, rate 1.0 a full redraw.
pub fn mutate<R: Rng>(
    genome: &Genome,
    mutation_rate: f64,
    gene_range: std::ops::Range<StationId>,
    rng: &mut R,
) -> Genome {
    genome
        .iter()
        .map(|&gene| {
            if rng.gen::<f64>() < mutation_rate {
                rng.gen_range(gene_range.clone())
            } else {
                gene
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn tournament_prefers_fitter_individuals() {
        let mut rng = StdRng::seed_from_u64(11);
        let population: Vec<(Genome, f64)> = vec![
            (vec![1], 0.1),
            (vec![2], 0.5),
            (vec![3], 0.3),
            (vec![4], 0.9),
        ];
        let mut best_wins = 0;
        for _ in 0..200 {
            if tournament_selection(&population, 3, &mut rng) == vec![4] {
                best_wins += 1;
            }
        }
        // P(best in a 3-sample with replacement) = 1 - (3/4)^3 ≈ 0.58; with
        // 200 trials a count this far below is effectively impossible.
        assert!(best_wins > 60, "best won only {} of 200 tournaments", best_wins);
    }

    #[test]
    fn full_size_tournament_returns_population_best() {
        let mut rng = StdRng::seed_from_u64(3);
        let population: Vec<(Genome, f64)> = vec![
            (vec![1], 0.2),
            (vec![2], 0.8),
            (vec![3], 0.4),
        ];
        // With k sampling with replacement, take enough draws that every
        // index is seen with overwhelming probability.
        for _ in 0..50 {
            let winner = tournament_selection(&population, 64, &mut rng);
            assert_eq!(winner, vec![2]);
        }
    }

    #[test]
    fn crossover_preserves_combined_genes() {
        let mut rng = StdRng::seed_from_u64(42);
        let parent1: Genome = vec![1, 2, 3, 4, 5];
        let parent2: Genome = vec![6, 7, 8, 9, 10];
        let (child1, child2) = crossover(&parent1, &parent2, &mut rng);

        assert_eq!(child1.len(), 5);
        assert_eq!(child2.len(), 5);

        let mut combined: Vec<i64> = child1.iter().chain(&child2).copied().collect();
        combined.sort_unstable();
        assert_eq!(combined, (1..=10).collect::<Vec<i64>>());

        // Parents untouched.
        assert_eq!(parent1, vec![1, 2, 3, 4, 5]);
        assert_eq!(parent2, vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn crossover_cut_point_keeps_head_from_first_parent() {
        let mut rng = StdRng::seed_from_u64(5);
        let parent1: Genome = vec![0; 8];
        let parent2: Genome = vec![1; 8];
        for _ in 0..50 {
            let (child1, child2) = crossover(&parent1, &parent2, &mut rng);
            // Cut point is at least 1, so slot 0 always comes from the
            // same-side parent.
            assert_eq!(child1[0], 0);
            assert_eq!(child2[0], 1);
            // And at most len-1, so the last slot always comes from the
            // opposite parent.
            assert_eq!(child1[7], 1);
            assert_eq!(child2[7], 0);
        }
    }

    #[test]
    fn mutation_rate_zero_is_identity() {
        let mut rng = StdRng::seed_from_u64(1);
        let genome: Genome = vec![4, 0, 1, 2, 3];
        assert_eq!(mutate(&genome, 0.0, 0..5, &mut rng), genome);
    }

    #[test]
    fn mutation_rate_one_redraws_every_gene() {
        let mut rng = StdRng::seed_from_u64(1);
        let genome: Genome = vec![100; 20];
        let mutated = mutate(&genome, 1.0, 0..5, &mut rng);
        assert_eq!(mutated.len(), 20);
        assert!(mutated.iter().all(|&g| (0..5).contains(&g)));
    }

    #[test]
    fn mutation_does_not_touch_input() {
        let mut rng = StdRng::seed_from_u64(9);
        let genome: Genome = vec![1, 2, 3];
        let _ = mutate(&genome, 1.0, 0..100, &mut rng);
        assert_eq!(genome, vec![1, 2, 3]);
    }
}
