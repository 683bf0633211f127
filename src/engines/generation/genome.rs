//! Genome representation for the rebalancing search.
//!
//! A genome is a flat sequence of integers of length N+1 (N = station count):
//! slot 0 holds the vehicle count, slots 1..N hold one station id per visit
//! position. The search operates on the flat sequence: crossover and mutation
//! treat every slot alike, so the vehicle-count slot can itself be cut across
//! or redrawn. The typed view below is recovered only at evaluation time.
//!
//! # Why a flat genome instead of a routes structure?
//!
//! Genetic operators work best on simple, linear structures:
//! - **Crossover**: swapping genome segments is trivial (array slicing)
//! - **Mutation**: changing individual genes is straightforward
//! - **No invalid states**: any integer sequence decodes to *some* plan
//!
//! Tree- or list-of-routes representations would need repair steps after
//! every operator application.

use crate::types::{Route, StationId};
use rand::Rng;

/// Candidate solution: `[vehicle_count, station_order...]`.
pub type Genome = Vec<StationId>;

/// Typed view of a genome. Borrowing, produced by [`decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedGenome<'a> {
    /// Raw slot-0 value, any integer. Use [`DecodedGenome::vehicle_count`]
    /// for the clamped count.
    pub vehicle_count_raw: i64,
    /// Slots 1..N, one station id per visit position.
    pub station_order: &'a [StationId],
}

impl DecodedGenome<'_> {
    /// Vehicle count clamped to ≥ 0. A zero or negative slot-0 value is a
    /// legal degenerate genome (no vehicles dispatched), not an error.
    pub fn vehicle_count(&self) -> usize {
        self.vehicle_count_raw.max(0) as usize
    }
}

/// Split a genome into its vehicle-count slot and station order.
///
/// Treats any integer in any slot as data; never fails.
pub fn decode(genome: &Genome) -> DecodedGenome<'_> {
    DecodedGenome {
        vehicle_count_raw: genome.first().copied().unwrap_or(0),
        station_order: if genome.is_empty() { &[] } else { &genome[1..] },
    }
}

/// Distribute the station order round-robin over `vehicle_count` routes:
/// position i goes to route `i % vehicle_count`, original order preserved.
/// Zero vehicles yields zero routes.
pub fn distribute(vehicle_count: usize, station_order: &[StationId]) -> Vec<Route> {
    if vehicle_count == 0 {
        return Vec::new();
    }
    let mut routes: Vec<Route> = vec![Vec::new(); vehicle_count];
    for (i, &station) in station_order.iter().enumerate() {
        routes[i % vehicle_count].push(station);
    }
    routes
}

/// Generate a random genome with every slot drawn from `gene_range`.
pub fn random_genome<R: Rng>(
    length: usize,
    gene_range: std::ops::Range<StationId>,
    rng: &mut R,
) -> Genome {
    (0..length)
        .map(|_| rng.gen_range(gene_range.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn decode_splits_count_and_order() {
        let genome: Genome = vec![3, 0, 1, 2, 3];
        let decoded = decode(&genome);
        assert_eq!(decoded.vehicle_count_raw, 3);
        assert_eq!(decoded.vehicle_count(), 3);
        assert_eq!(decoded.station_order, &[0, 1, 2, 3]);
    }

    #[test]
    fn decode_clamps_negative_vehicle_count() {
        let genome: Genome = vec![-5, 0, 1];
        let decoded = decode(&genome);
        assert_eq!(decoded.vehicle_count_raw, -5);
        assert_eq!(decoded.vehicle_count(), 0);
    }

    #[test]
    fn distribute_is_round_robin() {
        let routes = distribute(2, &[0, 1, 2, 3, 4]);
        assert_eq!(routes, vec![vec![0, 2, 4], vec![1, 3]]);
    }

    #[test]
    fn distribute_covers_every_position_once() {
        let order: Vec<StationId> = (0..10).collect();
        for k in 1..=10 {
            let routes = distribute(k, &order);
            assert_eq!(routes.len(), k);
            let mut seen: Vec<StationId> = routes.iter().flatten().copied().collect();
            seen.sort_unstable();
            assert_eq!(seen, order);
            for (r, route) in routes.iter().enumerate() {
                for &station in route {
                    assert_eq!(station as usize % k, r);
                }
            }
        }
    }

    #[test]
    fn distribute_zero_vehicles_is_empty() {
        assert!(distribute(0, &[0, 1, 2]).is_empty());
    }

    #[test]
    fn random_genome_respects_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let genome = random_genome(50, 0..5, &mut rng);
        assert_eq!(genome.len(), 50);
        assert!(genome.iter().all(|&g| (0..5).contains(&g)));
    }
}
