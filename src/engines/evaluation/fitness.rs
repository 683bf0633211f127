use crate::config::traits::ConfigSection;
use crate::config::FitnessConfig;
use crate::engines::generation::genome::{self, Genome};
use crate::error::{RebalanceError, Result};
use crate::types::{DistanceMatrix, FlowVector, Route};

/// Guards the reciprocal against division by zero when every cost term is 0.
const FITNESS_EPSILON: f64 = 1e-6;

/// Scores genomes against the distance matrix and the forecast flow vector.
///
/// Scoring is pure: the evaluator never mutates its inputs and a given genome
/// always yields the same score, which is what allows the engine to evaluate
/// a population in parallel.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator {
    distances: DistanceMatrix,
    flows: FlowVector,
    weights: FitnessConfig,
}

impl FitnessEvaluator {
    pub fn new(distances: DistanceMatrix, flows: FlowVector, weights: FitnessConfig) -> Result<Self> {
        if distances.len() != flows.len() {
            return Err(RebalanceError::DimensionMismatch(format!(
                "distance matrix covers {} stations but flow vector covers {}",
                distances.len(),
                flows.len()
            )));
        }
        weights.validate()?;
        Ok(Self {
            distances,
            flows,
            weights,
        })
    }

    /// Number of stations covered by the inputs.
    pub fn station_count(&self) -> usize {
        self.distances.len()
    }

    /// Sum over every route of the distances between consecutive stops.
    /// Routes with fewer than two stops travel nowhere and contribute 0.
    pub fn total_distance(&self, routes: &[Route]) -> f64 {
        let mut total = 0.0;
        for route in routes {
            for pair in route.windows(2) {
                total += self.distances.distance(pair[0], pair[1]);
            }
        }
        total
    }

    /// Absolute imbalance left unresolved by a set of routes.
    ///
    /// Works on a private copy of the flow vector: every in-range station
    /// that appears on any route has its entry zeroed ("resolved"), then the
    /// absolute values of everything left are summed. Stations no vehicle
    /// reaches (all of them, when no vehicles are dispatched) keep their
    /// full imbalance. Out-of-range ids resolve nothing.
    pub fn flow_penalty(&self, routes: &[Route]) -> f64 {
        let mut residual = self.flows.values().to_vec();
        let n = residual.len() as i64;
        for route in routes {
            for &station in route {
                if (0..n).contains(&station) {
                    residual[station as usize] = 0.0;
                }
            }
        }
        residual.iter().map(|v| v.abs()).sum()
    }

    /// Composite score, larger is better:
    /// `1 / (distance_weight·distance + vehicle_count·vehicle_weight +
    /// flow_weight·flow_penalty + ε)`.
    ///
    /// Total over all genomes: a vehicle count ≤ 0 decodes to zero routes,
    /// leaving the whole flow penalty in place, and out-of-range station ids
    /// contribute no distance and resolve nothing. The result is always
    /// strictly positive and finite.
    pub fn fitness(&self, genome: &Genome) -> f64 {
        let decoded = genome::decode(genome);
        let routes = genome::distribute(decoded.vehicle_count(), decoded.station_order);

        let distance = self.total_distance(&routes);
        let vehicle_penalty = decoded.vehicle_count() as f64 * self.weights.vehicle_weight;
        let flow_penalty = self.flow_penalty(&routes);

        1.0 / (self.weights.distance_weight * distance
            + vehicle_penalty
            + self.weights.flow_weight * flow_penalty
            + FITNESS_EPSILON)
    }

    /// Decode a genome into the full plan reported to callers.
    pub fn plan(&self, genome: &Genome) -> crate::types::RebalancePlan {
        let decoded = genome::decode(genome);
        let routes = genome::distribute(decoded.vehicle_count(), decoded.station_order);
        crate::types::RebalancePlan {
            genome: genome.clone(),
            vehicle_count: decoded.vehicle_count(),
            total_distance: self.total_distance(&routes),
            unresolved_flow: self.flow_penalty(&routes),
            fitness: self.fitness(genome),
            routes,
        }
    }
}
