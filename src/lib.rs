//! Bike-share rebalancing planner.
//!
//! Given a pairwise station distance matrix and a forecast per-station flow
//! imbalance, searches for a vehicle count and per-vehicle station routes
//! that jointly minimize travel distance, fleet size, and unresolved
//! imbalance. The search is a genetic algorithm over flat integer genomes;
//! see [`engines::generation`] for the encoding and the generational loop
//! and [`engines::evaluation`] for the composite fitness.

pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod types;

pub use engines::evaluation::FitnessEvaluator;
pub use engines::generation::{EvolutionEngine, EvolutionOutcome};
pub use error::{RebalanceError, Result};
pub use types::{DistanceMatrix, FlowVector, RebalancePlan};
