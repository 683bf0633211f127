use super::traits::ConfigSection;
use crate::error::RebalanceError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub num_generations: usize,
    pub mutation_rate: f64,
    pub tournament_size: usize,
    /// Number of top genomes carried unchanged into the next generation.
    /// 0 disables elitism and replaces the whole population each generation.
    pub elitism_count: usize,
    /// Fixed seed for reproducible runs; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            num_generations: 500,
            mutation_rate: 0.1,
            tournament_size: 3,
            elitism_count: 1,
            seed: None,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), RebalanceError> {
        if self.population_size == 0 {
            return Err(RebalanceError::Configuration(
                "Population size must be at least 1".to_string(),
            ));
        }
        if self.mutation_rate < 0.0 || self.mutation_rate > 1.0 {
            return Err(RebalanceError::Configuration(
                "Mutation rate must be between 0 and 1".to_string(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(RebalanceError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        if self.elitism_count > self.population_size {
            return Err(RebalanceError::Configuration(
                "Elitism count cannot exceed population size".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(EvolutionConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_mutation_rate() {
        let mut config = EvolutionConfig::default();
        config.mutation_rate = 1.5;
        assert!(config.validate().is_err());
        config.mutation_rate = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_empty_population() {
        let mut config = EvolutionConfig::default();
        config.population_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_elitism_larger_than_population() {
        let mut config = EvolutionConfig::default();
        config.population_size = 5;
        config.elitism_count = 6;
        assert!(config.validate().is_err());
    }
}
