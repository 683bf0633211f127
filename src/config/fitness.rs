use super::traits::ConfigSection;
use crate::error::RebalanceError;
use serde::{Deserialize, Serialize};

/// Weights of the composite cost the fitness reciprocal is built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessConfig {
    /// Cost per dispatched vehicle.
    pub vehicle_weight: f64,
    /// Cost per unit of unresolved absolute imbalance.
    pub flow_weight: f64,
    /// Cost per unit of travel distance.
    pub distance_weight: f64,
}

impl Default for FitnessConfig {
    fn default() -> Self {
        Self {
            vehicle_weight: 10.0,
            flow_weight: 20.0,
            distance_weight: 1.0,
        }
    }
}

impl ConfigSection for FitnessConfig {
    fn section_name() -> &'static str {
        "fitness"
    }

    fn validate(&self) -> Result<(), RebalanceError> {
        for (name, value) in [
            ("vehicle_weight", self.vehicle_weight),
            ("flow_weight", self.flow_weight),
            ("distance_weight", self.distance_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RebalanceError::Configuration(format!(
                    "{} must be a nonnegative finite number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
