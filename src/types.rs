use crate::error::{RebalanceError, Result};
use serde::{Deserialize, Serialize};

/// Station identifier as it appears in a genome.
///
/// Kept signed: mutation can write any integer into any gene slot, and such
/// values must stay representable as data rather than panic or wrap.
pub type StationId = i64;

/// Ordered stations assigned to one vehicle.
pub type Route = Vec<StationId>;

/// Pairwise travel distances between stations.
///
/// Square, symmetric, zero diagonal, nonnegative. Validated once at
/// construction and read-only afterwards. Lookups with out-of-range station
/// ids return 0.0 so arbitrary genome values never panic downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceMatrix {
    cells: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    const SYMMETRY_TOLERANCE: f64 = 1e-9;

    pub fn new(cells: Vec<Vec<f64>>) -> Result<Self> {
        let n = cells.len();
        if n == 0 {
            return Err(RebalanceError::DimensionMismatch(
                "distance matrix is empty".to_string(),
            ));
        }
        for (i, row) in cells.iter().enumerate() {
            if row.len() != n {
                return Err(RebalanceError::DimensionMismatch(format!(
                    "distance matrix is not square: row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
            for (j, &value) in row.iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(RebalanceError::DimensionMismatch(format!(
                        "distance[{}][{}] = {} is not a nonnegative finite number",
                        i, j, value
                    )));
                }
            }
            if row[i] != 0.0 {
                return Err(RebalanceError::DimensionMismatch(format!(
                    "distance[{}][{}] = {} but the diagonal must be zero",
                    i, i, row[i]
                )));
            }
        }
        for i in 0..n {
            for j in (i + 1)..n {
                if (cells[i][j] - cells[j][i]).abs() > Self::SYMMETRY_TOLERANCE {
                    return Err(RebalanceError::DimensionMismatch(format!(
                        "distance matrix is asymmetric at ({}, {}): {} vs {}",
                        i, j, cells[i][j], cells[j][i]
                    )));
                }
            }
        }
        Ok(Self { cells })
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Distance between two stations; 0.0 for any out-of-range id.
    pub fn distance(&self, from: StationId, to: StationId) -> f64 {
        let n = self.cells.len() as i64;
        if from < 0 || to < 0 || from >= n || to >= n {
            return 0.0;
        }
        self.cells[from as usize][to as usize]
    }
}

/// Forecast net flow imbalance per station (positive = surplus, negative =
/// deficit). Read-only input; penalty computation copies it internally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowVector {
    values: Vec<f64>,
}

impl FlowVector {
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(RebalanceError::DimensionMismatch(
                "flow vector is empty".to_string(),
            ));
        }
        if let Some((i, &v)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(RebalanceError::DimensionMismatch(format!(
                "flow[{}] = {} is not finite",
                i, v
            )));
        }
        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Final output of a rebalancing run: the winning genome decoded into
/// per-vehicle routes, with its score breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RebalancePlan {
    pub genome: Vec<StationId>,
    pub vehicle_count: usize,
    pub routes: Vec<Route>,
    pub fitness: f64,
    pub total_distance: f64,
    pub unresolved_flow: f64,
}
