use crate::error::{RebalanceError, Result};
use crate::types::{DistanceMatrix, FlowVector};
use std::path::Path;

/// Load an N×N distance matrix from CSV.
///
/// Accepts both plain numeric grids and exported dataframes that carry a
/// header row and a leading index column (the usual `to_csv` shape): a first
/// row that does not parse as numbers is skipped, a header starting with an
/// empty cell marks an index column whose entries (numeric or not) are
/// dropped from every data row, and a leading non-numeric cell is dropped as
/// an index label either way. Structural problems (non-square, asymmetric,
/// negative) surface as `DimensionMismatch` from the matrix constructor.
pub fn load_distance_matrix<P: AsRef<Path>>(path: P) -> Result<DistanceMatrix> {
    let rows = read_numeric_rows(path.as_ref())?;
    let cells: Vec<Vec<f64>> = rows.into_iter().map(|(_, values)| values).collect();
    if cells.is_empty() {
        return Err(RebalanceError::DataLoading(format!(
            "{}: no data rows",
            path.as_ref().display()
        )));
    }
    DistanceMatrix::new(cells)
}

/// Load a per-station flow vector from CSV: one value per row, header row
/// and index column tolerated the same way as for the distance matrix.
pub fn load_flow_vector<P: AsRef<Path>>(path: P) -> Result<FlowVector> {
    let rows = read_numeric_rows(path.as_ref())?;
    let mut values = Vec::with_capacity(rows.len());
    for (line, row) in rows {
        match row.as_slice() {
            [value] => values.push(*value),
            _ => {
                return Err(RebalanceError::DataLoading(format!(
                    "{}: expected one value on line {}, got {}",
                    path.as_ref().display(),
                    line,
                    row.len()
                )))
            }
        }
    }
    FlowVector::new(values)
}

/// Read every CSV record as a row of f64s, returning (1-based line, values).
///
/// A first record with any non-numeric cell is treated as a header and
/// skipped; a header whose first cell is empty announces an index column,
/// and the leading cell of every later record is then dropped even when it
/// parses as a number. Without that announcement, only a non-numeric leading
/// cell is dropped as an index label. Any other parse failure is a loading
/// error.
fn read_numeric_rows(path: &Path) -> Result<Vec<(usize, Vec<f64>)>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut index_column = false;
    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let cells: Vec<&str> = record.iter().map(str::trim).collect();
        if cells.iter().all(|c| c.is_empty()) {
            continue;
        }

        let parsed: Vec<std::result::Result<f64, _>> =
            cells.iter().map(|c| c.parse::<f64>()).collect();

        if index == 0 && parsed.iter().any(|p| p.is_err()) {
            index_column = cells.first().is_some_and(|c| c.is_empty());
            log::debug!(
                "{}: skipping header row (index column: {})",
                path.display(),
                index_column
            );
            continue;
        }

        let skip = if index_column && cells.len() > 1 {
            1
        } else if matches!(parsed.as_slice(), [Err(_), rest @ ..]
            if !rest.is_empty() && rest.iter().all(|p| p.is_ok()))
        {
            // Index label in the first column of an otherwise numeric row.
            1
        } else {
            0
        };

        let mut values = Vec::with_capacity(parsed.len() - skip);
        for (cell, p) in cells.iter().zip(&parsed).skip(skip) {
            match p {
                Ok(v) => values.push(*v),
                Err(_) => {
                    return Err(RebalanceError::DataLoading(format!(
                        "{}: cannot parse '{}' on line {}",
                        path.display(),
                        cell,
                        index + 1
                    )))
                }
            }
        }
        rows.push((index + 1, values));
    }
    Ok(rows)
}
