//! Standard scaling over column-major numeric data.
//!
//! Works on the `Vec<Vec<f64>>` column blocks produced by the imputation
//! and encoding stages rather than on a DataFrame, since by this point the
//! data is purely numeric.

use crate::error::{PreprocessingError, Result};
use serde::{Deserialize, Serialize};

/// Deviations below this are treated as zero and clamped to 1.0, so a
/// constant column scales to zero instead of dividing by zero.
const MIN_STD: f64 = 1e-10;

/// Standard scaler (unfitted).
///
/// With `with_mean` set, output columns have zero mean and unit variance.
/// Without it, columns are only divided by their deviation; that is the
/// right setting for indicator columns, where centering would destroy
/// sparsity.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    with_mean: bool,
}

impl StandardScaler {
    pub fn new(with_mean: bool) -> Self {
        Self { with_mean }
    }

    /// Learn per-column mean and population standard deviation.
    pub fn fit(&self, columns: &[Vec<f64>]) -> Result<FittedStandardScaler> {
        let mut means = Vec::with_capacity(columns.len());
        let mut stds = Vec::with_capacity(columns.len());

        for column in columns {
            if column.is_empty() {
                return Err(PreprocessingError::EmptyTable(
                    "cannot fit scaler on zero rows".to_string(),
                ));
            }

            let n = column.len() as f64;
            let mean = column.iter().sum::<f64>() / n;
            let variance = column.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
            let std = variance.sqrt();

            means.push(if self.with_mean { mean } else { 0.0 });
            stds.push(if std < MIN_STD { 1.0 } else { std });
        }

        Ok(FittedStandardScaler { means, stds })
    }
}

/// Fitted standard scaler holding per-column statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedStandardScaler {
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl FittedStandardScaler {
    /// Scale columns with the learned statistics.
    ///
    /// # Errors
    ///
    /// Fails when the number of columns differs from fit time.
    pub fn transform(&self, columns: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        if columns.len() != self.means.len() {
            return Err(PreprocessingError::SchemaMismatch {
                expected: format!("{} columns", self.means.len()),
                got: format!("{} columns", columns.len()),
            });
        }

        Ok(columns
            .iter()
            .zip(self.means.iter().zip(self.stds.iter()))
            .map(|(column, (mean, std))| column.iter().map(|v| (v - mean) / std).collect())
            .collect())
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    pub fn stds(&self) -> &[f64] {
        &self.stds
    }
}
