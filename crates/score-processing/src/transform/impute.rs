//! Imputation transformers for completing missing values.
//!
//! Numeric columns are filled with the column median (robust to outliers),
//! categorical columns with the column mode. Fill values are learned at
//! fit time and reapplied verbatim at transform time.

use crate::error::{PreprocessingError, Result};
use crate::utils::{exact_median, fill_numeric_nulls, fill_string_nulls, is_numeric_dtype, string_mode};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Median imputer for numeric columns (unfitted).
#[derive(Debug, Clone)]
pub struct MedianImputer {
    columns: Vec<String>,
}

impl MedianImputer {
    pub fn new(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Learn the median of each configured column from non-null values.
    ///
    /// # Errors
    ///
    /// Fails on an empty table, a missing column, a non-numeric column, or
    /// a column with no non-null values to take a median of.
    pub fn fit(&self, df: &DataFrame) -> Result<FittedMedianImputer> {
        if df.height() == 0 {
            return Err(PreprocessingError::EmptyTable(
                "cannot fit median imputer on an empty table".to_string(),
            ));
        }

        let mut fills = Vec::with_capacity(self.columns.len());
        for name in &self.columns {
            let column = df
                .column(name)
                .map_err(|_| PreprocessingError::ColumnNotFound(name.clone()))?;
            let series = column.as_materialized_series();

            if !is_numeric_dtype(series.dtype()) {
                return Err(PreprocessingError::InvalidColumnType {
                    column: name.clone(),
                    expected: "numeric",
                });
            }

            let values: Vec<f64> = series
                .cast(&DataType::Float64)?
                .f64()?
                .into_iter()
                .flatten()
                .collect();
            let median = exact_median(&values)
                .ok_or_else(|| PreprocessingError::NoValidValues(name.clone()))?;
            fills.push((name.clone(), median));
        }

        Ok(FittedMedianImputer { fills })
    }
}

/// Fitted median imputer holding per-column fill values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedMedianImputer {
    fills: Vec<(String, f64)>,
}

impl FittedMedianImputer {
    /// Replace nulls in the configured columns with the learned medians.
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut df = df.clone();
        for (name, fill) in &self.fills {
            let column = df
                .column(name)
                .map_err(|_| PreprocessingError::ColumnNotFound(name.clone()))?;
            let filled = fill_numeric_nulls(column.as_materialized_series(), *fill)?;
            df.replace(name, filled)?;
        }
        Ok(df)
    }

    /// The learned fill value for each column.
    pub fn fill_values(&self) -> &[(String, f64)] {
        &self.fills
    }
}

/// Mode imputer for categorical columns (unfitted).
#[derive(Debug, Clone)]
pub struct ModeImputer {
    columns: Vec<String>,
}

impl ModeImputer {
    pub fn new(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Learn the most frequent non-null value of each configured column.
    ///
    /// # Errors
    ///
    /// Fails on an empty table, a missing column, or a column whose values
    /// are all null.
    pub fn fit(&self, df: &DataFrame) -> Result<FittedModeImputer> {
        if df.height() == 0 {
            return Err(PreprocessingError::EmptyTable(
                "cannot fit mode imputer on an empty table".to_string(),
            ));
        }

        let mut fills = Vec::with_capacity(self.columns.len());
        for name in &self.columns {
            let column = df
                .column(name)
                .map_err(|_| PreprocessingError::ColumnNotFound(name.clone()))?;
            let mode = string_mode(column.as_materialized_series())
                .ok_or_else(|| PreprocessingError::NoValidValues(name.clone()))?;
            fills.push((name.clone(), mode));
        }

        Ok(FittedModeImputer { fills })
    }
}

/// Fitted mode imputer holding per-column fill values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedModeImputer {
    fills: Vec<(String, String)>,
}

impl FittedModeImputer {
    /// Replace nulls in the configured columns with the learned modes.
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut df = df.clone();
        for (name, fill) in &self.fills {
            let column = df
                .column(name)
                .map_err(|_| PreprocessingError::ColumnNotFound(name.clone()))?;
            let filled = fill_string_nulls(column.as_materialized_series(), fill)?;
            df.replace(name, filled)?;
        }
        Ok(df)
    }

    /// The learned fill value for each column.
    pub fn fill_values(&self) -> &[(String, String)] {
        &self.fills
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // MedianImputer tests
    // ========================================================================

    #[test]
    fn test_median_imputer_learns_median_of_non_missing() {
        let df = df![
            "writing_score" => [Some(40.0), None, Some(60.0), Some(80.0)],
        ]
        .unwrap();

        let fitted = MedianImputer::new(["writing_score"]).fit(&df).unwrap();

        // Median of [40, 60, 80] = 60
        assert_eq!(fitted.fill_values(), &[("writing_score".to_string(), 60.0)]);

        let imputed = fitted.transform(&df).unwrap();
        let column = imputed.column("writing_score").unwrap();
        assert_eq!(column.null_count(), 0);
        let value = column.as_materialized_series().get(1).unwrap();
        assert_eq!(value.try_extract::<f64>().unwrap(), 60.0);
    }

    #[test]
    fn test_median_imputer_even_count() {
        let df = df![
            "score" => [Some(1.0), Some(3.0), None, Some(5.0), Some(7.0)],
        ]
        .unwrap();

        let fitted = MedianImputer::new(["score"]).fit(&df).unwrap();
        assert_eq!(fitted.fill_values()[0].1, 4.0);
    }

    #[test]
    fn test_median_imputer_empty_table() {
        let df = DataFrame::empty();
        let error = MedianImputer::new(["score"]).fit(&df).unwrap_err();
        assert_eq!(error.kind(), "EMPTY_TABLE");
    }

    #[test]
    fn test_median_imputer_unknown_column() {
        let df = df!["score" => [1.0, 2.0]].unwrap();
        let error = MedianImputer::new(["other"]).fit(&df).unwrap_err();
        assert_eq!(error.kind(), "COLUMN_NOT_FOUND");
    }

    #[test]
    fn test_median_imputer_all_missing_column() {
        let df = df!["score" => [None::<f64>, None, None]].unwrap();
        let error = MedianImputer::new(["score"]).fit(&df).unwrap_err();
        assert_eq!(error.kind(), "NO_VALID_VALUES");
    }

    #[test]
    fn test_median_imputer_rejects_string_column() {
        let df = df!["score" => ["a", "b"]].unwrap();
        let error = MedianImputer::new(["score"]).fit(&df).unwrap_err();
        assert_eq!(error.kind(), "INVALID_COLUMN_TYPE");
    }

    // ========================================================================
    // ModeImputer tests
    // ========================================================================

    #[test]
    fn test_mode_imputer_learns_most_frequent() {
        let df = df![
            "lunch" => [Some("standard"), Some("free/reduced"), Some("standard"), None],
        ]
        .unwrap();

        let fitted = ModeImputer::new(["lunch"]).fit(&df).unwrap();
        assert_eq!(
            fitted.fill_values(),
            &[("lunch".to_string(), "standard".to_string())]
        );

        let imputed = fitted.transform(&df).unwrap();
        let column = imputed.column("lunch").unwrap();
        assert_eq!(column.null_count(), 0);

        let chunked = column.as_materialized_series().str().unwrap().clone();
        let values: Vec<&str> = chunked.into_iter().flatten().collect();
        assert_eq!(
            values,
            vec!["standard", "free/reduced", "standard", "standard"]
        );
    }

    #[test]
    fn test_mode_imputer_all_missing_column() {
        let df = df!["lunch" => [None::<&str>, None]].unwrap();
        let error = ModeImputer::new(["lunch"]).fit(&df).unwrap_err();
        assert_eq!(error.kind(), "NO_VALID_VALUES");
    }

    #[test]
    fn test_mode_imputer_transform_missing_column() {
        let df = df!["lunch" => ["standard", "standard"]].unwrap();
        let fitted = ModeImputer::new(["lunch"]).fit(&df).unwrap();

        let other = df!["gender" => ["male"]].unwrap();
        let error = fitted.transform(&other).unwrap_err();
        assert_eq!(error.kind(), "COLUMN_NOT_FOUND");
    }

    #[test]
    fn test_fitted_imputer_serde_roundtrip() {
        let df = df![
            "score" => [Some(1.0), None, Some(9.0)],
        ]
        .unwrap();
        let fitted = MedianImputer::new(["score"]).fit(&df).unwrap();

        let bytes = bincode::serialize(&fitted).unwrap();
        let restored: FittedMedianImputer = bincode::deserialize(&bytes).unwrap();

        assert_eq!(restored.fill_values(), fitted.fill_values());
    }
}
