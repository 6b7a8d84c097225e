//! The composite preprocessor.
//!
//! [`Preprocessor`] holds the column schema and builds two independent
//! processing chains when fit: numeric columns go through median
//! imputation and standardization, categorical columns through mode
//! imputation, one-hot encoding, and scaling without centering. The
//! chains are fit separately on the same table and their outputs are
//! concatenated numeric-first into a single `ndarray` matrix.
//!
//! Median imputation is used for numeric features because it is robust to
//! outliers; the mode is the only meaningful central value for nominal
//! features.
//!
//! # Example
//!
//! ```rust,ignore
//! use score_processing::{ColumnSchema, Preprocessor};
//!
//! let schema = ColumnSchema::new(["reading_score"], ["lunch"], "math_score");
//! let fitted = Preprocessor::new(schema).fit(&train_features)?;
//! let train = fitted.transform(&train_features)?;
//! let eval = fitted.transform(&eval_features)?;
//! ```

use crate::config::{ColumnSchema, TransformationConfig, UnseenCategoryPolicy};
use crate::error::{PreprocessingError, Result, ResultExt};
use crate::transform::{
    FittedMedianImputer, FittedModeImputer, FittedOneHotEncoder, FittedStandardScaler,
    MedianImputer, ModeImputer, OneHotEncoder, StandardScaler,
};
use ndarray::Array2;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// The composite preprocessor (unfitted).
#[derive(Debug, Clone)]
pub struct Preprocessor {
    schema: ColumnSchema,
    unseen_policy: UnseenCategoryPolicy,
}

impl Preprocessor {
    /// Create a preprocessor for the given schema with the default
    /// unseen-category policy.
    pub fn new(schema: ColumnSchema) -> Self {
        Self {
            schema,
            unseen_policy: UnseenCategoryPolicy::default(),
        }
    }

    /// Set the policy for categories unseen at fit time.
    pub fn with_unseen_policy(mut self, policy: UnseenCategoryPolicy) -> Self {
        self.unseen_policy = policy;
        self
    }

    /// Create a preprocessor from a pipeline configuration.
    pub fn from_config(config: &TransformationConfig) -> Self {
        Self {
            schema: config.schema.clone(),
            unseen_policy: config.unseen_category_policy,
        }
    }

    /// Fit both chains on a feature table.
    ///
    /// # Errors
    ///
    /// Fails on an invalid schema, an empty table, a missing or mistyped
    /// column, or a column with no usable values.
    pub fn fit(&self, df: &DataFrame) -> Result<FittedPreprocessor> {
        self.schema
            .validate()
            .map_err(|e| PreprocessingError::InvalidConfig(e.to_string()))?;

        if df.height() == 0 {
            return Err(PreprocessingError::EmptyTable(
                "cannot fit preprocessor on an empty table".to_string(),
            ));
        }

        info!("Numerical columns: {:?}", self.schema.numeric);
        info!("Categorical columns: {:?}", self.schema.categorical);

        // Numeric chain: impute with the median, then standardize.
        let imputer = MedianImputer::new(self.schema.numeric.clone())
            .fit(df)
            .context("fitting median imputer")?;
        let imputed = imputer.transform(df)?;
        let numeric_block = collect_numeric_block(&imputed, &self.schema.numeric)?;
        let scaler = StandardScaler::new(true)
            .fit(&numeric_block)
            .context("fitting numeric scaler")?;
        let numeric = FittedNumericChain { imputer, scaler };

        // Categorical chain: impute with the mode, one-hot encode, then
        // scale without centering to keep the indicators sparse-friendly.
        let imputer = ModeImputer::new(self.schema.categorical.clone())
            .fit(df)
            .context("fitting mode imputer")?;
        let imputed = imputer.transform(df)?;
        let encoder = OneHotEncoder::new(self.schema.categorical.clone(), self.unseen_policy)
            .fit(&imputed)
            .context("fitting one-hot encoder")?;
        let encoded = encoder.encode(&imputed)?;
        let scaler = StandardScaler::new(false)
            .fit(&encoded)
            .context("fitting categorical scaler")?;
        let categorical = FittedCategoricalChain {
            imputer,
            encoder,
            scaler,
        };

        debug!(
            "fitted preprocessor: {} numeric + {} indicator columns",
            self.schema.numeric.len(),
            categorical.encoder.output_width()
        );

        Ok(FittedPreprocessor {
            schema: self.schema.clone(),
            numeric,
            categorical,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FittedNumericChain {
    imputer: FittedMedianImputer,
    scaler: FittedStandardScaler,
}

impl FittedNumericChain {
    fn apply(&self, df: &DataFrame, columns: &[String]) -> Result<Vec<Vec<f64>>> {
        let imputed = self.imputer.transform(df)?;
        let block = collect_numeric_block(&imputed, columns)?;
        self.scaler.transform(&block)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FittedCategoricalChain {
    imputer: FittedModeImputer,
    encoder: FittedOneHotEncoder,
    scaler: FittedStandardScaler,
}

impl FittedCategoricalChain {
    fn apply(&self, df: &DataFrame) -> Result<Vec<Vec<f64>>> {
        let imputed = self.imputer.transform(df)?;
        let encoded = self.encoder.encode(&imputed)?;
        self.scaler.transform(&encoded)
    }
}

/// The fitted composite preprocessor.
///
/// Holds every learned statistic of both chains; this is the value that
/// gets persisted and later reloaded for inference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedPreprocessor {
    schema: ColumnSchema,
    numeric: FittedNumericChain,
    categorical: FittedCategoricalChain,
}

// The fitted preprocessor is plain data and crosses no thread boundary it
// cannot handle.
static_assertions::assert_impl_all!(FittedPreprocessor: Send, Sync);

impl FittedPreprocessor {
    /// Transform a feature table into a numeric matrix.
    ///
    /// The table must carry the columns the preprocessor was fit on.
    /// Output columns are the standardized numeric features followed by
    /// the scaled indicator columns, one row per input row.
    pub fn transform(&self, df: &DataFrame) -> Result<Array2<f64>> {
        if df.height() == 0 {
            return Err(PreprocessingError::EmptyTable(
                "cannot transform an empty table".to_string(),
            ));
        }

        let numeric = self.numeric.apply(df, &self.schema.numeric)?;
        let categorical = self.categorical.apply(df)?;

        let rows = df.height();
        let width = numeric.len() + categorical.len();
        let mut data = Vec::with_capacity(rows * width);
        for row in 0..rows {
            for column in numeric.iter().chain(categorical.iter()) {
                data.push(column[row]);
            }
        }

        Array2::from_shape_vec((rows, width), data)
            .map_err(|e| PreprocessingError::Internal(format!("assembling output matrix: {e}")))
    }

    /// Number of columns the transform produces.
    pub fn output_width(&self) -> usize {
        self.schema.numeric.len() + self.categorical.encoder.output_width()
    }

    /// Names of the output columns, numeric first, then `column=category`
    /// for each indicator.
    pub fn feature_names(&self) -> Vec<String> {
        self.schema
            .numeric
            .iter()
            .cloned()
            .chain(self.categorical.encoder.feature_names())
            .collect()
    }

    /// The schema the preprocessor was fit with.
    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }
}

/// Select named columns of a table as column-major `f64` vectors.
///
/// Imputation has already run by the time this is called, so a surviving
/// null means a broken invariant rather than bad input.
fn collect_numeric_block(df: &DataFrame, columns: &[String]) -> Result<Vec<Vec<f64>>> {
    let mut block = Vec::with_capacity(columns.len());
    for name in columns {
        let column = df
            .column(name)
            .map_err(|_| PreprocessingError::ColumnNotFound(name.clone()))?;
        let cast = column
            .as_materialized_series()
            .cast(&DataType::Float64)
            .map_err(|_| PreprocessingError::InvalidColumnType {
                column: name.clone(),
                expected: "numeric",
            })?;

        let mut values = Vec::with_capacity(cast.len());
        for value in cast.f64()?.into_iter() {
            values.push(value.ok_or_else(|| {
                PreprocessingError::Internal(format!("null survived imputation in '{name}'"))
            })?);
        }
        block.push(values);
    }
    Ok(block)
}
