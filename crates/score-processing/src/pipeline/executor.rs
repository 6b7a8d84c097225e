//! Transformation execution.
//!
//! The executor drives one full preprocessing run: read both tables, fit
//! the preprocessor on the training features only, transform both tables,
//! append the target, and persist the fitted preprocessor. Everything is
//! synchronous; a failure aborts the run and propagates to the caller
//! with context attached.

use crate::config::TransformationConfig;
use crate::dataset::{read_table, split_target};
use crate::error::{PreprocessingError, Result, ResultExt};
use crate::persist::save_object;
use crate::pipeline::builder::Preprocessor;
use ndarray::Array2;
use std::path::{Path, PathBuf};
use tracing::info;

/// The arrays produced by a transformation run, plus where the fitted
/// preprocessor was stored.
#[derive(Debug)]
pub struct TransformationOutput {
    /// Training features with the target appended as the last column.
    pub train: Array2<f64>,
    /// Evaluation features with the target appended as the last column.
    pub eval: Array2<f64>,
    /// Path of the persisted fitted preprocessor.
    pub preprocessor_path: PathBuf,
}

/// Executes the transformation pipeline for one pair of tables.
#[derive(Debug, Clone)]
pub struct TransformationExecutor {
    config: TransformationConfig,
}

impl TransformationExecutor {
    /// Create an executor with a validated configuration.
    pub fn new(config: TransformationConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| PreprocessingError::InvalidConfig(e.to_string()))?;
        Ok(Self { config })
    }

    /// The executor's configuration.
    pub fn config(&self) -> &TransformationConfig {
        &self.config
    }

    /// Run the transformation over the given training and evaluation tables.
    ///
    /// The evaluation table never influences fitting: the preprocessor is
    /// fit on the training features alone and then applied to both tables.
    pub fn execute(
        &self,
        train_path: impl AsRef<Path>,
        eval_path: impl AsRef<Path>,
    ) -> Result<TransformationOutput> {
        let train_df = read_table(&train_path).context("reading training table")?;
        let eval_df = read_table(&eval_path).context("reading evaluation table")?;
        info!(
            "Read train and eval tables: {:?} / {:?}",
            train_df.shape(),
            eval_df.shape()
        );

        let target = self.config.schema.target.as_str();
        let (train_features, train_target) =
            split_target(&train_df, target).context("splitting target from training table")?;
        let (eval_features, eval_target) =
            split_target(&eval_df, target).context("splitting target from evaluation table")?;

        info!("Obtaining preprocessing object");
        let preprocessor = Preprocessor::from_config(&self.config);

        info!("Applying preprocessing object on training and evaluation tables");
        let fitted = preprocessor
            .fit(&train_features)
            .context("fitting preprocessor on training features")?;
        let train_arr = fitted
            .transform(&train_features)
            .context("transforming training features")?;
        let eval_arr = fitted
            .transform(&eval_features)
            .context("transforming evaluation features")?;

        let train = append_target(train_arr, &train_target)?;
        let eval = append_target(eval_arr, &eval_target)?;

        save_object(&self.config.preprocessor_path, &fitted)
            .context("saving fitted preprocessor")?;
        info!(
            "Saved preprocessing object to {}",
            self.config.preprocessor_path.display()
        );

        Ok(TransformationOutput {
            train,
            eval,
            preprocessor_path: self.config.preprocessor_path.clone(),
        })
    }
}

/// Append the target as the last column of a feature matrix.
fn append_target(features: Array2<f64>, target: &[f64]) -> Result<Array2<f64>> {
    let (rows, cols) = features.dim();
    if rows != target.len() {
        return Err(PreprocessingError::SchemaMismatch {
            expected: format!("{rows} target values"),
            got: format!("{}", target.len()),
        });
    }

    let mut data = Vec::with_capacity(rows * (cols + 1));
    for (row_index, row) in features.rows().into_iter().enumerate() {
        data.extend(row.iter().copied());
        data.push(target[row_index]);
    }

    Array2::from_shape_vec((rows, cols + 1), data)
        .map_err(|e| PreprocessingError::Internal(format!("appending target column: {e}")))
}
