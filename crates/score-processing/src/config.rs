//! Configuration types for the transformation pipeline.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic pipeline setup. The defaults reproduce the
//! student performance dataset layout: five categorical feature columns,
//! two numeric feature columns, and `math_score` as the target.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Policy for categories seen at transform time but absent at fit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum UnseenCategoryPolicy {
    /// Emit all-zero indicators for the affected column. The fitted output
    /// width is preserved regardless of what the evaluation table contains.
    #[default]
    Ignore,
    /// Fail the transform with an error naming the column and value.
    Error,
}

/// Partition of a table's columns into feature groups and the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Continuous feature columns (imputed with the median, standardized).
    pub numeric: Vec<String>,
    /// Nominal feature columns (imputed with the mode, one-hot encoded).
    pub categorical: Vec<String>,
    /// The prediction target, carried through unmodified.
    pub target: String,
}

impl ColumnSchema {
    pub fn new(
        numeric: impl IntoIterator<Item = impl Into<String>>,
        categorical: impl IntoIterator<Item = impl Into<String>>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            numeric: numeric.into_iter().map(Into::into).collect(),
            categorical: categorical.into_iter().map(Into::into).collect(),
            target: target.into(),
        }
    }

    /// All feature columns, numeric first, in declaration order.
    pub fn feature_columns(&self) -> impl Iterator<Item = &str> {
        self.numeric
            .iter()
            .chain(self.categorical.iter())
            .map(String::as_str)
    }

    /// Validate the schema and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.numeric.is_empty() && self.categorical.is_empty() {
            return Err(ConfigValidationError::EmptySchema);
        }
        if self.target.is_empty() {
            return Err(ConfigValidationError::EmptyTarget);
        }

        let mut seen = std::collections::HashSet::new();
        for name in self.feature_columns() {
            if !seen.insert(name) {
                return Err(ConfigValidationError::DuplicateColumn(name.to_string()));
            }
        }

        if seen.contains(self.target.as_str()) {
            return Err(ConfigValidationError::TargetIsFeature(self.target.clone()));
        }

        Ok(())
    }
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self::new(
            ["writing_score", "reading_score"],
            [
                "gender",
                "race_ethnicity",
                "parental_level_of_education",
                "lunch",
                "test_preparation_course",
            ],
            "math_score",
        )
    }
}

/// Configuration for the transformation pipeline.
///
/// Use [`TransformationConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use score_processing::config::{ColumnSchema, TransformationConfig, UnseenCategoryPolicy};
///
/// let config = TransformationConfig::builder()
///     .schema(ColumnSchema::new(["age"], ["city"], "income"))
///     .unseen_category_policy(UnseenCategoryPolicy::Error)
///     .preprocessor_path("artifacts/preprocessor.bin")
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformationConfig {
    /// Path of the training table.
    /// Default: "artifacts/train.csv"
    pub train_data_path: PathBuf,

    /// Path of the evaluation table.
    /// Default: "artifacts/test.csv"
    pub eval_data_path: PathBuf,

    /// Path where the fitted preprocessor is stored, overwritten per run.
    /// Default: "artifacts/preprocessor.bin"
    pub preprocessor_path: PathBuf,

    /// Column partition used to build the preprocessor.
    pub schema: ColumnSchema,

    /// How the encoder treats categories unseen at fit time.
    /// Default: Ignore
    pub unseen_category_policy: UnseenCategoryPolicy,
}

impl Default for TransformationConfig {
    fn default() -> Self {
        Self {
            train_data_path: PathBuf::from("artifacts/train.csv"),
            eval_data_path: PathBuf::from("artifacts/test.csv"),
            preprocessor_path: PathBuf::from("artifacts/preprocessor.bin"),
            schema: ColumnSchema::default(),
            unseen_category_policy: UnseenCategoryPolicy::default(),
        }
    }
}

impl TransformationConfig {
    /// Create a new configuration builder.
    pub fn builder() -> TransformationConfigBuilder {
        TransformationConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.schema.validate()
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Schema declares no feature columns")]
    EmptySchema,

    #[error("Schema declares no target column")]
    EmptyTarget,

    #[error("Column '{0}' appears more than once in the schema")]
    DuplicateColumn(String),

    #[error("Target column '{0}' is also declared as a feature")]
    TargetIsFeature(String),
}

/// Builder for [`TransformationConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct TransformationConfigBuilder {
    train_data_path: Option<PathBuf>,
    eval_data_path: Option<PathBuf>,
    preprocessor_path: Option<PathBuf>,
    schema: Option<ColumnSchema>,
    unseen_category_policy: Option<UnseenCategoryPolicy>,
}

impl TransformationConfigBuilder {
    /// Set the training table path.
    pub fn train_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.train_data_path = Some(path.into());
        self
    }

    /// Set the evaluation table path.
    pub fn eval_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.eval_data_path = Some(path.into());
        self
    }

    /// Set the path where the fitted preprocessor artifact is written.
    pub fn preprocessor_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.preprocessor_path = Some(path.into());
        self
    }

    /// Set the column schema.
    pub fn schema(mut self, schema: ColumnSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Set the policy for categories unseen at fit time.
    pub fn unseen_category_policy(mut self, policy: UnseenCategoryPolicy) -> Self {
        self.unseen_category_policy = Some(policy);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `TransformationConfig` or an error if validation
    /// fails.
    pub fn build(self) -> Result<TransformationConfig, ConfigValidationError> {
        let config = TransformationConfig {
            train_data_path: self
                .train_data_path
                .unwrap_or_else(|| PathBuf::from("artifacts/train.csv")),
            eval_data_path: self
                .eval_data_path
                .unwrap_or_else(|| PathBuf::from("artifacts/test.csv")),
            preprocessor_path: self
                .preprocessor_path
                .unwrap_or_else(|| PathBuf::from("artifacts/preprocessor.bin")),
            schema: self.schema.unwrap_or_default(),
            unseen_category_policy: self.unseen_category_policy.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TransformationConfig::default();
        assert_eq!(
            config.preprocessor_path.to_str().unwrap(),
            "artifacts/preprocessor.bin"
        );
        assert_eq!(config.schema.numeric.len(), 2);
        assert_eq!(config.schema.categorical.len(), 5);
        assert_eq!(config.schema.target, "math_score");
        assert_eq!(
            config.unseen_category_policy,
            UnseenCategoryPolicy::Ignore
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_custom_values() {
        let config = TransformationConfig::builder()
            .schema(ColumnSchema::new(["age"], ["city"], "income"))
            .unseen_category_policy(UnseenCategoryPolicy::Error)
            .preprocessor_path("out/model.bin")
            .train_data_path("data/a.csv")
            .eval_data_path("data/b.csv")
            .build()
            .unwrap();

        assert_eq!(config.schema.target, "income");
        assert_eq!(config.unseen_category_policy, UnseenCategoryPolicy::Error);
        assert_eq!(config.preprocessor_path.to_str().unwrap(), "out/model.bin");
        assert_eq!(config.train_data_path.to_str().unwrap(), "data/a.csv");
    }

    #[test]
    fn test_feature_columns_numeric_first() {
        let schema = ColumnSchema::default();
        let columns: Vec<&str> = schema.feature_columns().collect();
        assert_eq!(columns[0], "writing_score");
        assert_eq!(columns[1], "reading_score");
        assert_eq!(columns[2], "gender");
        assert_eq!(columns.len(), 7);
    }

    #[test]
    fn test_validation_duplicate_column() {
        let schema = ColumnSchema::new(["score", "score"], ["city"], "income");
        assert!(matches!(
            schema.validate(),
            Err(ConfigValidationError::DuplicateColumn(_))
        ));
    }

    #[test]
    fn test_validation_target_is_feature() {
        let schema = ColumnSchema::new(["income"], ["city"], "income");
        assert!(matches!(
            schema.validate(),
            Err(ConfigValidationError::TargetIsFeature(_))
        ));
    }

    #[test]
    fn test_validation_empty_schema() {
        let schema = ColumnSchema::new(Vec::<String>::new(), Vec::<String>::new(), "income");
        assert!(matches!(
            schema.validate(),
            Err(ConfigValidationError::EmptySchema)
        ));
    }

    #[test]
    fn test_config_serialization() {
        let config = TransformationConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: TransformationConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config.schema, deserialized.schema);
        assert_eq!(
            config.unseen_category_policy,
            deserialized.unseen_category_policy
        );
    }
}
