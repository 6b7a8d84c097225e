//! One-hot encoding for categorical columns.
//!
//! The category set of each column is learned at fit time and fixed from
//! then on: every category becomes one indicator column, in sorted order,
//! so the encoded width never depends on the table being transformed.

use crate::config::UnseenCategoryPolicy;
use crate::error::{PreprocessingError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// One-hot encoder (unfitted).
#[derive(Debug, Clone)]
pub struct OneHotEncoder {
    columns: Vec<String>,
    policy: UnseenCategoryPolicy,
}

impl OneHotEncoder {
    pub fn new(
        columns: impl IntoIterator<Item = impl Into<String>>,
        policy: UnseenCategoryPolicy,
    ) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            policy,
        }
    }

    /// Learn the distinct non-null categories of each configured column.
    ///
    /// # Errors
    ///
    /// Fails on an empty table, a missing column, or a column whose values
    /// are all null.
    pub fn fit(&self, df: &DataFrame) -> Result<FittedOneHotEncoder> {
        if df.height() == 0 {
            return Err(PreprocessingError::EmptyTable(
                "cannot fit one-hot encoder on an empty table".to_string(),
            ));
        }

        let mut categories = Vec::with_capacity(self.columns.len());
        for name in &self.columns {
            let column = df
                .column(name)
                .map_err(|_| PreprocessingError::ColumnNotFound(name.clone()))?;
            let cast = column.as_materialized_series().cast(&DataType::String)?;

            let mut distinct = BTreeSet::new();
            for value in cast.str()?.into_iter().flatten() {
                distinct.insert(value.to_string());
            }
            if distinct.is_empty() {
                return Err(PreprocessingError::NoValidValues(name.clone()));
            }

            categories.push((name.clone(), distinct.into_iter().collect::<Vec<_>>()));
        }

        Ok(FittedOneHotEncoder {
            categories,
            policy: self.policy,
        })
    }
}

/// Fitted one-hot encoder holding the per-column category schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedOneHotEncoder {
    categories: Vec<(String, Vec<String>)>,
    policy: UnseenCategoryPolicy,
}

impl FittedOneHotEncoder {
    /// Total number of indicator columns produced.
    pub fn output_width(&self) -> usize {
        self.categories.iter().map(|(_, cats)| cats.len()).sum()
    }

    /// Names of the indicator columns, as `column=category`.
    pub fn feature_names(&self) -> Vec<String> {
        self.categories
            .iter()
            .flat_map(|(name, cats)| cats.iter().map(move |cat| format!("{name}={cat}")))
            .collect()
    }

    /// The learned categories of each column, in encoding order.
    pub fn categories(&self) -> &[(String, Vec<String>)] {
        &self.categories
    }

    /// Expand the configured columns into indicator vectors.
    ///
    /// Output is column-major: one `Vec<f64>` of length `df.height()` per
    /// indicator column, grouped by source column in fit order. How a value
    /// absent from the fitted categories is treated depends on the policy:
    /// all-zero indicators for `Ignore`, an error for `Error`. Nulls count
    /// as unseen values.
    pub fn encode(&self, df: &DataFrame) -> Result<Vec<Vec<f64>>> {
        let rows = df.height();
        let mut output = Vec::with_capacity(self.output_width());

        for (name, cats) in &self.categories {
            let column = df
                .column(name)
                .map_err(|_| PreprocessingError::ColumnNotFound(name.clone()))?;
            let cast = column.as_materialized_series().cast(&DataType::String)?;

            let index: HashMap<&str, usize> = cats
                .iter()
                .enumerate()
                .map(|(i, cat)| (cat.as_str(), i))
                .collect();

            let mut indicators = vec![vec![0.0; rows]; cats.len()];
            for (row, value) in cast.str()?.into_iter().enumerate() {
                let looked_up = value.and_then(|v| index.get(v));
                match looked_up {
                    Some(&cat_index) => indicators[cat_index][row] = 1.0,
                    None => match self.policy {
                        UnseenCategoryPolicy::Ignore => {}
                        UnseenCategoryPolicy::Error => {
                            return Err(PreprocessingError::UnknownCategory {
                                column: name.clone(),
                                value: value.unwrap_or("<null>").to_string(),
                            });
                        }
                    },
                }
            }

            output.extend(indicators);
        }

        Ok(output)
    }
}
