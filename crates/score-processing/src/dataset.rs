//! Table loading and target separation.

use crate::error::{PreprocessingError, Result, ResultExt};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::Path;

/// Read a delimited-text table with a header row.
///
/// Schema inference looks at the first 100 rows, matching the behaviour of
/// the downstream consumers. An empty table is rejected here so later
/// stages can assume at least one row.
pub fn read_table(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();

    let df = CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .context(format!("opening table at {}", path.display()))?
        .finish()
        .context(format!("reading table at {}", path.display()))?;

    if df.height() == 0 {
        return Err(PreprocessingError::EmptyTable(path.display().to_string()));
    }

    Ok(df)
}

/// Separate the target column from a table.
///
/// Returns the remaining feature columns and the target values as `f64`.
/// The target is never imputed; a null entry is an error.
pub fn split_target(df: &DataFrame, target: &str) -> Result<(DataFrame, Vec<f64>)> {
    let column = df
        .column(target)
        .map_err(|_| PreprocessingError::ColumnNotFound(target.to_string()))?;

    let series = column.as_materialized_series();
    let cast = series
        .cast(&DataType::Float64)
        .map_err(|_| PreprocessingError::InvalidColumnType {
            column: target.to_string(),
            expected: "numeric",
        })?;

    let mut values = Vec::with_capacity(cast.len());
    for value in cast.f64()?.into_iter() {
        match value {
            Some(v) => values.push(v),
            None => return Err(PreprocessingError::NullTarget(target.to_string())),
        }
    }

    let features = df.drop(target)?;
    Ok((features, values))
}
