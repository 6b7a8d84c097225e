//! Shared polars helpers used across the transformation modules.

use polars::prelude::*;
use std::collections::BTreeMap;

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Extract a Series as `f64` values, `None` where the entry is null.
pub fn numeric_values(series: &Series) -> PolarsResult<Vec<Option<f64>>> {
    let cast = series.cast(&DataType::Float64)?;
    Ok(cast.f64()?.into_iter().collect())
}

/// Fill null values in a numeric Series with a specific value.
pub fn fill_numeric_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let cast = series.cast(&DataType::Float64)?;
    let filled: Vec<f64> = cast
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(fill_value))
        .collect();
    Ok(Series::new(series.name().clone(), filled))
}

/// Fill null values in a string Series with a specific value.
pub fn fill_string_nulls(series: &Series, fill_value: &str) -> PolarsResult<Series> {
    let cast = series.cast(&DataType::String)?;
    let filled: Vec<String> = cast
        .str()?
        .into_iter()
        .map(|v| v.unwrap_or(fill_value).to_string())
        .collect();
    Ok(Series::new(series.name().clone(), filled))
}

/// Exact median of a slice: sorted midpoint, averaging the two middle
/// values for even counts. Returns `None` for an empty slice.
pub fn exact_median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    Some(if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    })
}

/// Calculate the mode (most frequent value) of a string Series.
///
/// Ties break to the lexicographically smallest value so the result is
/// deterministic across runs. Returns `None` when every value is null.
pub fn string_mode(series: &Series) -> Option<String> {
    let non_null = series.drop_nulls();
    if non_null.is_empty() {
        return None;
    }

    let cast = non_null.cast(&DataType::String).ok()?;
    let chunked = cast.str().ok()?;

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for value in chunked.into_iter().flatten() {
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }

    // Keys ascend, so only a strictly greater count replaces the best
    // candidate and the smallest key wins ties.
    let mut best: Option<(String, usize)> = None;
    for (value, count) in counts {
        match &best {
            Some((_, best_count)) if *best_count >= count => {}
            _ => best = Some((value, count)),
        }
    }
    best.map(|(value, _)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_median_odd() {
        assert_eq!(exact_median(&[5.0, 1.0, 3.0]), Some(3.0));
    }

    #[test]
    fn test_exact_median_even() {
        assert_eq!(exact_median(&[1.0, 3.0, 5.0, 7.0]), Some(4.0));
    }

    #[test]
    fn test_exact_median_empty() {
        assert_eq!(exact_median(&[]), None);
    }

    #[test]
    fn test_string_mode_basic() {
        let series = Series::new(
            "category".into(),
            ["A", "B", "A", "C", "A"].iter().map(|s| s.to_string()).collect::<Vec<_>>(),
        );
        assert_eq!(string_mode(&series), Some("A".to_string()));
    }

    #[test]
    fn test_string_mode_tie_breaks_to_smallest() {
        let series = Series::new(
            "category".into(),
            ["B", "A", "B", "A"].iter().map(|s| s.to_string()).collect::<Vec<_>>(),
        );
        assert_eq!(string_mode(&series), Some("A".to_string()));
    }

    #[test]
    fn test_string_mode_all_null() {
        let series = Series::new("category".into(), vec![None::<&str>, None, None]);
        assert_eq!(string_mode(&series), None);
    }

    #[test]
    fn test_fill_numeric_nulls() {
        let series = Series::new("values".into(), vec![Some(1.0), None, Some(3.0)]);
        let filled = fill_numeric_nulls(&series, 2.0).unwrap();
        assert_eq!(filled.null_count(), 0);
        let values = numeric_values(&filled).unwrap();
        assert_eq!(values, vec![Some(1.0), Some(2.0), Some(3.0)]);
    }

    #[test]
    fn test_fill_string_nulls_preserves_existing() {
        let series = Series::new("category".into(), vec![Some("A"), None, Some("B")]);
        let filled = fill_string_nulls(&series, "A").unwrap();
        assert_eq!(filled.null_count(), 0);
        let chunked = filled.str().unwrap();
        let values: Vec<&str> = chunked.into_iter().flatten().collect();
        assert_eq!(values, vec!["A", "A", "B"]);
    }

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Float64));
        assert!(is_numeric_dtype(&DataType::Int32));
        assert!(!is_numeric_dtype(&DataType::String));
    }
}
