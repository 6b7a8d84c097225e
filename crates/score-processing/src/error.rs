//! Custom error types for the preprocessing pipeline.
//!
//! A single `thiserror` enum covers every failure in the crate. Library
//! errors (polars, bincode, I/O) are converted at the call site and never
//! escape raw. The [`WithContext`](PreprocessingError::WithContext) variant
//! attaches an operation description, the call-site origin (`file:line`,
//! captured via `#[track_caller]`), and the wrapped cause.

use thiserror::Error;

/// The main error type for the preprocessing pipeline.
#[derive(Error, Debug)]
pub enum PreprocessingError {
    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// An input table with zero rows was provided.
    #[error("Empty table: {0}")]
    EmptyTable(String),

    /// No valid values found in a column for computation.
    #[error("No valid values found in column '{0}'")]
    NoValidValues(String),

    /// A column does not have the type its role requires.
    #[error("Column '{column}' is not {expected}")]
    InvalidColumnType {
        column: String,
        expected: &'static str,
    },

    /// A category appeared at transform time that was absent at fit time.
    #[error("Unknown category '{value}' in column '{column}'")]
    UnknownCategory { column: String, value: String },

    /// Data presented for transformation does not match the fitted schema.
    #[error("Schema mismatch: expected {expected}, got {got}")]
    SchemaMismatch { expected: String, got: String },

    /// A null value was encountered in the target column.
    #[error("Null value in target column '{0}'")]
    NullTarget(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Internal error (broken invariant).
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Binary serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    /// Generic error with context and call-site origin.
    #[error("{context} [{origin}]: {source}")]
    WithContext {
        context: String,
        origin: String,
        #[source]
        source: Box<PreprocessingError>,
    },
}

impl PreprocessingError {
    /// Add context to an error, recording the caller's file and line.
    #[track_caller]
    pub fn with_context(self, context: impl Into<String>) -> Self {
        let caller = std::panic::Location::caller();
        PreprocessingError::WithContext {
            context: context.into(),
            origin: format!("{}:{}", caller.file(), caller.line()),
            source: Box::new(self),
        }
    }

    /// Stable tag identifying the error kind.
    ///
    /// Context wrappers are transparent: the tag of the innermost error is
    /// reported, so callers can match on the kind regardless of how many
    /// layers of context were added along the way.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::EmptyTable(_) => "EMPTY_TABLE",
            Self::NoValidValues(_) => "NO_VALID_VALUES",
            Self::InvalidColumnType { .. } => "INVALID_COLUMN_TYPE",
            Self::UnknownCategory { .. } => "UNKNOWN_CATEGORY",
            Self::SchemaMismatch { .. } => "SCHEMA_MISMATCH",
            Self::NullTarget(_) => "NULL_TARGET",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::WithContext { source, .. } => source.kind(),
        }
    }

    /// The call-site origin of the outermost context wrapper, if any.
    pub fn origin(&self) -> Option<&str> {
        match self {
            Self::WithContext { origin, .. } => Some(origin),
            _ => None,
        }
    }
}

/// Result type alias for preprocessing operations.
pub type Result<T> = std::result::Result<T, PreprocessingError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result, recording the caller's file and line.
    #[track_caller]
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    PreprocessingError: From<E>,
{
    #[track_caller]
    fn context(self, context: impl Into<String>) -> Result<T> {
        // Capture the location before entering the closure; `#[track_caller]`
        // does not propagate through closures.
        let caller = std::panic::Location::caller();
        self.map_err(|e| PreprocessingError::WithContext {
            context: context.into(),
            origin: format!("{}:{}", caller.file(), caller.line()),
            source: Box::new(PreprocessingError::from(e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        assert_eq!(
            PreprocessingError::ColumnNotFound("test".to_string()).kind(),
            "COLUMN_NOT_FOUND"
        );
        assert_eq!(
            PreprocessingError::EmptyTable("train".to_string()).kind(),
            "EMPTY_TABLE"
        );
    }

    #[test]
    fn test_with_context_preserves_kind() {
        let error = PreprocessingError::ColumnNotFound("math_score".to_string())
            .with_context("splitting target");
        assert_eq!(error.kind(), "COLUMN_NOT_FOUND");
        assert!(error.to_string().contains("splitting target"));
        assert!(error.to_string().contains("math_score"));
    }

    #[test]
    fn test_with_context_records_origin() {
        let error =
            PreprocessingError::NoValidValues("lunch".to_string()).with_context("fitting imputer");
        let origin = error.origin().expect("origin should be recorded");
        assert!(origin.contains("error.rs"));
        assert!(origin.contains(':'));
    }

    #[test]
    fn test_result_ext_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        ));
        let wrapped = result.context("reading training table");
        let error = wrapped.unwrap_err();
        assert_eq!(error.kind(), "IO_ERROR");
        assert!(error.to_string().contains("reading training table"));
    }

    #[test]
    fn test_nested_context_reports_innermost_kind() {
        let error = PreprocessingError::UnknownCategory {
            column: "gender".to_string(),
            value: "other".to_string(),
        }
        .with_context("encoding categorical columns")
        .with_context("transforming evaluation features");
        assert_eq!(error.kind(), "UNKNOWN_CATEGORY");
    }
}
