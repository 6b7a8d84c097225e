//! Tabular Preprocessing Pipeline Library
//!
//! A small preprocessing library for student performance modelling, built
//! with Rust and Polars.
//!
//! # Overview
//!
//! The library turns two CSV tables (training and evaluation) into numeric
//! matrices ready for model consumption:
//!
//! - **Imputation**: numeric columns filled with the column median,
//!   categorical columns with the column mode
//! - **Encoding**: categorical columns expanded into one-hot indicators
//!   with the category schema fixed at fit time
//! - **Scaling**: standardization for numeric columns, deviation-only
//!   scaling for indicator columns
//! - **Persistence**: the fitted preprocessor is written as a binary
//!   artifact and can be reloaded for inference
//!
//! Fitting happens on the training features only; the evaluation table is
//! transformed with the learned statistics and never influences them.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use score_processing::{
//!     init_file_logging, LoggingConfig, TransformationConfig, TransformationExecutor,
//! };
//!
//! init_file_logging(&LoggingConfig::default())?;
//!
//! let config = TransformationConfig::default();
//! let executor = TransformationExecutor::new(config.clone())?;
//! let output = executor.execute(&config.train_data_path, &config.eval_data_path)?;
//!
//! println!("train: {:?}", output.train.dim());
//! println!("eval: {:?}", output.eval.dim());
//! println!("preprocessor: {}", output.preprocessor_path.display());
//! ```
//!
//! The individual transformers in [`transform`] and the composite
//! [`Preprocessor`] in [`pipeline`] are public for callers that want to
//! compose their own flow.

pub mod config;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod persist;
pub mod pipeline;
pub mod transform;
pub mod utils;

// Re-exports for convenient access
pub use config::{
    ColumnSchema, ConfigValidationError, TransformationConfig, TransformationConfigBuilder,
    UnseenCategoryPolicy,
};
pub use dataset::{read_table, split_target};
pub use error::{PreprocessingError, Result as PreprocessingResult, ResultExt};
pub use logging::{LoggingConfig, init_file_logging};
pub use persist::{load_object, save_object};
pub use pipeline::{FittedPreprocessor, Preprocessor, TransformationExecutor, TransformationOutput};
pub use transform::{
    FittedMedianImputer, FittedModeImputer, FittedOneHotEncoder, FittedStandardScaler,
    MedianImputer, ModeImputer, OneHotEncoder, StandardScaler,
};
