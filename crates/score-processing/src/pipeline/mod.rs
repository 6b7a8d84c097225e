//! The preprocessing pipeline: composite builder and execution.

pub mod builder;
pub mod executor;

pub use builder::{FittedPreprocessor, Preprocessor};
pub use executor::{TransformationExecutor, TransformationOutput};
