//! Column-wise transformers.
//!
//! Each transformer follows the fit/fitted split: the unfitted value holds
//! only configuration, `fit` learns statistics from a table and returns a
//! fitted counterpart, and only fitted values can transform data. Fitted
//! state derives `serde` so a fitted pipeline can be persisted whole.

pub mod encode;
pub mod impute;
pub mod scale;

pub use encode::{FittedOneHotEncoder, OneHotEncoder};
pub use impute::{FittedMedianImputer, FittedModeImputer, MedianImputer, ModeImputer};
pub use scale::{FittedStandardScaler, StandardScaler};
