//! Process entry point for the transformation pipeline.
//!
//! Runs the full transformation over the fixed artifact paths: no CLI
//! flags, no environment variables. All output goes to the timestamped
//! log file; on failure the wrapped error message is logged and returned.

use anyhow::Result;
use score_processing::{
    LoggingConfig, TransformationConfig, TransformationExecutor, init_file_logging,
};
use tracing::{error, info};

fn main() -> Result<()> {
    init_file_logging(&LoggingConfig::default())?;

    let config = TransformationConfig::default();
    let executor = TransformationExecutor::new(config.clone())?;

    match executor.execute(&config.train_data_path, &config.eval_data_path) {
        Ok(output) => {
            info!(
                "Training array: {} rows x {} columns",
                output.train.nrows(),
                output.train.ncols()
            );
            info!(
                "Evaluation array: {} rows x {} columns",
                output.eval.nrows(),
                output.eval.ncols()
            );
            info!(
                "Fitted preprocessor stored at {}",
                output.preprocessor_path.display()
            );
            Ok(())
        }
        Err(e) => {
            error!("Transformation failed: {e}");
            Err(e.into())
        }
    }
}
