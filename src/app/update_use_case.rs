use crate::config::{ArcoreConfig, LigarConfig};
use crate::error::Result;
use crate::pipeline::{Pipeline, PipelineResult};
use crate::sources::{ArcoreSource, LigarSource};
use tracing::{error, info};

/// Download the ARCore list and write its normalized JSON.
pub async fn update_arcore(config: &ArcoreConfig) -> Result<PipelineResult> {
    let source = ArcoreSource::new(config.url.clone(), config.timeout())?;
    Pipeline::run_for_source(&source, &config.output).await
}

/// Read the LiGAR export and write its normalized JSON.
pub async fn update_ligar(config: &LigarConfig) -> Result<PipelineResult> {
    let source = LigarSource::new(config.input.clone(), config.model_policy);
    Pipeline::run_for_source(&source, &config.output).await
}

/// Print the outcome of a run and report whether it succeeded.
pub fn report(outcome: &Result<PipelineResult>) -> bool {
    match outcome {
        Ok(result) => {
            info!(
                source = %result.source_name,
                unique = result.unique_records,
                dropped = result.rows_dropped,
                duplicates = result.duplicates,
                "Pipeline finished"
            );
            println!("Done.");
            true
        }
        Err(e) => {
            error!("Pipeline failed: {}", e);
            println!("Error: {e}");
            false
        }
    }
}
