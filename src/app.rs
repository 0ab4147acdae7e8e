use anyhow::{Context, Result};
use log::info;

use crate::{
    codec,
    config::BlendConfig,
    executor::{RowBandExecutor, RunStats},
};

/// Loads both inputs, blends them, and writes the destination image.
///
/// Returns the run statistics so the caller can report the timing.
pub fn run(config: &BlendConfig) -> Result<RunStats> {
    let (source, help) = codec::load_pair(&config.source_path, &config.help_path)?;

    let mut executor = RowBandExecutor::from_config(config);
    let blended = executor
        .run(&source, &help)
        .with_context(|| format!("blending '{}'", config.source_path.display()))?;

    codec::save(&blended.image, &config.dest_path)?;
    info!(
        "wrote '{}' after {} repetitions on {} workers",
        config.dest_path.display(),
        config.repetitions,
        config.workers
    );

    Ok(blended.stats)
}
