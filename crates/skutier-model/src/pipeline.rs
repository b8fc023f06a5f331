//! End-to-end orchestration: generate → engineer → {regress, forecast} → tier.

use crate::error::ModelError;
use crate::features::engineer_features;
use crate::forecast::{forecast_skus, ForecastConfig};
use crate::regressor::{evaluate_regressor, RegressorConfig};
use crate::synth::{generate_posts, GeneratorConfig};
use crate::tier::{assign_tiers, TierPolicy};
use crate::types::PipelineReport;

#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub generator: GeneratorConfig,
    pub regressor: RegressorConfig,
    pub forecast: ForecastConfig,
    pub tier_policy: TierPolicy,
}

/// Run every stage once and collect the results.
///
/// A regression failure aborts the run, as does a forecast failure unless
/// the forecast config skips short series.
///
/// # Errors
///
/// Returns the first [`ModelError`] raised by any stage.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineReport, ModelError> {
    let posts = generate_posts(&config.generator)?;
    tracing::info!(
        rows = posts.len(),
        seed = config.generator.seed,
        skus = config.generator.catalog.skus.len(),
        "synthetic posts generated"
    );

    let rows = engineer_features(posts);
    tracing::debug!(rows = rows.len(), "features engineered");

    let regression = evaluate_regressor(&rows, &config.regressor)?;
    let forecasts = forecast_skus(&rows, &config.forecast)?;
    let tiers = assign_tiers(&forecasts, config.tier_policy)?;

    tracing::info!(
        skus = tiers.tiers.len(),
        policy = ?config.tier_policy,
        "tiers assigned"
    );

    Ok(PipelineReport {
        regression,
        forecasts,
        tiers,
    })
}
