use std::collections::BTreeMap;

use serde::Serialize;
use skutier_core::{Post, Tier};

use crate::tier::TierThresholds;

/// A post plus the features derived from it by
/// [`engineer_features`](crate::features::engineer_features).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRow {
    pub post: Post,
    /// Hour of day, 0–23.
    pub hour: u32,
    /// Day of week, Monday = 0.
    pub dow: u32,
    /// Hours between this post and the newest post in the table.
    pub age_hours: f64,
    pub score_per_hour: f64,
    /// Score normalized by age and community size; the demand proxy.
    pub norm_score: f64,
    /// Trailing mean of `norm_score` over the last 7 posts of the same sku.
    pub lag7_mean: f64,
}

/// Hold-out evaluation of the demand regressor.
#[derive(Debug, Clone, Serialize)]
pub struct RegressionReport {
    pub mae: f64,
    pub train_rows: usize,
    pub test_rows: usize,
    /// Coefficients left non-zero after the L1 penalty.
    pub nonzero_coefficients: usize,
    pub converged: bool,
}

/// Short-horizon forecast of one sku's normalized score.
#[derive(Debug, Clone, Serialize)]
pub struct SkuForecast {
    pub sku: String,
    pub observations: usize,
    pub horizon: Vec<f64>,
    /// Mean of `horizon`; the scalar that gets tiered.
    pub mean: f64,
    /// Innovation variance estimated from the in-sample residuals.
    pub sigma2: f64,
    pub converged: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TierReport {
    pub tiers: BTreeMap<String, Tier>,
    pub scores: BTreeMap<String, f64>,
    /// Present for quantile tiering only.
    pub thresholds: Option<TierThresholds>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub regression: RegressionReport,
    pub forecasts: Vec<SkuForecast>,
    pub tiers: TierReport,
}
