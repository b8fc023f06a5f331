//! Per-sku seasonal ARIMA forecasts of the normalized score.

use std::collections::BTreeMap;

use crate::error::ModelError;
use crate::sarima::{FitError, Sarima, SarimaOrder};
use crate::types::{FeatureRow, SkuForecast};

/// What to do with a sku whose history is too short for the seasonal model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShortSeriesPolicy {
    /// Abort the run with [`ModelError::InsufficientHistory`].
    #[default]
    Fail,
    /// Log a warning and leave the sku out of the forecasts.
    Skip,
}

#[derive(Debug, Clone)]
pub struct ForecastConfig {
    pub order: SarimaOrder,
    pub horizon: usize,
    pub short_series: ShortSeriesPolicy,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            order: SarimaOrder::default(),
            horizon: 7,
            short_series: ShortSeriesPolicy::Fail,
        }
    }
}

/// Fit one model per sku on its chronological `norm_score` series and
/// reduce each `horizon`-step forecast to its mean.
///
/// Skus are processed in sorted order; each model is independent of the
/// others.
///
/// # Errors
///
/// Returns [`ModelError::InsufficientHistory`] for a short series under
/// [`ShortSeriesPolicy::Fail`] and [`ModelError::ForecastFailed`] when a
/// fit diverges or yields non-finite forecasts.
pub fn forecast_skus(
    rows: &[FeatureRow],
    config: &ForecastConfig,
) -> Result<Vec<SkuForecast>, ModelError> {
    if config.horizon == 0 {
        return Err(ModelError::InvalidConfig(
            "forecast horizon must be at least one step".to_string(),
        ));
    }

    let mut forecasts = Vec::new();
    for (sku, series) in group_series(rows) {
        match forecast_one(&sku, &series, config) {
            Ok(forecast) => forecasts.push(forecast),
            Err(ModelError::InsufficientHistory {
                sku,
                observed,
                required,
            }) if config.short_series == ShortSeriesPolicy::Skip => {
                tracing::warn!(
                    sku = %sku,
                    observed,
                    required,
                    "skipping sku with too little history for the seasonal model"
                );
            }
            Err(e) => return Err(e),
        }
    }

    Ok(forecasts)
}

fn forecast_one(
    sku: &str,
    series: &[f64],
    config: &ForecastConfig,
) -> Result<SkuForecast, ModelError> {
    let fitted = Sarima::new(config.order)
        .fit(series)
        .map_err(|e| match e {
            FitError::TooShort { observed, required } => ModelError::InsufficientHistory {
                sku: sku.to_string(),
                observed,
                required,
            },
            FitError::NonFinite(reason) => ModelError::ForecastFailed {
                sku: sku.to_string(),
                reason,
            },
            FitError::InvalidOrder(reason) => ModelError::InvalidConfig(reason),
        })?;

    if !fitted.converged {
        tracing::warn!(
            sku = %sku,
            iterations = fitted.iterations,
            "seasonal model optimizer hit its iteration limit"
        );
    }

    let horizon = fitted.forecast(config.horizon);
    if horizon.iter().any(|v| !v.is_finite()) {
        return Err(ModelError::ForecastFailed {
            sku: sku.to_string(),
            reason: "forecast contains non-finite values".to_string(),
        });
    }

    #[allow(clippy::cast_precision_loss)]
    let mean = horizon.iter().sum::<f64>() / horizon.len() as f64;

    tracing::info!(
        sku = %sku,
        observations = series.len(),
        order = %config.order,
        forecast_mean = mean,
        "sku forecast complete"
    );

    Ok(SkuForecast {
        sku: sku.to_string(),
        observations: series.len(),
        horizon,
        mean,
        sigma2: fitted.sigma2,
        converged: fitted.converged,
    })
}

/// `norm_score` series per sku, each in ascending timestamp order.
fn group_series(rows: &[FeatureRow]) -> BTreeMap<String, Vec<f64>> {
    let mut ordered: Vec<&FeatureRow> = rows.iter().collect();
    ordered.sort_by_key(|r| r.post.created_utc);

    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for row in ordered {
        groups
            .entry(row.post.sku.clone())
            .or_default()
            .push(row.norm_score);
    }
    groups
}
