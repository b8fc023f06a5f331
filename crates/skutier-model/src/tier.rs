//! Mapping forecast scalars onto S/A/B/C/D tiers.

use std::collections::BTreeMap;

use serde::Serialize;
use skutier_core::Tier;

use crate::error::ModelError;
use crate::metrics::quantile;
use crate::types::{SkuForecast, TierReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TierPolicy {
    /// Compare each score against the 95th/80th/50th/20th percentiles.
    #[default]
    Quantile,
    /// Rank skus by score and cut at 15%/35%/60%/85% of the list.
    Rank,
}

/// Lower bounds (inclusive) for tiers S, A, B and C; anything below `c` is D.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TierThresholds {
    pub s: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl TierThresholds {
    /// Percentile thresholds of the score distribution.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InsufficientData`] for an empty or NaN-bearing
    /// score set.
    pub fn from_scores(scores: &[f64]) -> Result<Self, ModelError> {
        let at = |q: f64| {
            quantile(scores, q).ok_or_else(|| {
                ModelError::InsufficientData(
                    "tier thresholds need at least one finite score".to_string(),
                )
            })
        };
        Ok(Self {
            s: at(0.95)?,
            a: at(0.80)?,
            b: at(0.50)?,
            c: at(0.20)?,
        })
    }

    /// Highest tier whose threshold `score` reaches; a score equal to a
    /// threshold gets that threshold's tier.
    #[must_use]
    pub fn assign(&self, score: f64) -> Tier {
        if score >= self.s {
            Tier::S
        } else if score >= self.a {
            Tier::A
        } else if score >= self.b {
            Tier::B
        } else if score >= self.c {
            Tier::C
        } else {
            Tier::D
        }
    }
}

/// Tier for the item at zero-based `rank` (0 = best) out of `n`.
#[must_use]
pub fn rank_tier(rank: usize, n: usize) -> Tier {
    #[allow(clippy::cast_precision_loss)]
    let (k, n) = (rank as f64, n as f64);
    if k < 0.15 * n {
        Tier::S
    } else if k < 0.35 * n {
        Tier::A
    } else if k < 0.6 * n {
        Tier::B
    } else if k < 0.85 * n {
        Tier::C
    } else {
        Tier::D
    }
}

/// Assign a tier to every forecast sku.
///
/// # Errors
///
/// Returns [`ModelError::InsufficientData`] when there are no forecasts or a
/// forecast mean is NaN.
pub fn assign_tiers(
    forecasts: &[SkuForecast],
    policy: TierPolicy,
) -> Result<TierReport, ModelError> {
    if forecasts.is_empty() {
        return Err(ModelError::InsufficientData(
            "no sku forecasts to tier".to_string(),
        ));
    }
    if let Some(f) = forecasts.iter().find(|f| f.mean.is_nan()) {
        return Err(ModelError::InsufficientData(format!(
            "forecast mean for sku {} is NaN",
            f.sku
        )));
    }

    let scores: BTreeMap<String, f64> = forecasts
        .iter()
        .map(|f| (f.sku.clone(), f.mean))
        .collect();

    let (tiers, thresholds) = match policy {
        TierPolicy::Quantile => {
            let values: Vec<f64> = scores.values().copied().collect();
            let thresholds = TierThresholds::from_scores(&values)?;
            let tiers = scores
                .iter()
                .map(|(sku, score)| (sku.clone(), thresholds.assign(*score)))
                .collect();
            (tiers, Some(thresholds))
        }
        TierPolicy::Rank => {
            let mut ranked: Vec<(&String, f64)> = scores.iter().map(|(k, v)| (k, *v)).collect();
            ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
            let n = ranked.len();
            let tiers = ranked
                .into_iter()
                .enumerate()
                .map(|(rank, (sku, _))| (sku.clone(), rank_tier(rank, n)))
                .collect();
            (tiers, None)
        }
    };

    Ok(TierReport {
        tiers,
        scores,
        thresholds,
    })
}
