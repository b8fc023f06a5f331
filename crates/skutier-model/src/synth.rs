//! Seeded synthetic post generator.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use skutier_core::{Catalog, Post};

use crate::error::ModelError;

/// 2024-01-01T00:00:00Z
const DEFAULT_START_TIMESTAMP: i64 = 1_704_067_200;

/// Parameters for [`generate_posts`].
///
/// Ranges are half-open: `[low, high)`.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub num_posts: usize,
    pub seed: u64,
    pub catalog: Catalog,
    pub start: DateTime<Utc>,
    pub interval_hours: u32,
    pub price_range: (f64, f64),
    pub subscriber_range: (u32, u32),
    pub score_range: (u32, u32),
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_posts: 200,
            seed: 42,
            catalog: Catalog::builtin(),
            start: DateTime::from_timestamp(DEFAULT_START_TIMESTAMP, 0).unwrap_or_default(),
            interval_hours: 6,
            price_range: (50.0, 500.0),
            subscriber_range: (10_000, 1_000_000),
            score_range: (0, 500),
        }
    }
}

impl GeneratorConfig {
    fn validate(&self) -> Result<(), ModelError> {
        if self.num_posts == 0 {
            return Err(ModelError::InvalidConfig(
                "num_posts must be greater than zero".to_string(),
            ));
        }
        if self.catalog.titles.is_empty() || self.catalog.skus.is_empty() {
            return Err(ModelError::InvalidConfig(
                "catalog needs at least one title and one sku".to_string(),
            ));
        }
        if self.interval_hours == 0 {
            return Err(ModelError::InvalidConfig(
                "interval_hours must be greater than zero".to_string(),
            ));
        }
        let (lo, hi) = self.price_range;
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(ModelError::InvalidConfig(format!(
                "price range [{lo}, {hi}) is empty or not finite"
            )));
        }
        if self.subscriber_range.0 >= self.subscriber_range.1 {
            return Err(ModelError::InvalidConfig(
                "subscriber range is empty".to_string(),
            ));
        }
        if self.score_range.0 >= self.score_range.1 {
            return Err(ModelError::InvalidConfig("score range is empty".to_string()));
        }
        Ok(())
    }
}

/// Generate `num_posts` posts, one every `interval_hours` starting at `start`.
///
/// Columns are drawn in a fixed order (title, price, subscribers, score, sku)
/// from a single `StdRng`, so the same config always yields the same table.
///
/// # Errors
///
/// Returns [`ModelError::InvalidConfig`] for an empty catalog, zero rows or
/// an empty range.
pub fn generate_posts(config: &GeneratorConfig) -> Result<Vec<Post>, ModelError> {
    config.validate()?;

    let n = config.num_posts;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let titles = &config.catalog.titles;
    let skus = &config.catalog.skus;

    let title_idx: Vec<usize> = (0..n).map(|_| rng.random_range(0..titles.len())).collect();
    let prices: Vec<f64> = (0..n)
        .map(|_| rng.random_range(config.price_range.0..config.price_range.1))
        .collect();
    let subscribers: Vec<u32> = (0..n)
        .map(|_| rng.random_range(config.subscriber_range.0..config.subscriber_range.1))
        .collect();
    let scores: Vec<u32> = (0..n)
        .map(|_| rng.random_range(config.score_range.0..config.score_range.1))
        .collect();
    let sku_idx: Vec<usize> = (0..n).map(|_| rng.random_range(0..skus.len())).collect();

    let step = i64::from(config.interval_hours);
    let mut posts = Vec::with_capacity(n);
    for i in 0..n {
        #[allow(clippy::cast_possible_wrap)]
        let offset = Duration::hours(step * i as i64);
        posts.push(Post {
            title: titles[title_idx[i]].clone(),
            price: prices[i],
            created_utc: config.start + offset,
            subscribers: subscribers[i],
            score: scores[i],
            sku: skus[sku_idx[i]].clone(),
        });
    }

    tracing::debug!(rows = n, seed = config.seed, "generated synthetic posts");
    Ok(posts)
}
