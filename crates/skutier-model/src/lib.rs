//! Demand scoring and tiering for products mentioned in social-media posts.
//!
//! Generates a seeded synthetic post table, derives recency and community-size
//! normalized engagement features, evaluates an elastic-net regressor on a
//! chronological hold-out, forecasts each product with a seasonal ARIMA model
//! and buckets the forecasts into S/A/B/C/D tiers.

pub mod elastic_net;
pub mod error;
pub mod features;
pub mod forecast;
pub mod metrics;
pub mod optimize;
pub mod pipeline;
pub mod regressor;
pub mod sarima;
pub mod scaler;
pub mod synth;
pub mod tfidf;
pub mod tier;
pub mod types;

pub use error::ModelError;
pub use features::engineer_features;
pub use forecast::{forecast_skus, ForecastConfig, ShortSeriesPolicy};
pub use pipeline::{run_pipeline, PipelineConfig};
pub use regressor::{chronological_split, evaluate_regressor, RegressorConfig};
pub use sarima::{Sarima, SarimaOrder};
pub use synth::{generate_posts, GeneratorConfig};
pub use tier::{assign_tiers, TierPolicy, TierThresholds};
pub use types::{FeatureRow, PipelineReport, RegressionReport, SkuForecast, TierReport};
