//! Command handlers for the CLI.

use std::io::Write;

use skutier_core::{AppConfig, Catalog};
use skutier_model::{
    run_pipeline, ForecastConfig, GeneratorConfig, PipelineConfig, ShortSeriesPolicy,
    TierPolicy,
};

use crate::report::render_text;
use crate::OutputFormat;

/// Catalog from `--catalog` or `SKUTIER_CATALOG_PATH`, else the built-in one.
fn resolve_catalog(config: &AppConfig) -> anyhow::Result<Catalog> {
    match &config.catalog_path {
        Some(path) => {
            let catalog = skutier_core::load_catalog(path)?;
            tracing::debug!(path = %path.display(), skus = catalog.skus.len(), "catalog loaded");
            Ok(catalog)
        }
        None => Ok(Catalog::builtin()),
    }
}

pub(crate) fn generator_config(config: &AppConfig) -> anyhow::Result<GeneratorConfig> {
    if config.num_posts == 0 {
        anyhow::bail!("number of posts (--posts or SKUTIER_NUM_POSTS) must be greater than zero");
    }
    Ok(GeneratorConfig {
        num_posts: config.num_posts,
        seed: config.seed,
        catalog: resolve_catalog(config)?,
        ..GeneratorConfig::default()
    })
}

/// Run every pipeline stage and print the report to stdout.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or any stage fails.
pub(crate) fn run_pipeline_command(
    config: &AppConfig,
    tier_policy: TierPolicy,
    skip_short_series: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let pipeline = PipelineConfig {
        generator: generator_config(config)?,
        forecast: ForecastConfig {
            short_series: if skip_short_series {
                ShortSeriesPolicy::Skip
            } else {
                ShortSeriesPolicy::Fail
            },
            ..ForecastConfig::default()
        },
        tier_policy,
        ..PipelineConfig::default()
    };

    tracing::info!(env = %config.env, seed = pipeline.generator.seed, "starting pipeline run");
    let report = run_pipeline(&pipeline)?;

    match format {
        OutputFormat::Text => print!("{}", render_text(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

/// Print generated posts as one JSON object per line.
///
/// # Errors
///
/// Returns an error if generation fails or stdout cannot be written.
pub(crate) fn run_generate_command(config: &AppConfig, limit: Option<usize>) -> anyhow::Result<()> {
    let posts = skutier_model::generate_posts(&generator_config(config)?)?;
    let take = limit.unwrap_or(posts.len());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for post in posts.iter().take(take) {
        serde_json::to_writer(&mut out, post)?;
        writeln!(out)?;
    }
    Ok(())
}
