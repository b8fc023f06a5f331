mod commands;
mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "skutier")]
#[command(about = "Synthetic demand scoring and product tiering")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the full pipeline and print the regression MAE and sku tiers
    Run {
        /// RNG seed (overrides `SKUTIER_SEED`)
        #[arg(long)]
        seed: Option<u64>,

        /// Number of synthetic posts (overrides `SKUTIER_NUM_POSTS`)
        #[arg(long)]
        posts: Option<usize>,

        /// Catalog YAML (overrides `SKUTIER_CATALOG_PATH`)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// How forecast scores are mapped to tiers
        #[arg(long, value_enum, default_value_t = TierPolicyArg::Quantile)]
        tier_policy: TierPolicyArg,

        /// Leave out skus with too little history instead of failing
        #[arg(long)]
        skip_short_series: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the synthetic post table as JSON lines
    Generate {
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        posts: Option<usize>,

        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Print only the first N posts
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TierPolicyArg {
    Quantile,
    Rank,
}

impl From<TierPolicyArg> for skutier_model::TierPolicy {
    fn from(arg: TierPolicyArg) -> Self {
        match arg {
            TierPolicyArg::Quantile => skutier_model::TierPolicy::Quantile,
            TierPolicyArg::Rank => skutier_model::TierPolicy::Rank,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl Commands {
    /// Flag values that replace the matching env vars.
    fn config_overrides(&self) -> skutier_core::ConfigOverrides {
        match self {
            Commands::Run {
                seed,
                posts,
                catalog,
                ..
            }
            | Commands::Generate {
                seed,
                posts,
                catalog,
                ..
            } => skutier_core::ConfigOverrides {
                seed: *seed,
                num_posts: *posts,
                catalog_path: catalog.clone(),
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let overrides = cli
        .command
        .as_ref()
        .map(Commands::config_overrides)
        .unwrap_or_default();

    let config = skutier_core::load_app_config(&overrides)?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Run {
            tier_policy,
            skip_short_series,
            format,
            ..
        }) => {
            commands::run_pipeline_command(&config, tier_policy.into(), skip_short_series, format)?;
        }
        Some(Commands::Generate { limit, .. }) => {
            commands::run_generate_command(&config, limit)?;
        }
        None => println!("skutier: use `skutier run` or `skutier generate` (see --help)"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
