use clap::Parser;

use super::*;

#[test]
fn run_defaults() {
    let cli = Cli::try_parse_from(["skutier", "run"]).unwrap();
    match cli.command {
        Some(Commands::Run {
            seed,
            posts,
            catalog,
            tier_policy,
            skip_short_series,
            format,
        }) => {
            assert_eq!(seed, None);
            assert_eq!(posts, None);
            assert_eq!(catalog, None);
            assert_eq!(tier_policy, TierPolicyArg::Quantile);
            assert!(!skip_short_series);
            assert_eq!(format, OutputFormat::Text);
        }
        other => panic!("expected run, got {other:?}"),
    }
}

#[test]
fn run_accepts_all_flags() {
    let cli = Cli::try_parse_from([
        "skutier",
        "run",
        "--seed",
        "7",
        "--posts",
        "500",
        "--catalog",
        "config/catalog.yaml",
        "--tier-policy",
        "rank",
        "--skip-short-series",
        "--format",
        "json",
    ])
    .unwrap();
    match cli.command {
        Some(Commands::Run {
            seed,
            posts,
            catalog,
            tier_policy,
            skip_short_series,
            format,
        }) => {
            assert_eq!(seed, Some(7));
            assert_eq!(posts, Some(500));
            assert_eq!(catalog, Some(PathBuf::from("config/catalog.yaml")));
            assert_eq!(tier_policy, TierPolicyArg::Rank);
            assert!(skip_short_series);
            assert_eq!(format, OutputFormat::Json);
        }
        other => panic!("expected run, got {other:?}"),
    }
}

#[test]
fn unknown_tier_policy_is_rejected() {
    assert!(Cli::try_parse_from(["skutier", "run", "--tier-policy", "median"]).is_err());
}

#[test]
fn negative_posts_are_rejected() {
    assert!(Cli::try_parse_from(["skutier", "run", "--posts", "-5"]).is_err());
}

#[test]
fn generate_with_limit() {
    let cli = Cli::try_parse_from(["skutier", "generate", "--seed", "3", "--limit", "10"]).unwrap();
    match cli.command {
        Some(Commands::Generate { seed, limit, .. }) => {
            assert_eq!(seed, Some(3));
            assert_eq!(limit, Some(10));
        }
        other => panic!("expected generate, got {other:?}"),
    }
}

#[test]
fn no_subcommand_parses() {
    let cli = Cli::try_parse_from(["skutier"]).unwrap();
    assert!(cli.command.is_none());
}

#[test]
fn tier_policy_arg_maps_to_model_policy() {
    assert_eq!(
        skutier_model::TierPolicy::from(TierPolicyArg::Rank),
        skutier_model::TierPolicy::Rank
    );
    assert_eq!(
        skutier_model::TierPolicy::from(TierPolicyArg::Quantile),
        skutier_model::TierPolicy::Quantile
    );
}

#[test]
fn run_flags_become_config_overrides() {
    let cli = Cli::try_parse_from(["skutier", "run", "--posts", "200", "--seed", "5"]).unwrap();
    let overrides = cli.command.unwrap().config_overrides();
    assert_eq!(overrides.num_posts, Some(200));
    assert_eq!(overrides.seed, Some(5));
    assert_eq!(overrides.catalog_path, None);
}

#[test]
fn generate_flags_become_config_overrides() {
    let cli = Cli::try_parse_from(["skutier", "generate", "--catalog", "other.yaml"]).unwrap();
    let overrides = cli.command.unwrap().config_overrides();
    assert_eq!(overrides.catalog_path, Some(PathBuf::from("other.yaml")));
    assert_eq!(overrides.seed, None);
    assert_eq!(overrides.num_posts, None);
}

#[test]
fn help_is_reported_by_the_parser() {
    let err = Cli::try_parse_from(["skutier", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}
