use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "SKUTIER_ENV"));
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map), &ConfigOverrides::default());
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.catalog_path.is_none());
    assert_eq!(cfg.seed, 42);
    assert_eq!(cfg.num_posts, 200);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("SKUTIER_ENV", "production");
    map.insert("SKUTIER_LOG_LEVEL", "debug");
    map.insert("SKUTIER_CATALOG_PATH", "./config/catalog.yaml");
    map.insert("SKUTIER_SEED", "7");
    map.insert("SKUTIER_NUM_POSTS", "500");
    let cfg = build_app_config(lookup_from_map(&map), &ConfigOverrides::default()).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(
        cfg.catalog_path,
        Some(PathBuf::from("./config/catalog.yaml"))
    );
    assert_eq!(cfg.seed, 7);
    assert_eq!(cfg.num_posts, 500);
}

#[test]
fn build_app_config_blank_catalog_path_is_none() {
    let mut map = HashMap::new();
    map.insert("SKUTIER_CATALOG_PATH", "  ");
    let cfg = build_app_config(lookup_from_map(&map), &ConfigOverrides::default()).unwrap();
    assert!(cfg.catalog_path.is_none());
}

#[test]
fn build_app_config_fails_with_invalid_seed() {
    let mut map = HashMap::new();
    map.insert("SKUTIER_SEED", "not-a-number");
    let result = build_app_config(lookup_from_map(&map), &ConfigOverrides::default());
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SKUTIER_SEED"),
        "expected InvalidEnvVar(SKUTIER_SEED), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_negative_num_posts() {
    let mut map = HashMap::new();
    map.insert("SKUTIER_NUM_POSTS", "-5");
    let result = build_app_config(lookup_from_map(&map), &ConfigOverrides::default());
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SKUTIER_NUM_POSTS"),
        "expected InvalidEnvVar(SKUTIER_NUM_POSTS), got: {result:?}"
    );
}

#[test]
fn build_app_config_passes_zero_num_posts_through() {
    let mut map = HashMap::new();
    map.insert("SKUTIER_NUM_POSTS", "0");
    let cfg = build_app_config(lookup_from_map(&map), &ConfigOverrides::default()).unwrap();
    assert_eq!(cfg.num_posts, 0);
}

#[test]
fn overrides_replace_env_values() {
    let mut map = HashMap::new();
    map.insert("SKUTIER_SEED", "7");
    map.insert("SKUTIER_NUM_POSTS", "500");
    map.insert("SKUTIER_CATALOG_PATH", "./config/catalog.yaml");
    let overrides = ConfigOverrides {
        seed: Some(9),
        num_posts: Some(50),
        catalog_path: Some(PathBuf::from("/tmp/other.yaml")),
    };
    let cfg = build_app_config(lookup_from_map(&map), &overrides).unwrap();
    assert_eq!(cfg.seed, 9);
    assert_eq!(cfg.num_posts, 50);
    assert_eq!(cfg.catalog_path, Some(PathBuf::from("/tmp/other.yaml")));
}

#[test]
fn overridden_env_values_are_not_parsed() {
    let mut map = HashMap::new();
    map.insert("SKUTIER_SEED", "-1");
    map.insert("SKUTIER_NUM_POSTS", "0");
    let overrides = ConfigOverrides {
        seed: Some(5),
        num_posts: Some(200),
        catalog_path: None,
    };
    let cfg = build_app_config(lookup_from_map(&map), &overrides).unwrap();
    assert_eq!(cfg.seed, 5);
    assert_eq!(cfg.num_posts, 200);
}

#[test]
fn invalid_env_value_without_override_fails() {
    let mut map = HashMap::new();
    map.insert("SKUTIER_SEED", "abc");
    let overrides = ConfigOverrides {
        num_posts: Some(200),
        ..ConfigOverrides::default()
    };
    let result = build_app_config(lookup_from_map(&map), &overrides);
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SKUTIER_SEED"),
        "expected InvalidEnvVar(SKUTIER_SEED), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_unknown_env() {
    let mut map = HashMap::new();
    map.insert("SKUTIER_ENV", "staging");
    let result = build_app_config(lookup_from_map(&map), &ConfigOverrides::default());
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SKUTIER_ENV"),
        "expected InvalidEnvVar(SKUTIER_ENV), got: {result:?}"
    );
}
