//! Domain types and configuration shared by the skutier crates.

pub mod app_config;
pub mod catalog;
pub mod config;
pub mod error;
pub mod posts;

pub use app_config::{AppConfig, ConfigOverrides, Environment};
pub use catalog::{load_catalog, Catalog};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use posts::{Post, Tier};
