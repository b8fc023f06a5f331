use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings for a pipeline run, resolved from the process environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    /// Fallback tracing filter directive used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Product catalog YAML. `None` selects [`crate::Catalog::builtin`].
    pub catalog_path: Option<PathBuf>,
    pub seed: u64,
    pub num_posts: usize,
}

/// Values supplied on the command line. Each one present replaces the
/// matching `SKUTIER_*` env var.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub seed: Option<u64>,
    pub num_posts: Option<usize>,
    pub catalog_path: Option<PathBuf>,
}
