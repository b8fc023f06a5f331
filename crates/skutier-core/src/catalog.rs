use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Post title vocabulary and product identifiers used by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub titles: Vec<String>,
    pub skus: Vec<String>,
}

impl Catalog {
    /// The catalog used when no catalog file is configured.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            titles: [
                "Great deal on Gadget",
                "New launch leak",
                "Review: Gadget",
                "Discount on Gadget",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            skus: ["sku_a", "sku_b", "sku_c"]
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Load and validate a product catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<Catalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_catalog(&content)
}

/// Parse and validate catalog YAML already held in memory.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_catalog(content: &str) -> Result<Catalog, ConfigError> {
    let catalog: Catalog = serde_yaml::from_str(content)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

fn validate_catalog(catalog: &Catalog) -> Result<(), ConfigError> {
    if catalog.titles.is_empty() {
        return Err(ConfigError::Validation(
            "catalog must list at least one title".to_string(),
        ));
    }
    if catalog.skus.is_empty() {
        return Err(ConfigError::Validation(
            "catalog must list at least one sku".to_string(),
        ));
    }

    let mut seen_titles = HashSet::new();
    for title in &catalog.titles {
        if title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "title must be non-empty".to_string(),
            ));
        }
        if !seen_titles.insert(title.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate title: '{title}'"
            )));
        }
    }

    let mut seen_skus = HashSet::new();
    for sku in &catalog.skus {
        if sku.trim().is_empty() {
            return Err(ConfigError::Validation("sku must be non-empty".to_string()));
        }
        if !seen_skus.insert(sku.to_lowercase()) {
            return Err(ConfigError::Validation(format!("duplicate sku: '{sku}'")));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.titles.len(), 4);
        assert_eq!(catalog.skus, vec!["sku_a", "sku_b", "sku_c"]);
        validate_catalog(&catalog).unwrap();
    }

    #[test]
    fn parse_catalog_reads_titles_and_skus() {
        let yaml = "titles:\n  - Budget pick\n  - Flagship review\nskus:\n  - widget\n";
        let catalog = parse_catalog(yaml).unwrap();
        assert_eq!(catalog.titles, vec!["Budget pick", "Flagship review"]);
        assert_eq!(catalog.skus, vec!["widget"]);
    }

    #[test]
    fn parse_catalog_rejects_malformed_yaml() {
        let err = parse_catalog("titles: [unterminated").unwrap_err();
        assert!(matches!(err, ConfigError::CatalogFileParse(_)));
    }

    #[test]
    fn validate_rejects_empty_titles() {
        let catalog = Catalog {
            titles: vec![],
            skus: vec!["sku_a".to_string()],
        };
        let err = validate_catalog(&catalog).unwrap_err();
        assert!(err.to_string().contains("at least one title"));
    }

    #[test]
    fn validate_rejects_empty_skus() {
        let catalog = Catalog {
            titles: vec!["New launch leak".to_string()],
            skus: vec![],
        };
        let err = validate_catalog(&catalog).unwrap_err();
        assert!(err.to_string().contains("at least one sku"));
    }

    #[test]
    fn validate_rejects_blank_sku() {
        let catalog = Catalog {
            titles: vec!["New launch leak".to_string()],
            skus: vec!["  ".to_string()],
        };
        let err = validate_catalog(&catalog).unwrap_err();
        assert!(err.to_string().contains("sku must be non-empty"));
    }

    #[test]
    fn validate_rejects_duplicate_sku_case_insensitive() {
        let catalog = Catalog {
            titles: vec!["New launch leak".to_string()],
            skus: vec!["SKU_A".to_string(), "sku_a".to_string()],
        };
        let err = validate_catalog(&catalog).unwrap_err();
        assert!(err.to_string().contains("duplicate sku"));
    }

    #[test]
    fn validate_rejects_duplicate_title() {
        let catalog = Catalog {
            titles: vec!["Review: Gadget".to_string(), "Review: Gadget".to_string()],
            skus: vec!["sku_a".to_string()],
        };
        let err = validate_catalog(&catalog).unwrap_err();
        assert!(err.to_string().contains("duplicate title"));
    }

    #[test]
    fn load_catalog_reports_missing_file_path() {
        let err = load_catalog(Path::new("/nonexistent/catalog.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::CatalogFileIo { ref path, .. } if path.contains("catalog.yaml")));
    }

    #[test]
    fn shipped_catalog_file_matches_builtin() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("catalog.yaml");
        let catalog = load_catalog(&path).expect("failed to load config/catalog.yaml");
        assert_eq!(catalog, Catalog::builtin());
    }
}
