//! Runtime configuration, read from the environment

use std::path::PathBuf;
use crate::{Result, StorefrontError};

pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com/products";
pub const DEFAULT_PORT: u16 = 8083;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorefrontConfig {
    pub catalog_url: String,
    /// When set, the catalog is read from this file instead of `catalog_url`.
    pub catalog_file: Option<PathBuf>,
    pub port: u16,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self { catalog_url: DEFAULT_CATALOG_URL.to_string(), catalog_file: None, port: DEFAULT_PORT }
    }
}

impl StorefrontConfig {
    /// Reads `CATALOG_URL`, `CATALOG_FILE` and `PORT` from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let catalog_url = lookup("CATALOG_URL").filter(|v| !v.trim().is_empty()).unwrap_or(defaults.catalog_url);
        let catalog_file = lookup("CATALOG_FILE").filter(|v| !v.trim().is_empty()).map(PathBuf::from);
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>()
                .map_err(|e| StorefrontError::Config(format!("invalid PORT {raw:?}: {e}")))?,
            None => defaults.port,
        };
        tracing::debug!(%catalog_url, ?catalog_file, port, "configuration resolved");
        Ok(Self { catalog_url, catalog_file, port })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        assert_eq!(StorefrontConfig::from_lookup(lookup(&[])).unwrap(), StorefrontConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("CATALOG_URL", "http://localhost:9000/products"),
            ("CATALOG_FILE", "catalog.json"),
            ("PORT", "9090"),
        ])).unwrap();
        assert_eq!(config.catalog_url, "http://localhost:9000/products");
        assert_eq!(config.catalog_file, Some(PathBuf::from("catalog.json")));
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn test_bad_port() {
        let err = StorefrontConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, StorefrontError::Config(_)));
    }
}
