//! Local JSON snapshot of the catalog

use std::path::PathBuf;
use super::{CatalogError, CatalogSource, ProductRecord};

#[derive(Clone, Debug)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }
}

impl CatalogSource for FileCatalogSource {
    async fn fetch(&self) -> Result<Vec<ProductRecord>, CatalogError> {
        let contents = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&contents)?)
    }

    fn describe(&self) -> String { self.path.display().to_string() }
}
