//! HTTP catalog source

use super::{CatalogError, CatalogSource, ProductRecord};

/// Fetches the catalog with a single GET. No timeout and no retry.
#[derive(Clone, Debug)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: String,
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("opensase-storefront/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, url: url.into() })
    }
}

impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> Result<Vec<ProductRecord>, CatalogError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    fn describe(&self) -> String { self.url.clone() }
}
