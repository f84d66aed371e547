//! Catalog loading
//!
//! The catalog is fetched once per session from a [`CatalogSource`]. Sources hand
//! back raw [`ProductRecord`]s in the wire format; [`decode_catalog`] turns them
//! into immutable [`Product`]s.

mod file;
mod http;

pub use file::FileCatalogSource;
pub use http::HttpCatalogSource;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::future::Future;
use thiserror::Error;
use crate::domain::aggregates::Product;
use crate::domain::value_objects::{Money, ProductId};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Catalog endpoint returned HTTP {0}")]
    Status(u16),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed catalog: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid product {id}: {reason}")]
    InvalidRecord { id: u64, reason: String },
}

/// One product as delivered by the catalog endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: u64,
    pub title: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub image: Option<String>,
    pub rating: RatingRecord,
}

/// `count` doubles as the stock available to the cart.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RatingRecord {
    #[serde(default)]
    pub rate: Option<f64>,
    pub count: u32,
}

impl TryFrom<ProductRecord> for Product {
    type Error = CatalogError;

    fn try_from(r: ProductRecord) -> Result<Self, Self::Error> {
        let price = Money::new(r.price).map_err(|e| CatalogError::InvalidRecord { id: r.id, reason: e.to_string() })?;
        let mut product = Product::new(r.id, r.title, price, r.category, r.rating.count).with_description(r.description);
        if let Some(url) = r.image { product = product.with_image(url); }
        if let Some(rate) = r.rating.rate { product = product.with_rating(rate); }
        Ok(product)
    }
}

/// Converts wire records into the session catalog, keeping the first record for
/// any repeated id.
pub fn decode_catalog(records: Vec<ProductRecord>) -> Result<Vec<Product>, CatalogError> {
    let mut products: Vec<Product> = Vec::with_capacity(records.len());
    for record in records {
        let id = ProductId::new(record.id);
        if products.iter().any(|p| p.id() == id) {
            tracing::warn!(product_id = %id, "duplicate product id in catalog, keeping first");
            continue;
        }
        products.push(Product::try_from(record)?);
    }
    Ok(products)
}

/// Where the catalog comes from.
pub trait CatalogSource {
    fn fetch(&self) -> impl Future<Output = Result<Vec<ProductRecord>, CatalogError>> + Send;

    /// Label for logs.
    fn describe(&self) -> String;
}

/// Catalog held in memory, for demos and tests.
#[derive(Clone, Debug, Default)]
pub struct StaticCatalogSource {
    records: Vec<ProductRecord>,
}

impl StaticCatalogSource {
    pub fn new(records: Vec<ProductRecord>) -> Self { Self { records } }
}

impl CatalogSource for StaticCatalogSource {
    async fn fetch(&self) -> Result<Vec<ProductRecord>, CatalogError> { Ok(self.records.clone()) }
    fn describe(&self) -> String { format!("static catalog ({} records)", self.records.len()) }
}

/// Load lifecycle: `Pending -> Loading -> Ready | Failed`. There is no way back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPhase {
    #[default]
    Pending,
    Loading,
    Ready,
    Failed,
}

impl LoadPhase {
    pub fn is_loading(&self) -> bool { *self == LoadPhase::Loading }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, price: &str, count: u32) -> ProductRecord {
        ProductRecord {
            id, title: format!("Item {id}"), price: price.parse().unwrap(), description: String::new(),
            category: "misc".into(), image: None, rating: RatingRecord { rate: Some(3.5), count },
        }
    }

    #[test]
    fn test_decode_wire_format() {
        let json = r#"[{"id":1,"title":"Fjallraven Backpack","price":109.95,"description":"Bag",
            "category":"men's clothing","image":"https://img.example/1.jpg","rating":{"rate":3.9,"count":120}}]"#;
        let records: Vec<ProductRecord> = serde_json::from_str(json).unwrap();
        let products = decode_catalog(records).unwrap();
        assert_eq!(products.len(), 1);
        let p = &products[0];
        assert_eq!(p.price().to_string(), "109.95");
        assert_eq!(p.stock_count().value(), 120);
        assert_eq!(p.category(), "men's clothing");
        assert_eq!(p.rating(), Some(3.9));
    }

    #[test]
    fn test_missing_rating_is_decode_error() {
        let json = r#"[{"id":1,"title":"X","price":1.0,"category":"c"}]"#;
        assert!(serde_json::from_str::<Vec<ProductRecord>>(json).is_err());
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let mut second = record(1, "9.00", 1);
        second.title = "Imposter".into();
        let products = decode_catalog(vec![record(1, "1.00", 1), second, record(2, "2.00", 0)]).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].title(), "Item 1");
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = decode_catalog(vec![record(3, "-1.00", 1)]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRecord { id: 3, .. }));
    }

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticCatalogSource::new(vec![record(1, "1.00", 1)]);
        assert_eq!(source.fetch().await.unwrap().len(), 1);
    }
}
