//! Product Aggregate
//!
//! Products are read-only snapshots taken when the catalog loads. Nothing in the
//! session mutates them afterwards.

use serde::Serialize;
use crate::domain::value_objects::{Money, ProductId, StockCount};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Product {
    id: ProductId,
    title: String,
    price: Money,
    description: String,
    category: String,
    image: Option<String>,
    rating: Option<f64>,
    stock_count: StockCount,
}

impl Product {
    pub fn new(id: u64, title: impl Into<String>, price: Money, category: impl Into<String>, stock_count: u32) -> Self {
        Self {
            id: ProductId::new(id), title: title.into(), price, description: String::new(),
            category: category.into(), image: None, rating: None, stock_count: StockCount::new(stock_count),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self { self.description = description.into(); self }
    pub fn with_image(mut self, url: impl Into<String>) -> Self { self.image = Some(url.into()); self }
    pub fn with_rating(mut self, rate: f64) -> Self { self.rating = Some(rate); self }

    pub fn id(&self) -> ProductId { self.id }
    pub fn title(&self) -> &str { &self.title }
    pub fn price(&self) -> &Money { &self.price }
    pub fn description(&self) -> &str { &self.description }
    pub fn category(&self) -> &str { &self.category }
    pub fn image(&self) -> Option<&str> { self.image.as_deref() }
    pub fn rating(&self) -> Option<f64> { self.rating }
    pub fn stock_count(&self) -> StockCount { self.stock_count }
    pub fn is_in_stock(&self) -> bool { !self.stock_count.is_zero() }

    /// Case-insensitive substring match on the title. An empty term matches everything.
    pub fn title_matches(&self, term: &str) -> bool {
        term.is_empty() || self.title.to_lowercase().contains(&term.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn shirt(stock: u32) -> Product {
        Product::new(1, "Red Shirt", Money::new(Decimal::new(2000, 2)).unwrap(), "clothing", stock)
    }

    #[test]
    fn test_product_create() {
        let p = shirt(2).with_image("https://img.example/1.png").with_rating(4.1);
        assert_eq!(p.title(), "Red Shirt");
        assert_eq!(p.price().to_string(), "20.00");
        assert_eq!(p.image(), Some("https://img.example/1.png"));
        assert_eq!(p.stock_count().value(), 2);
    }
    #[test]
    fn test_stock() {
        assert!(shirt(2).is_in_stock());
        assert!(!shirt(0).is_in_stock());
    }
    #[test]
    fn test_title_matches_ignores_case() {
        let p = shirt(1);
        assert!(p.title_matches("SHIRT"));
        assert!(p.title_matches(""));
        assert!(!p.title_matches("shoe"));
    }
}
