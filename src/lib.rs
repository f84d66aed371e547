//! OpenSASE Storefront
//!
//! Client-side storefront session: loads a product catalog once, derives a
//! searchable, filterable, sortable view of it and keeps a shopping cart whose
//! quantities never exceed product stock.
//!
//! ## Features
//! - Catalog loading over HTTP or from a local JSON snapshot
//! - Case-insensitive title search, category filter, stable price sort
//! - Stock-bounded cart with item and price totals
//! - JSON API binding for a presentation layer

pub mod api;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod session;

pub use catalog::{CatalogError, CatalogSource, FileCatalogSource, HttpCatalogSource, LoadPhase, StaticCatalogSource};
pub use config::StorefrontConfig;
pub use domain::aggregates::{Cart, CartLine, Product};
pub use domain::filter::{compute_view, FilterCriteria, SortOrder};
pub use domain::value_objects::{Money, ProductId, StockCount};
pub use session::StorefrontSession;

use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
