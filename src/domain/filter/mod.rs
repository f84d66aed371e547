//! Catalog filtering and sorting
//!
//! `compute_view` derives the displayed list from the raw catalog. Search and
//! category narrow the list conjunctively; the sort order is applied last and
//! only reorders.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use crate::domain::aggregates::Product;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    None,
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::None => "none",
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(SortOrder::None),
            "asc" | "ascending-price" => Ok(SortOrder::Asc),
            "desc" | "descending-price" => Ok(SortOrder::Desc),
            _ => Err(UnknownSortOrder(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)] pub struct UnknownSortOrder(pub String);
impl std::error::Error for UnknownSortOrder {}
impl fmt::Display for UnknownSortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Unknown sort order: {}", self.0) }
}

/// Search term, category and sort order. Empty strings mean "no filter".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    pub search_term: String,
    pub category: String,
    pub sort_order: SortOrder,
}

impl FilterCriteria {
    pub fn is_default(&self) -> bool { *self == Self::default() }

    pub fn accepts(&self, product: &Product) -> bool {
        product.title_matches(&self.search_term)
            && (self.category.is_empty() || product.category() == self.category)
    }
}

/// Filters and sorts a working copy of `catalog`; the catalog itself is untouched.
pub fn compute_view(catalog: &[Product], criteria: &FilterCriteria) -> Vec<Product> {
    let mut view: Vec<Product> = catalog.iter().filter(|p| criteria.accepts(p)).cloned().collect();
    // sort_by is stable, so equal prices keep their catalog order
    match criteria.sort_order {
        SortOrder::None => {}
        SortOrder::Asc => view.sort_by(|a, b| a.price().cmp(b.price())),
        SortOrder::Desc => view.sort_by(|a, b| b.price().cmp(a.price())),
    }
    view
}

/// Distinct categories of the whole catalog, in first-seen order.
pub fn categories(catalog: &[Product]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for product in catalog {
        if !seen.iter().any(|c| c == product.category()) {
            seen.push(product.category().to_string());
        }
    }
    seen
}
