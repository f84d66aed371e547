//! Storefront session
//!
//! Owns the catalog snapshot, the cart, the filter criteria and the derived view.
//! Every mutator runs to completion before the next one, and the view is
//! recomputed synchronously whenever the catalog or the criteria change.

use chrono::{DateTime, Utc};
use crate::catalog::{decode_catalog, CatalogSource, LoadPhase};
use crate::domain::aggregates::{Cart, CartLine, Product};
use crate::domain::events::{CatalogEvent, DomainEvent};
use crate::domain::filter::{self, FilterCriteria, SortOrder};
use crate::domain::value_objects::{Money, ProductId};

#[derive(Debug, Default)]
pub struct StorefrontSession {
    catalog: Vec<Product>,
    cart: Cart,
    criteria: FilterCriteria,
    view: Vec<Product>,
    phase: LoadPhase,
    loaded_at: Option<DateTime<Utc>>,
    events: Vec<DomainEvent>,
}

impl StorefrontSession {
    /// Creates a session and loads its catalog from `source`.
    ///
    /// A failed load is logged and leaves the session usable with an empty catalog.
    pub async fn open<S: CatalogSource>(source: &S) -> Self {
        let mut session = Self::default();
        session.load(source).await;
        session
    }

    async fn load<S: CatalogSource>(&mut self, source: &S) {
        self.phase = LoadPhase::Loading;
        tracing::info!(source = %source.describe(), "loading catalog");
        match source.fetch().await.and_then(decode_catalog) {
            Ok(products) => {
                tracing::info!(products = products.len(), "catalog loaded");
                self.events.push(DomainEvent::Catalog(CatalogEvent::Loaded { product_count: products.len() }));
                self.catalog = products;
                self.loaded_at = Some(Utc::now());
                self.phase = LoadPhase::Ready;
            }
            Err(e) => {
                tracing::warn!(error = %e, "catalog load failed");
                self.events.push(DomainEvent::Catalog(CatalogEvent::LoadFailed { reason: e.to_string() }));
                self.catalog.clear();
                self.phase = LoadPhase::Failed;
            }
        }
        self.recompute();
    }

    pub fn load_phase(&self) -> LoadPhase { self.phase }
    pub fn is_loading(&self) -> bool { self.phase.is_loading() }
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> { self.loaded_at }

    pub fn catalog(&self) -> &[Product] { &self.catalog }
    pub fn product(&self, id: ProductId) -> Option<&Product> { self.catalog.iter().find(|p| p.id() == id) }
    pub fn categories(&self) -> Vec<String> { filter::categories(&self.catalog) }

    pub fn criteria(&self) -> &FilterCriteria { &self.criteria }
    pub fn filtered_products(&self) -> &[Product] { &self.view }
    /// True when the current criteria leave nothing to show.
    pub fn is_view_empty(&self) -> bool { self.view.is_empty() }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.criteria.search_term = term.into();
        self.recompute();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.criteria.category = category.into();
        self.recompute();
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.criteria.sort_order = order;
        self.recompute();
    }

    /// Replaces all three criteria at once.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.recompute();
    }

    pub fn clear_filters(&mut self) { self.set_criteria(FilterCriteria::default()); }

    pub fn cart_lines(&self) -> &[CartLine] { self.cart.lines() }
    pub fn total_items(&self) -> u64 { self.cart.total_items() }
    pub fn total_price(&self) -> Money { self.cart.total_price() }

    /// Adds one unit of a catalog product. Unknown ids are ignored.
    pub fn add_to_cart(&mut self, id: ProductId) -> bool {
        let Some(product) = self.catalog.iter().find(|p| p.id() == id) else {
            tracing::debug!(product_id = %id, "add ignored, product not in catalog");
            return false;
        };
        let changed = self.cart.add(product);
        self.drain_cart_events();
        changed
    }

    pub fn remove_from_cart(&mut self, id: ProductId) -> bool {
        let changed = self.cart.remove(id);
        self.drain_cart_events();
        changed
    }

    /// Stock is read from the catalog, not from the copy held by the cart line.
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) -> bool {
        let stock = self.product(id).map(Product::stock_count);
        let changed = self.cart.update_quantity(id, quantity, stock);
        self.drain_cart_events();
        changed
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.drain_cart_events();
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> { std::mem::take(&mut self.events) }

    fn drain_cart_events(&mut self) { self.events.extend(self.cart.take_events()); }

    fn recompute(&mut self) { self.view = filter::compute_view(&self.catalog, &self.criteria); }
}
