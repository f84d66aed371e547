//! Domain events
use crate::domain::value_objects::ProductId;

#[derive(Clone, Debug, PartialEq)]
pub enum DomainEvent {
    Catalog(CatalogEvent),
    Cart(CartEvent),
}

#[derive(Clone, Debug, PartialEq)]
pub enum CatalogEvent {
    Loaded { product_count: usize },
    LoadFailed { reason: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CartEvent {
    LineAdded { product_id: ProductId },
    QuantityChanged { product_id: ProductId, quantity: u32 },
    LineRemoved { product_id: ProductId },
    Cleared,
}
