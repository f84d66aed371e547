//! Storefront domain: products, cart, filtering and events
pub mod aggregates;
pub mod events;
pub mod filter;
pub mod value_objects;
