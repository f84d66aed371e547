//! Cart Aggregate
//!
//! Every line holds a quantity in `[1, stock_count]`. Requests that would break
//! that bound are dropped without an error: the cart is simply left as it was.

use serde::Serialize;
use crate::domain::aggregates::Product;
use crate::domain::events::{CartEvent, DomainEvent};
use crate::domain::value_objects::{Money, ProductId, StockCount};

#[derive(Clone, Debug, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
    events: Vec<DomainEvent>,
}

/// A copy of the product as it was added, plus the quantity held.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CartLine {
    #[serde(flatten)]
    product: Product,
    quantity: u32,
}

impl CartLine {
    pub fn product(&self) -> &Product { &self.product }
    pub fn product_id(&self) -> ProductId { self.product.id() }
    pub fn quantity(&self) -> u32 { self.quantity }
    pub fn line_total(&self) -> Money { self.product.price().saturating_multiply(self.quantity) }
}

impl Cart {
    pub fn new() -> Self { Self::default() }

    pub fn lines(&self) -> &[CartLine] { &self.lines }
    pub fn is_empty(&self) -> bool { self.lines.is_empty() }
    pub fn contains(&self, product_id: ProductId) -> bool { self.line(product_id).is_some() }
    pub fn quantity_of(&self, product_id: ProductId) -> Option<u32> { self.line(product_id).map(|l| l.quantity) }

    pub fn total_items(&self) -> u64 { self.lines.iter().map(|l| u64::from(l.quantity)).sum() }
    pub fn total_price(&self) -> Money { self.lines.iter().map(CartLine::line_total).sum() }

    /// Adds one unit of `product`. Returns whether the cart changed.
    pub fn add(&mut self, product: &Product) -> bool {
        let product_id = product.id();
        let stock = product.stock_count();
        if let Some(idx) = self.position(product_id) {
            let current = self.lines[idx].quantity;
            let next = current.saturating_add(1);
            if !stock.allows(next) {
                tracing::debug!(%product_id, quantity = current, stock = stock.value(), "add rejected at stock ceiling");
                return false;
            }
            if !self.total_fits(product, next) {
                tracing::debug!(%product_id, quantity = next, "add rejected, cart total would overflow");
                return false;
            }
            self.lines[idx].quantity = next;
            self.raise_event(CartEvent::QuantityChanged { product_id, quantity: next });
            return true;
        }
        if stock.is_zero() {
            tracing::debug!(%product_id, "add rejected, product out of stock");
            return false;
        }
        if !self.total_fits(product, 1) {
            tracing::debug!(%product_id, "add rejected, cart total would overflow");
            return false;
        }
        self.lines.push(CartLine { product: product.clone(), quantity: 1 });
        self.raise_event(CartEvent::LineAdded { product_id });
        true
    }

    /// Drops the line for `product_id`. Returns whether a line was present.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id() != product_id);
        if self.lines.len() == before { return false; }
        self.raise_event(CartEvent::LineRemoved { product_id });
        true
    }

    /// Sets a line to exactly `quantity`, validated against `stock`.
    ///
    /// `quantity <= 0` removes the line. A quantity above `stock`, a missing
    /// `stock` (product not in the catalog), a missing line or a total that would
    /// overflow leaves the cart as is.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64, stock: Option<StockCount>) -> bool {
        if quantity <= 0 { return self.remove(product_id); }
        let Some(stock) = stock else {
            tracing::debug!(%product_id, "quantity update rejected, product not in catalog");
            return false;
        };
        let Ok(quantity) = u32::try_from(quantity) else {
            tracing::debug!(%product_id, quantity, "quantity update rejected, out of range");
            return false;
        };
        if !stock.allows(quantity) {
            tracing::debug!(%product_id, quantity, stock = stock.value(), "quantity update rejected above stock");
            return false;
        }
        let Some(idx) = self.position(product_id) else { return false; };
        if self.lines[idx].quantity == quantity { return false; }
        if !self.total_fits(&self.lines[idx].product, quantity) {
            tracing::debug!(%product_id, quantity, "quantity update rejected, cart total would overflow");
            return false;
        }
        self.lines[idx].quantity = quantity;
        self.raise_event(CartEvent::QuantityChanged { product_id, quantity });
        true
    }

    pub fn clear(&mut self) {
        if self.lines.is_empty() { return; }
        self.lines.clear();
        self.raise_event(CartEvent::Cleared);
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: CartEvent) { self.events.push(DomainEvent::Cart(e)); }
    fn position(&self, product_id: ProductId) -> Option<usize> { self.lines.iter().position(|l| l.product_id() == product_id) }

    /// Whether the cart total stays representable with `product` held at `quantity`.
    /// Every accepted mutation passes this check, so totals never saturate.
    fn total_fits(&self, product: &Product, quantity: u32) -> bool {
        self.lines.iter()
            .filter(|l| l.product_id() != product.id())
            .try_fold(Money::zero(), |acc, l| acc.checked_add(&l.product.price().checked_multiply(l.quantity)?))
            .and_then(|acc| acc.checked_add(&product.price().checked_multiply(quantity)?))
            .is_some()
    }

    fn line(&self, product_id: ProductId) -> Option<&CartLine> { self.lines.iter().find(|l| l.product_id() == product_id) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(id: u64, cents: i64, stock: u32) -> Product {
        Product::new(id, format!("Item {id}"), Money::new(Decimal::new(cents, 2)).unwrap(), "misc", stock)
    }

    #[test]
    fn test_add_stops_at_stock_ceiling() {
        let shirt = product(1, 2000, 2);
        let mut cart = Cart::new();
        assert!(cart.add(&shirt));
        assert!(cart.add(&shirt));
        assert!(!cart.add(&shirt));
        assert_eq!(cart.quantity_of(shirt.id()), Some(2));
        assert_eq!(cart.total_price().to_string(), "40.00");
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_add_out_of_stock_creates_no_line() {
        let mut cart = Cart::new();
        assert!(!cart.add(&product(7, 100, 0)));
        assert!(cart.is_empty());
        assert!(cart.take_events().is_empty());
    }

    #[test]
    fn test_update_quantity_bounds() {
        let p = product(1, 500, 3);
        let mut cart = Cart::new();
        cart.add(&p);
        assert!(cart.update_quantity(p.id(), 3, Some(p.stock_count())));
        assert_eq!(cart.quantity_of(p.id()), Some(3));
        assert!(!cart.update_quantity(p.id(), 4, Some(p.stock_count())));
        assert_eq!(cart.quantity_of(p.id()), Some(3));
        assert!(!cart.update_quantity(p.id(), 2, None));
        assert_eq!(cart.quantity_of(p.id()), Some(3));
        assert!(cart.update_quantity(p.id(), 0, Some(p.stock_count())));
        assert!(!cart.contains(p.id()));
    }

    #[test]
    fn test_negative_quantity_removes_line() {
        let p = product(1, 500, 3);
        let mut cart = Cart::new();
        cart.add(&p);
        assert!(cart.update_quantity(p.id(), -5, None));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_without_line_is_noop() {
        let p = product(1, 500, 3);
        let mut cart = Cart::new();
        assert!(!cart.update_quantity(p.id(), 2, Some(p.stock_count())));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = Cart::new();
        assert!(!cart.remove(ProductId::new(99)));
    }

    #[test]
    fn test_quantity_stays_in_bounds_over_mixed_sequence() {
        let items = [product(1, 100, 1), product(2, 250, 3), product(3, 999, 0)];
        let mut cart = Cart::new();
        for step in 0..40i64 {
            let p = &items[(step % 3) as usize];
            if step % 4 == 0 {
                cart.update_quantity(p.id(), step % 6 - 1, Some(p.stock_count()));
            } else {
                cart.add(p);
            }
            for line in cart.lines() {
                let stock = line.product().stock_count().value();
                assert!(line.quantity() >= 1 && line.quantity() <= stock);
            }
        }
        assert!(!cart.contains(ProductId::new(3)));
    }

    #[test]
    fn test_add_rejected_when_total_would_overflow() {
        let price = Money::new("40000000000000000000000000000".parse().unwrap()).unwrap();
        let vault = Product::new(1, "Vault", price, "misc", 5);
        let mut cart = Cart::new();
        assert!(cart.add(&vault));
        assert!(!cart.add(&vault));
        assert_eq!(cart.quantity_of(vault.id()), Some(1));
        assert!(!cart.update_quantity(vault.id(), 2, Some(vault.stock_count())));
        assert_eq!(cart.quantity_of(vault.id()), Some(1));
        assert_eq!(cart.total_price(), price);

        let second = Product::new(2, "Second Vault", price, "misc", 5);
        assert!(!cart.add(&second));
        assert!(!cart.contains(second.id()));
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_events_follow_changes() {
        let p = product(4, 100, 5);
        let mut cart = Cart::new();
        cart.add(&p);
        cart.add(&p);
        cart.clear();
        assert_eq!(cart.take_events(), vec![
            DomainEvent::Cart(CartEvent::LineAdded { product_id: p.id() }),
            DomainEvent::Cart(CartEvent::QuantityChanged { product_id: p.id(), quantity: 2 }),
            DomainEvent::Cart(CartEvent::Cleared),
        ]);
    }
}
