//! Session-held shopping cart.
//!
//! The cart is a plain value: handlers read it from the session, pass it to
//! the cart and checkout services, and write the result back. It never
//! touches stock; stock only moves when an order is placed.

use serde::{Deserialize, Serialize};

use crate::types::{Product, ProductId};

/// A product and the quantity selected for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// The products a session has selected, in the order they were first added.
///
/// Each product appears at most once and always with a positive quantity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add `requested` units of `product`, bounded by its current stock.
    ///
    /// The requested amount is clamped to `1..=stock`, added to any quantity
    /// already in the cart, and the sum is clamped to `stock` again. Returns
    /// the quantity now held, or `None` (leaving the cart untouched) when the
    /// product is out of stock.
    pub fn add_item(&mut self, product: &Product, requested: i64) -> Option<u32> {
        if !product.in_stock() {
            return None;
        }

        let stock = product.stock;
        let added = u32::try_from(requested.clamp(1, i64::from(stock))).unwrap_or(stock);

        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.product_id == product.id)
        {
            entry.quantity = entry.quantity.saturating_add(added).min(stock);
            return Some(entry.quantity);
        }

        self.entries.push(CartEntry {
            product_id: product.id,
            quantity: added,
        });
        Some(added)
    }

    /// Remove a product from the cart. Returns whether it was present.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.product_id != product_id);
        self.entries.len() != before
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// All entries, in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// IDs of every product in the cart.
    #[must_use]
    pub fn product_ids(&self) -> Vec<ProductId> {
        self.entries.iter().map(|e| e.product_id).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
