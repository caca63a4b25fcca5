//! Catalog product.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A purchasable product as stored in the catalog.
///
/// `stock` is the only attribute that changes after seeding, and only through
/// the guarded decrement performed when an order is placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub description: String,
    /// Path or URL of the product image.
    pub image: String,
    pub stock: u32,
}

impl Product {
    /// Whether at least one unit can be added to a cart.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}
