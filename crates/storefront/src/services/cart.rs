//! Session cart operations.

use serde::Serialize;
use sqlx::PgPool;
use tracing::instrument;

use electroshop_core::{Cart, Price, Product, ProductId};

use crate::db::{ProductRepository, RepositoryError};

/// A cart entry resolved against the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
    pub subtotal: Price,
}

/// The cart as shown to the customer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub total: Price,
}

/// Add `requested` units of a product to `cart`, bounded by current stock.
///
/// Unknown and sold-out products leave the cart unchanged.
///
/// # Errors
///
/// Returns `RepositoryError` if the product lookup fails.
#[instrument(skip(pool, cart), fields(product_id = %product_id))]
pub async fn add_to_cart(
    pool: &PgPool,
    mut cart: Cart,
    product_id: ProductId,
    requested: i64,
) -> Result<Cart, RepositoryError> {
    let Some(product) = ProductRepository::new(pool).get_by_id(product_id).await? else {
        tracing::debug!("Ignoring add for unknown product");
        return Ok(cart);
    };

    match cart.add_item(&product, requested) {
        Some(quantity) => tracing::debug!(quantity, "Cart updated"),
        None => tracing::debug!("Ignoring add for sold-out product"),
    }
    Ok(cart)
}

/// Load the products in `cart` and build its view.
///
/// # Errors
///
/// Returns `RepositoryError` if the product lookup fails.
pub async fn load_cart_view(pool: &PgPool, cart: &Cart) -> Result<CartView, RepositoryError> {
    if cart.is_empty() {
        return Ok(CartView::default());
    }
    let catalog = ProductRepository::new(pool)
        .get_many(&cart.product_ids())
        .await?;
    Ok(cart_view(cart, &catalog))
}

/// Resolve `cart` against `catalog`, skipping entries whose product is missing.
#[must_use]
pub fn cart_view(cart: &Cart, catalog: &[Product]) -> CartView {
    let lines: Vec<CartLine> = cart
        .entries()
        .iter()
        .filter_map(|entry| {
            let product = catalog.iter().find(|p| p.id == entry.product_id)?;
            Some(CartLine {
                subtotal: product.price.times(entry.quantity),
                quantity: entry.quantity,
                product: product.clone(),
            })
        })
        .collect();
    let total = lines.iter().map(|line| line.subtotal).sum();

    CartView { lines, total }
}
