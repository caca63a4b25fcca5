//! Cart route handlers.
//!
//! The cart is read from the session, updated, and written back on every
//! request; stock is only consulted, never changed, here.

use std::num::IntErrorKind;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use electroshop_core::ProductId;

use crate::error::{Result, add_breadcrumb};
use crate::middleware::{load_cart, save_cart};
use crate::services::cart::{CartView, add_to_cart, load_cart_view};
use crate::state::AppState;

/// Query parameters for adding to the cart.
#[derive(Debug, Default, Deserialize)]
pub struct AddQuery {
    /// Requested quantity; anything that is not an integer counts as 1.
    pub qty: Option<String>,
}

impl AddQuery {
    /// Out-of-range integers saturate so the cart still clamps them to stock.
    fn requested(&self) -> i64 {
        let Some(qty) = self.qty.as_deref() else {
            return 1;
        };
        match qty.trim().parse::<i64>() {
            Ok(n) => n,
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => i64::MAX,
                IntErrorKind::NegOverflow => i64::MIN,
                _ => 1,
            },
        }
    }
}

/// Show the cart.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<CartView>> {
    let cart = load_cart(&session).await?;
    Ok(Json(load_cart_view(state.pool(), &cart).await?))
}

/// Add a product to the cart, clamped to its stock.
#[instrument(skip(state, session, query), fields(product_id = %id))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ProductId>,
    Query(query): Query<AddQuery>,
) -> Result<Json<CartView>> {
    let requested = query.requested();
    let cart = add_to_cart(state.pool(), load_cart(&session).await?, id, requested).await?;
    save_cart(&session, &cart).await?;

    add_breadcrumb(
        "cart",
        "Added to cart",
        &[("product_id", id.to_string()), ("requested", requested.to_string())],
    );

    Ok(Json(load_cart_view(state.pool(), &cart).await?))
}

/// Remove a product from the cart.
#[instrument(skip(state, session), fields(product_id = %id))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ProductId>,
) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    if cart.remove(id) {
        save_cart(&session, &cart).await?;
    }
    Ok(Json(load_cart_view(state.pool(), &cart).await?))
}

#[cfg(test)]
mod tests {
    use electroshop_core::{Cart, Price, Product};

    use super::*;

    fn query(qty: Option<&str>) -> AddQuery {
        AddQuery {
            qty: qty.map(str::to_owned),
        }
    }

    #[test]
    fn test_requested_quantity() {
        assert_eq!(query(Some("3")).requested(), 3);
        assert_eq!(query(Some(" 2 ")).requested(), 2);
        assert_eq!(query(Some("-4")).requested(), -4);
        assert_eq!(query(Some("lots")).requested(), 1);
        assert_eq!(query(Some("")).requested(), 1);
        assert_eq!(query(None).requested(), 1);
        assert_eq!(query(Some("99999999999999999999")).requested(), i64::MAX);
        assert_eq!(query(Some("-99999999999999999999")).requested(), i64::MIN);
    }

    #[test]
    fn test_oversized_quantity_clamps_to_stock() {
        let product = Product {
            id: ProductId::new(1),
            name: "Laptop".to_string(),
            price: Price::ZERO,
            description: String::new(),
            image: String::new(),
            stock: 5,
        };
        let mut cart = Cart::default();
        cart.add_item(&product, query(Some("99999999999999999999")).requested());
        assert_eq!(cart.entries()[0].quantity, 5);
    }
}
