//! Checkout: validate the cart and form, then place the order.

use sqlx::PgPool;
use thiserror::Error;
use tracing::instrument;

use electroshop_core::checkout::{CheckoutForm, CheckoutViolation, ValidationErrors, plan_checkout};
use electroshop_core::{Cart, Order, UserId};

use crate::db::{OrderRepository, ProductRepository, RepositoryError};

/// Errors from a checkout attempt.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The submission was refused; nothing was written.
    #[error("checkout rejected: {0}")]
    Rejected(ValidationErrors),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Checkout service.
pub struct CheckoutService<'a> {
    products: ProductRepository<'a>,
    orders: OrderRepository<'a>,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            products: ProductRepository::new(pool),
            orders: OrderRepository::new(pool),
        }
    }

    /// Check out `cart` for an optional user.
    ///
    /// The caller owns the cart and must clear it only when this returns
    /// `Ok`; on any error neither stock nor orders have changed.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Rejected` with every validation message, or with
    /// the insufficient-stock message when another checkout took the stock
    /// between validation and the guarded decrement.
    /// Returns `CheckoutError::Repository` for database failures.
    #[instrument(skip(self, form, cart), fields(items = cart.len()))]
    pub async fn checkout(
        &self,
        form: &CheckoutForm,
        cart: &Cart,
        user_id: Option<UserId>,
    ) -> Result<Order, CheckoutError> {
        let catalog = self.products.get_many(&cart.product_ids()).await?;
        let pending = plan_checkout(form, cart, &catalog).map_err(|errors| {
            tracing::info!(errors = %errors, "Checkout rejected");
            CheckoutError::Rejected(errors)
        })?;

        match self.orders.place(&pending, user_id).await {
            Ok(order) => {
                tracing::info!(order_id = %order.id, total = %order.total, "Order placed");
                Ok(order)
            }
            Err(RepositoryError::StockConflict { product_name, .. }) => {
                Err(CheckoutError::Rejected(ValidationErrors::single(
                    CheckoutViolation::InsufficientStock { product_name },
                )))
            }
            Err(e) => Err(e.into()),
        }
    }
}
