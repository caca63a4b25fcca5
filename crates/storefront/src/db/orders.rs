//! Order repository.
//!
//! Placing an order is the only write path for product stock. The order
//! insert and every stock decrement share one transaction, and each
//! decrement is a guarded `UPDATE ... WHERE stock >= $qty` whose affected
//! row count is checked, so two checkouts racing for the last units cannot
//! both commit.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;

use electroshop_core::checkout::PendingOrder;
use electroshop_core::{
    Order, OrderId, OrderItem, PaymentInfo, PaymentMethod, Price, UserId,
};

use super::RepositoryError;

/// Internal row type for order queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    user_id: Option<i32>,
    name: String,
    address: String,
    payment_method: String,
    payment_info: Option<Json<PaymentInfo>>,
    items: Json<Vec<OrderItem>>,
    total: Decimal,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let payment_method = PaymentMethod::parse(&row.payment_method).ok_or_else(|| {
            RepositoryError::DataCorruption(format!(
                "order {} has unknown payment method '{}'",
                row.id, row.payment_method
            ))
        })?;
        let total = Price::new(row.total)
            .map_err(|e| RepositoryError::DataCorruption(format!("order {}: {e}", row.id)))?;

        Ok(Self {
            id: OrderId::new(row.id),
            user_id: row.user_id.map(UserId::new),
            name: row.name,
            address: row.address,
            payment_method,
            payment_info: row.payment_info.map(|Json(info)| info),
            items: row.items.0,
            total,
            created_at: row.created_at,
        })
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist an order and take its items out of stock, atomically.
    ///
    /// Stock is decremented in ascending product ID order. If any guarded
    /// decrement matches no row the transaction is rolled back: no order is
    /// written and no stock changes.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::StockConflict` naming the first product that
    /// no longer had enough stock.
    /// Returns `RepositoryError::Database` if any statement fails.
    pub async fn place(
        &self,
        pending: &PendingOrder,
        user_id: Option<UserId>,
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let (id, created_at): (i32, DateTime<Utc>) = sqlx::query_as(
            r"
            INSERT INTO customer_order
                (user_id, name, address, payment_method, payment_info, items, total)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, created_at
            ",
        )
        .bind(user_id)
        .bind(&pending.name)
        .bind(&pending.address)
        .bind(pending.payment_method.as_str())
        .bind(pending.payment_info.as_ref().map(Json))
        .bind(Json(&pending.items))
        .bind(pending.total)
        .fetch_one(&mut *tx)
        .await?;

        for decrement in pending.stock_decrements() {
            let conflict = || RepositoryError::StockConflict {
                product_id: decrement.product_id,
                product_name: decrement.product_name.clone(),
            };
            let quantity = i32::try_from(decrement.quantity).map_err(|_| conflict())?;

            let result = sqlx::query(
                r"
                UPDATE product
                SET stock = stock - $1
                WHERE id = $2 AND stock >= $1
                ",
            )
            .bind(quantity)
            .bind(decrement.product_id)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                tx.rollback().await?;
                tracing::warn!(
                    product_id = %decrement.product_id,
                    quantity = decrement.quantity,
                    "Guarded stock decrement matched no row, order rolled back"
                );
                return Err(conflict());
            }
        }

        tx.commit().await?;

        Ok(pending
            .clone()
            .into_order(OrderId::new(id), user_id, created_at))
    }

    /// Get an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored row is invalid.
    pub async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, user_id, name, address, payment_method, payment_info,
                   items, total, created_at
            FROM customer_order
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Order::try_from).transpose()
    }

    /// List a user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored row is invalid.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, user_id, name, address, payment_method, payment_info,
                   items, total, created_at
            FROM customer_order
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }
}
