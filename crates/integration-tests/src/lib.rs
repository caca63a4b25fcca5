//! Shared fixtures for ElectroShop integration tests.
//!
//! # Running Tests
//!
//! The tests are ignored by default because they need a live database:
//!
//! ```bash
//! export STOREFRONT_DATABASE_URL=postgres://localhost/electroshop_test
//! cargo test -p electroshop-integration-tests -- --ignored
//! ```
//!
//! Every fixture creates rows with unique names, so tests can run in
//! parallel against one database without cleaning up.

#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use rust_decimal::Decimal;
use secrecy::SecretString;
use sqlx::PgPool;
use uuid::Uuid;

use electroshop_core::{Price, Product, ProductId};
use electroshop_storefront::db::{self, ProductRepository};

/// Connect to the test database and apply migrations.
pub async fn test_pool() -> PgPool {
    let url = std::env::var("STOREFRONT_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("STOREFRONT_DATABASE_URL must point at a test database");
    let pool = db::create_pool(&SecretString::from(url))
        .await
        .expect("Failed to connect to test database");
    db::run_migrations(&pool)
        .await
        .expect("Failed to apply migrations");
    pool
}

/// A name no other test run will produce.
#[must_use]
pub fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// Insert a product and return it as stored.
pub async fn insert_product(pool: &PgPool, price_cents: i64, stock: i32) -> Product {
    let id: i32 = sqlx::query_scalar(
        r"
        INSERT INTO product (name, price, description, image, stock)
        VALUES ($1, $2, '', '', $3)
        RETURNING id
        ",
    )
    .bind(unique("product"))
    .bind(Decimal::new(price_cents, 2))
    .bind(stock)
    .fetch_one(pool)
    .await
    .expect("Failed to insert product");

    ProductRepository::new(pool)
        .get_by_id(ProductId::new(id))
        .await
        .expect("Failed to read product")
        .expect("Inserted product is missing")
}

/// Current stock of a product.
pub async fn stock_of(pool: &PgPool, id: ProductId) -> i32 {
    sqlx::query_scalar("SELECT stock FROM product WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .expect("Failed to read stock")
}

/// Number of orders that contain `id`.
pub async fn orders_containing(pool: &PgPool, id: ProductId) -> i64 {
    sqlx::query_scalar(
        r"
        SELECT COUNT(*)
        FROM customer_order
        WHERE items @> jsonb_build_array(jsonb_build_object('product_id', $1::int))
        ",
    )
    .bind(id)
    .fetch_one(pool)
    .await
    .expect("Failed to count orders")
}

/// Number of accounts holding `username`.
pub async fn users_named(pool: &PgPool, username: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM app_user WHERE username = $1")
        .bind(username)
        .fetch_one(pool)
        .await
        .expect("Failed to count users")
}

/// Shorthand for a price in cents.
#[must_use]
pub fn price(cents: i64) -> Price {
    Price::new(Decimal::new(cents, 2)).expect("test prices are non-negative")
}

