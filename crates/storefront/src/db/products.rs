//! Product catalog repository.
//!
//! The catalog is read-mostly. Stock is decremented only by
//! [`super::OrderRepository::place`]; this repository never writes it
//! except when seeding.

use rust_decimal::Decimal;
use sqlx::PgPool;

use electroshop_core::{Price, Product, ProductId};

use super::RepositoryError;

/// Internal row type for product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    price: Decimal,
    description: String,
    image: String,
    stock: i32,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let price = Price::new(row.price).map_err(|e| {
            RepositoryError::DataCorruption(format!("product {}: {e}", row.id))
        })?;
        let stock = u32::try_from(row.stock).map_err(|_| {
            RepositoryError::DataCorruption(format!(
                "product {} has negative stock {}",
                row.id, row.stock
            ))
        })?;

        Ok(Self {
            id: ProductId::new(row.id),
            name: row.name,
            price,
            description: row.description,
            image: row.image,
            stock,
        })
    }
}

/// Repository for catalog reads.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every product, ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, price, description, image, stock
            FROM product
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, price, description, image, stock
            FROM product
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    /// Get every product whose ID is in `ids`. Unknown IDs are ignored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_many(&self, ids: &[ProductId]) -> Result<Vec<Product>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = ids.iter().map(ProductId::as_i32).collect();
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, price, description, image, stock
            FROM product
            WHERE id = ANY($1)
            ORDER BY id
            ",
        )
        .bind(ids)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    /// Insert or replace products by ID, used to seed the catalog.
    ///
    /// Also moves the ID sequence past the highest seeded ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; no product
    /// is written in that case.
    pub async fn upsert_many(&self, products: &[Product]) -> Result<u64, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let mut written = 0;

        for product in products {
            let stock = i32::try_from(product.stock).map_err(|_| {
                RepositoryError::DataCorruption(format!(
                    "stock {} for product {} does not fit the column",
                    product.stock, product.id
                ))
            })?;

            let result = sqlx::query(
                r"
                INSERT INTO product (id, name, price, description, image, stock)
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (id) DO UPDATE
                SET name = EXCLUDED.name,
                    price = EXCLUDED.price,
                    description = EXCLUDED.description,
                    image = EXCLUDED.image,
                    stock = EXCLUDED.stock
                ",
            )
            .bind(product.id)
            .bind(&product.name)
            .bind(product.price)
            .bind(&product.description)
            .bind(&product.image)
            .bind(stock)
            .execute(&mut *tx)
            .await?;
            written += result.rows_affected();
        }

        sqlx::query(
            r"
            SELECT setval(pg_get_serial_sequence('product', 'id'), COALESCE(MAX(id), 0) + 1, false)
            FROM product
            ",
        )
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(written)
    }
}
