//! Catalog seeding from YAML.
//!
//! ```yaml
//! products:
//!   - id: 1
//!     name: Laptop Pro 14
//!     price: "1299.00"
//!     description: 14-inch laptop with 16 GB RAM
//!     image: images/laptop.jpg
//!     stock: 5
//! ```
//!
//! Products are upserted by ID, so re-running a seed resets names, prices and
//! stock to the file's values without touching orders.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use electroshop_core::Product;
use electroshop_storefront::db::ProductRepository;

use super::{CommandError, connect};

/// Top-level layout of a product seed file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProductSeed {
    products: Vec<Product>,
}

/// Seed catalog products from a YAML file.
///
/// The file is parsed and checked before connecting to the database.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, contains invalid
/// products, or the database write fails. Nothing is written on error.
pub async fn products(path: &Path) -> Result<(), CommandError> {
    tracing::info!(path = %path.display(), "Loading products from file");

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CommandError::Io {
            path: path.display().to_string(),
            source,
        })?;
    let products = parse_products(&content)?;
    tracing::info!(products = products.len(), "Parsed seed file");

    let pool = connect().await?;
    let written = ProductRepository::new(&pool).upsert_many(&products).await?;

    tracing::info!(written, "Seeding complete!");
    Ok(())
}

/// Parse and check a product seed document.
fn parse_products(content: &str) -> Result<Vec<Product>, CommandError> {
    let seed: ProductSeed = serde_yaml::from_str(content)?;

    let mut seen = HashSet::new();
    for product in &seed.products {
        if !seen.insert(product.id) {
            return Err(CommandError::InvalidSeed(format!(
                "duplicate product id {}",
                product.id
            )));
        }
        if product.name.trim().is_empty() {
            return Err(CommandError::InvalidSeed(format!(
                "product {} has an empty name",
                product.id
            )));
        }
    }

    Ok(seed.products)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use electroshop_core::ProductId;

    use super::*;

    #[test]
    fn test_parse_products() {
        let products = parse_products(
            r#"
products:
  - id: 1
    name: Laptop Pro 14
    price: "1299.00"
    description: 14-inch laptop
    image: images/laptop.jpg
    stock: 5
  - id: 2
    name: USB-C Cable
    price: "9.99"
    description: 1 m braided cable
    image: images/cable.jpg
    stock: 0
"#,
        )
        .unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, ProductId::new(1));
        assert_eq!(products[0].price.to_string(), "$1299.00");
        assert!(!products[1].in_stock());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let err = parse_products(
            r#"
products:
  - { id: 1, name: A, price: "1.00", description: "", image: "", stock: 1 }
  - { id: 1, name: B, price: "2.00", description: "", image: "", stock: 1 }
"#,
        )
        .unwrap_err();
        assert!(matches!(err, CommandError::InvalidSeed(ref m) if m.contains("duplicate")));
    }

    #[test]
    fn test_rejects_negative_values() {
        let negative_price = r#"
products:
  - { id: 1, name: A, price: "-1.00", description: "", image: "", stock: 1 }
"#;
        assert!(matches!(
            parse_products(negative_price),
            Err(CommandError::Yaml(_))
        ));

        let negative_stock = r#"
products:
  - { id: 1, name: A, price: "1.00", description: "", image: "", stock: -1 }
"#;
        assert!(parse_products(negative_stock).is_err());
    }

    #[test]
    fn test_rejects_blank_name() {
        let err = parse_products(
            r#"
products:
  - { id: 3, name: "  ", price: "1.00", description: "", image: "", stock: 1 }
"#,
        )
        .unwrap_err();
        assert!(matches!(err, CommandError::InvalidSeed(_)));
    }
}
