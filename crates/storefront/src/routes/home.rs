//! Catalog listing.

use axum::{Json, extract::State};
use tracing::instrument;

use electroshop_core::Product;

use crate::db::ProductRepository;
use crate::error::Result;
use crate::state::AppState;

/// List every product, ordered by ID.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list_all().await?;
    Ok(Json(products))
}
