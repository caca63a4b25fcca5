//! Order history for the logged-in customer.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use electroshop_core::{Order, OrderId};

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// List the user's orders, newest first.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;
    Ok(Json(orders))
}

/// Show one of the user's orders.
///
/// Orders placed by someone else answer 404, same as unknown ids.
#[instrument(skip(state, user), fields(user_id = %user.id, order_id = %id))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<OrderId>,
) -> Result<Json<Order>> {
    OrderRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .filter(|order| order.user_id == Some(user.id))
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))
}
