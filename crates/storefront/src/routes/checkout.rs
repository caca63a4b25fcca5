//! Checkout route handlers.

use axum::{Form, Json, extract::State};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use electroshop_core::Order;
use electroshop_core::checkout::CheckoutForm;

use crate::error::Result;
use crate::middleware::{RequireAuth, load_cart, save_cart};
use crate::services::CheckoutService;
use crate::state::AppState;

/// Initial values for the checkout form.
#[derive(Debug, Serialize)]
pub struct CheckoutPrefill {
    pub name: String,
    pub address: String,
}

/// Successful checkout response.
#[derive(Debug, Serialize)]
pub struct CheckoutSuccess {
    pub success: bool,
    pub order: Order,
}

/// Checkout form prefill: the user's name, nothing else.
pub async fn prefill(RequireAuth(user): RequireAuth) -> Json<CheckoutPrefill> {
    Json(CheckoutPrefill {
        name: user.username.to_string(),
        address: String::new(),
    })
}

/// Place an order for the session cart.
///
/// On success the cart is emptied. Rejected submissions answer 422 with
/// every validation message and leave the cart as it was.
#[instrument(skip(state, session, user, form), fields(user_id = %user.id))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Form(form): Form<CheckoutForm>,
) -> Result<Json<CheckoutSuccess>> {
    let mut cart = load_cart(&session).await?;
    let order = CheckoutService::new(state.pool())
        .checkout(&form, &cart, Some(user.id))
        .await?;

    cart.clear();
    save_cart(&session, &cart).await?;

    Ok(Json(CheckoutSuccess {
        success: true,
        order,
    }))
}
