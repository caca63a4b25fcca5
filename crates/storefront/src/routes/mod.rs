//! HTTP route handlers for the storefront.
//!
//! Every handler answers with JSON.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Database readiness check
//!
//! # Catalog
//! GET  /                       - All products
//! GET  /products/{id}          - Product detail
//!
//! # Cart (session)
//! GET  /cart                   - Cart view
//! GET  /cart/add/{id}?qty=N    - Add to cart, returns cart view
//! POST /cart/remove/{id}       - Remove entry, returns cart view
//!
//! # Checkout (requires login)
//! GET  /checkout               - Form prefill
//! POST /checkout               - Place order
//!
//! # Orders (requires login)
//! GET  /orders                 - The user's orders, newest first
//! GET  /orders/{id}            - One of the user's orders
//!
//! # Auth
//! POST /auth/register          - Register and log in
//! POST /auth/login             - Login action
//! POST /auth/logout            - Logout action
//! ```

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod health;
pub mod home;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add/{id}", get(cart::add))
        .route("/remove/{id}", post(cart::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/", get(home::index))
        .route("/products/{id}", get(products::show))
        .nest("/cart", cart_routes())
        .route("/checkout", get(checkout::prefill).post(checkout::submit))
        .route("/orders", get(orders::index))
        .route("/orders/{id}", get(orders::show))
        .nest("/auth", auth_routes())
}
