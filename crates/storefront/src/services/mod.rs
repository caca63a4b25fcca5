//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Username/password registration and login
//! - `cart` - Session cart updates and cart views
//! - `checkout` - Checkout planning and order placement

pub mod auth;
pub mod cart;
pub mod checkout;

pub use auth::{AuthError, AuthService, Registration};
pub use cart::{CartLine, CartView, add_to_cart, cart_view};
pub use checkout::{CheckoutError, CheckoutService};
