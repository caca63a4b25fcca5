//! ElectroShop Core - domain types and checkout rules.
//!
//! This crate holds everything about the storefront that can be expressed
//! without I/O:
//! - [`types`] - typed IDs, prices, products, payment details and orders
//! - [`cart`] - the session-held shopping cart and its stock clamping rules
//! - [`checkout`] - form sanitization, validation and order planning
//!
//! The `storefront` crate owns persistence and HTTP; it feeds catalog rows
//! into [`checkout::plan_checkout`] and persists the resulting
//! [`checkout::PendingOrder`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod types;

pub use cart::{Cart, CartEntry};
pub use types::*;
