//! Checkout rules.
//!
//! Checkout is split into a pure planning step, which lives here, and a
//! persistence step owned by the storefront's order repository:
//!
//! 1. [`CheckoutForm`] fields are sanitized with [`sanitize_text`].
//! 2. [`plan_checkout`] validates the form, resolves the cart against a
//!    catalog snapshot and either returns a [`PendingOrder`] or every rule
//!    the submission broke as [`ValidationErrors`].
//! 3. The repository inserts the order and applies
//!    [`PendingOrder::stock_decrements`] as guarded updates in a single
//!    transaction.

mod form;
mod plan;
mod sanitize;
mod violation;

pub use form::CheckoutForm;
pub use plan::{PendingOrder, StockDecrement, plan_checkout};
pub use sanitize::sanitize_text;
pub use violation::{CheckoutViolation, ValidationErrors};
